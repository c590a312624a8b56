//! Backend integration for the Hearth palette.
//!
//! This module provides the bridge between the palette controller and the
//! search aggregator. The `Backend` trait returns boxed futures, so the
//! controller can spawn them however it wants and tests can swap in a mock.

use futures::future::BoxFuture;
use hearth_core::{BackendError, SearchResult};
use hearth_palette::SearchAggregator;
use std::sync::Arc;
use std::time::Duration;

// =============================================================================
// Backend Trait
// =============================================================================

/// Trait for backend operations.
pub trait Backend: Send + Sync {
    /// Search with the current query. Returns ranked, truncated rows.
    fn search(&self, query: String) -> BoxFuture<'static, Result<Vec<SearchResult>, BackendError>>;
}

// =============================================================================
// Runtime Backend
// =============================================================================

/// Real backend implementation over a [`SearchAggregator`].
pub struct RuntimeBackend {
    aggregator: Arc<SearchAggregator>,
    timeout: Duration,
}

impl RuntimeBackend {
    /// Create a new runtime backend.
    pub fn new(aggregator: Arc<SearchAggregator>) -> Self {
        Self {
            aggregator,
            timeout: Duration::from_secs(5),
        }
    }

    /// Create with a custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Backend for RuntimeBackend {
    fn search(&self, query: String) -> BoxFuture<'static, Result<Vec<SearchResult>, BackendError>> {
        let pending = self.aggregator.search(&query);
        let timeout = self.timeout;

        Box::pin(async move {
            match tokio::time::timeout(timeout, pending).await {
                Ok(result) => result.map_err(BackendError::from),
                Err(_) => Err(BackendError::Timeout { duration: timeout }),
            }
        })
    }
}

// =============================================================================
// Mock Backend for Testing
// =============================================================================


// =============================================================================
// Tests
// =============================================================================
