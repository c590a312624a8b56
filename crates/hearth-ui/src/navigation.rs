//! Router seam for activated results.

/// Performs navigation inside the host console. Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// Navigator that only logs. Used by the text shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, url: &str) {
        tracing::info!("Navigate to {}", url);
    }
}
