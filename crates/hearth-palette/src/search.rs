//! Multi-entity search aggregation.
//!
//! ## Flow
//!
//! ```text
//! query ──► SearchService::search ──► {contacts, companies, deals, tickets}
//!                                            │ normalize
//!                                            ▼
//!                     SearchResult rows (fetch order) + matching quick actions
//!                                            │ stable prefix partition
//!                                            ▼
//!                                    truncate to max_results
//! ```

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use hearth_core::{PaletteConfig, ResultKind, SearchError, SearchResult};

use crate::capability::CapabilityProvider;
use crate::quick_actions::QuickActionTable;

// =============================================================================
// Service Interface
// =============================================================================

/// Entity search backend.
///
/// Implementations fan out to the contact, company, deal and ticket
/// collections and return at most `limit` matches per collection.
#[cfg_attr(test, mockall::automock)]
pub trait SearchService: Send + Sync {
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> BoxFuture<'static, Result<SearchResponse, SearchError>>;
}

/// Raw matches grouped by entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub contacts: Vec<ContactHit>,
    pub companies: Vec<CompanyHit>,
    pub deals: Vec<DealHit>,
    pub tickets: Vec<TicketHit>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
            && self.companies.is_empty()
            && self.deals.is_empty()
            && self.tickets.is_empty()
    }

    /// Total number of hits across all types.
    pub fn len(&self) -> usize {
        self.contacts.len() + self.companies.len() + self.deals.len() + self.tickets.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactHit {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub company_name: Option<String>,
}

impl ContactHit {
    /// "First Last", or the email when both names are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| "Unnamed contact".to_string())
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyHit {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealHit {
    pub id: String,
    pub name: String,
    /// Whole currency units.
    pub amount: Option<u64>,
    pub stage: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketHit {
    pub id: String,
    pub subject: String,
    pub number: Option<u64>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

// =============================================================================
// Normalization
// =============================================================================

impl From<&ContactHit> for SearchResult {
    fn from(hit: &ContactHit) -> Self {
        let mut result = SearchResult::link(
            hit.id.as_str(),
            ResultKind::Contact,
            hit.display_name(),
            format!("/crm/contacts/{}", hit.id),
        );
        result.subtitle = hit.email.clone();
        result.meta = hit.company_name.clone();
        result
    }
}

impl From<&CompanyHit> for SearchResult {
    fn from(hit: &CompanyHit) -> Self {
        let mut result = SearchResult::link(
            hit.id.as_str(),
            ResultKind::Company,
            &hit.name,
            format!("/crm/companies/{}", hit.id),
        );
        result.subtitle = hit.industry.clone();
        result.meta = hit.city.clone();
        result
    }
}

impl From<&DealHit> for SearchResult {
    fn from(hit: &DealHit) -> Self {
        let mut result = SearchResult::link(
            hit.id.as_str(),
            ResultKind::Deal,
            &hit.name,
            format!("/crm/deals/{}", hit.id),
        );
        result.subtitle = hit.company_name.clone();
        result.meta = join_meta(hit.amount.map(format_amount), hit.stage.clone());
        result
    }
}

impl From<&TicketHit> for SearchResult {
    fn from(hit: &TicketHit) -> Self {
        let mut result = SearchResult::link(
            hit.id.as_str(),
            ResultKind::Ticket,
            &hit.subject,
            format!("/crm/tickets/{}", hit.id),
        );
        result.subtitle = hit.number.map(|n| format!("#{}", n));
        result.meta = join_meta(hit.status.clone(), hit.priority.clone());
        result
    }
}

/// Flatten a response into rows in fetch order.
pub fn normalize(response: &SearchResponse) -> Vec<SearchResult> {
    let mut results = Vec::with_capacity(response.len());
    results.extend(response.contacts.iter().map(SearchResult::from));
    results.extend(response.companies.iter().map(SearchResult::from));
    results.extend(response.deals.iter().map(SearchResult::from));
    results.extend(response.tickets.iter().map(SearchResult::from));
    results
}

/// Move titles with a case-insensitive prefix match to the front, keeping
/// the existing order inside both partitions, then truncate.
pub fn rank(mut results: Vec<SearchResult>, query: &str, max_results: usize) -> Vec<SearchResult> {
    let query = query.trim();
    results.sort_by_key(|r| !r.title_starts_with(query));
    results.truncate(max_results);
    results
}

/// Format whole units with thousands separators, e.g. `$12,500`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn join_meta(left: Option<String>, right: Option<String>) -> Option<String> {
    match (left, right) {
        (Some(l), Some(r)) => Some(format!("{} · {}", l, r)),
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}

// =============================================================================
// Aggregator
// =============================================================================

/// Combines entity search with capability-gated quick actions.
pub struct SearchAggregator {
    service: Arc<dyn SearchService>,
    quick_actions: Arc<QuickActionTable>,
    capabilities: Arc<dyn CapabilityProvider>,
    per_type_limit: usize,
    max_results: usize,
}

impl SearchAggregator {
    pub fn new(
        service: Arc<dyn SearchService>,
        quick_actions: Arc<QuickActionTable>,
        capabilities: Arc<dyn CapabilityProvider>,
    ) -> Self {
        let defaults = PaletteConfig::default();
        Self {
            service,
            quick_actions,
            capabilities,
            per_type_limit: defaults.per_type_limit,
            max_results: defaults.max_results,
        }
    }

    /// Apply limits from configuration.
    pub fn with_config(mut self, config: &PaletteConfig) -> Self {
        self.per_type_limit = config.per_type_limit;
        self.max_results = config.max_results;
        self
    }

    /// Search entities and quick actions for `query`.
    ///
    /// Returns a future that does not borrow the aggregator, so callers can
    /// spawn it.
    pub fn search(
        &self,
        query: &str,
    ) -> BoxFuture<'static, Result<Vec<SearchResult>, SearchError>> {
        let query = query.trim().to_string();
        let actions = self
            .quick_actions
            .matching_results(self.capabilities.as_ref(), &query);
        let max_results = self.max_results;
        let pending = self.service.search(&query, self.per_type_limit);

        Box::pin(async move {
            let response = pending.await?;
            tracing::debug!(
                "search '{}': {} entity hits, {} quick actions",
                query,
                response.len(),
                actions.len()
            );

            let mut results = normalize(&response);
            results.extend(actions);
            Ok(rank(results, &query, max_results))
        })
    }

}
