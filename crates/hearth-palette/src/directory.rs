//! In-memory search service over a fixed set of CRM entities.
//!
//! Used by the demo shell and by tests that want realistic search behavior
//! without a network backend. Loaded from a JSON document shaped like a
//! [`SearchResponse`].

use futures::future::BoxFuture;
use std::path::Path;

use hearth_core::SearchError;

use crate::search::{SearchResponse, SearchService};

/// Case-insensitive substring search over a loaded entity set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    entities: SearchResponse,
}

impl InMemoryDirectory {
    pub fn new(entities: SearchResponse) -> Self {
        Self { entities }
    }

    /// Parse a directory from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SearchError> {
        serde_json::from_str(text)
            .map(Self::new)
            .map_err(|e| SearchError::Decode(e.to_string()))
    }

    /// Load a directory from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Backend(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    /// Number of entities across all collections.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Synchronous lookup used by the [`SearchService`] impl.
    pub fn lookup(&self, query: &str, limit: usize) -> SearchResponse {
        let needle = query.trim().to_lowercase();
        let hit = |fields: &[Option<&str>]| {
            fields
                .iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        };

        SearchResponse {
            contacts: self
                .entities
                .contacts
                .iter()
                .filter(|c| {
                    hit(&[
                        Some(c.first_name.as_str()),
                        Some(c.last_name.as_str()),
                        Some(c.display_name().as_str()),
                        c.email.as_deref(),
                    ])
                })
                .take(limit)
                .cloned()
                .collect(),
            companies: self
                .entities
                .companies
                .iter()
                .filter(|c| hit(&[Some(c.name.as_str())]))
                .take(limit)
                .cloned()
                .collect(),
            deals: self
                .entities
                .deals
                .iter()
                .filter(|d| hit(&[Some(d.name.as_str()), d.company_name.as_deref()]))
                .take(limit)
                .cloned()
                .collect(),
            tickets: self
                .entities
                .tickets
                .iter()
                .filter(|t| hit(&[Some(t.subject.as_str())]))
                .take(limit)
                .cloned()
                .collect(),
        }
    }
}

impl SearchService for InMemoryDirectory {
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> BoxFuture<'static, Result<SearchResponse, SearchError>> {
        let response = self.lookup(query, limit);
        Box::pin(async move { Ok(response) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "contacts": [
            {
                "id": "p-1",
                "first_name": "Maria",
                "last_name": "Okafor",
                "email": "maria@seaview.example",
                "company_name": "Seaview Resorts"
            },
            {"id": "p-2", "first_name": "Tom", "last_name": "Berg", "email": "tom@acme.example"}
        ],
        "companies": [
            {"id": "c-1", "name": "Acme Corp", "industry": "Hotels"},
            {"id": "c-2", "name": "Seaview Resorts", "industry": "Resorts", "city": "Faro"}
        ],
        "deals": [
            {
                "id": "d-1",
                "name": "Upgrade Acme Services",
                "amount": 40000,
                "stage": "negotiation",
                "company_name": "Acme Corp"
            }
        ],
        "tickets": [
            {
                "id": "t-1",
                "subject": "Seaview minibar restock",
                "number": 77,
                "status": "open",
                "priority": "low"
            }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let directory = InMemoryDirectory::from_json(FIXTURE).unwrap();
        assert_eq!(directory.len(), 6);
    }

    #[test]
    fn test_from_json_error() {
        let err = InMemoryDirectory::from_json("[").unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[test]
    fn test_lookup_across_collections() {
        let directory = InMemoryDirectory::from_json(FIXTURE).unwrap();
        let response = directory.lookup("SEAVIEW", 5);

        assert_eq!(response.contacts.len(), 1);
        assert_eq!(response.companies.len(), 1);
        assert!(response.deals.is_empty());
        assert_eq!(response.tickets.len(), 1);
    }

    #[test]
    fn test_lookup_full_name_and_limit() {
        let directory = InMemoryDirectory::from_json(FIXTURE).unwrap();
        assert_eq!(directory.lookup("maria oka", 5).contacts.len(), 1);

        let response = directory.lookup("acme", 1);
        assert_eq!(response.contacts.len(), 1);
        assert_eq!(response.companies.len(), 1);
        assert_eq!(response.deals.len(), 1);
    }

    #[tokio::test]
    async fn test_search_service() {
        let directory = InMemoryDirectory::from_json(FIXTURE).unwrap();
        let response = directory.search("berg", 5).await.unwrap();
        assert_eq!(response.contacts[0].id, "p-2");
    }
}
