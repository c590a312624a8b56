//! Recently visited results, persisted across sessions.
//!
//! The list is stored as a JSON array under a single key, most recent
//! first, deduplicated by id and capped. Storage trouble of any kind is
//! logged and treated as an empty list.

use std::sync::Arc;

use hearth_core::{RecentConfig, SearchResult, StorageError};

use crate::storage::KeyValueStore;

/// Recent-items list over an injected store.
pub struct RecentItems {
    store: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    load_limit: usize,
}

impl RecentItems {
    /// Create with the default key and limits.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, &RecentConfig::default())
    }

    /// Create with explicit settings.
    pub fn with_config(store: Arc<dyn KeyValueStore>, config: &RecentConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            capacity: config.capacity,
            load_limit: config.load_limit,
        }
    }

    /// Up to `load_limit` most recent items.
    pub fn load(&self) -> Vec<SearchResult> {
        let mut items = self.all();
        items.truncate(self.load_limit);
        items
    }

    /// The full stored list.
    pub fn all(&self) -> Vec<SearchResult> {
        match self.read() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Failed to read recent items: {}", e);
                Vec::new()
            }
        }
    }

    /// Record `item` as most recent.
    ///
    /// Action results are never recorded. Returns `true` if the list was
    /// persisted.
    pub fn save(&self, item: &SearchResult) -> bool {
        if !item.is_recordable() {
            tracing::debug!("Not recording action result '{}'", item.id);
            return false;
        }

        let mut items = self.all();
        items.retain(|existing| existing.id != item.id);
        items.insert(0, item.clone());
        items.truncate(self.capacity);

        match self.write(&items) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist recent items: {}", e);
                false
            }
        }
    }

    fn read(&self) -> Result<Vec<SearchResult>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let mut items: Vec<SearchResult> = serde_json::from_str(&raw)?;
        // Older writers may have left actions or extra entries behind.
        items.retain(SearchResult::is_recordable);
        items.truncate(self.capacity);
        Ok(items)
    }

    fn write(&self, items: &[SearchResult]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.store.set(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use hearth_core::{QuickAction, ResultKind};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("disk on fire".to_string()))
        }
    }

    fn ticket(n: usize) -> SearchResult {
        SearchResult::link(
            format!("t-{}", n),
            ResultKind::Ticket,
            format!("Ticket {}", n),
            format!("/crm/tickets/t-{}", n),
        )
    }

    fn ids(items: &[SearchResult]) -> Vec<&str> {
        items.iter().map(|i| i.id.0.as_str()).collect()
    }

    #[test]
    fn test_empty_store() {
        let recent = RecentItems::new(Arc::new(MemoryStore::new()));
        assert!(recent.load().is_empty());
    }

    #[test]
    fn test_save_prepends() {
        let recent = RecentItems::new(Arc::new(MemoryStore::new()));
        recent.save(&ticket(1));
        recent.save(&ticket(2));
        assert_eq!(ids(&recent.load()), vec!["t-2", "t-1"]);
    }

    #[test]
    fn test_capacity_and_load_limit() {
        let recent = RecentItems::new(Arc::new(MemoryStore::new()));
        for n in 0..15 {
            assert!(recent.save(&ticket(n)));
        }

        let all = recent.all();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].id.0, "t-14");
        assert_eq!(all[9].id.0, "t-5");

        assert_eq!(ids(&recent.load()), vec!["t-14", "t-13", "t-12", "t-11", "t-10"]);
    }

    #[test]
    fn test_reselect_moves_to_front() {
        let recent = RecentItems::new(Arc::new(MemoryStore::new()));
        recent.save(&ticket(1));
        recent.save(&ticket(2));
        recent.save(&ticket(3));
        recent.save(&ticket(1));

        let all = recent.all();
        assert_eq!(ids(&all), vec!["t-1", "t-3", "t-2"]);
    }

    #[test]
    fn test_actions_are_not_recorded() {
        let recent = RecentItems::new(Arc::new(MemoryStore::new()));
        let action = QuickAction::new("create_task", "Create New Task", "", "check").to_result();

        assert!(!recent.save(&action));
        assert!(recent.all().is_empty());
    }

    #[test]
    fn test_malformed_json_is_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set("hearth.palette.recent", "{not json").unwrap();

        let recent = RecentItems::new(store.clone());
        assert!(recent.load().is_empty());

        // Saving overwrites the garbage.
        assert!(recent.save(&ticket(1)));
        assert_eq!(ids(&recent.load()), vec!["t-1"]);
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let recent = RecentItems::new(Arc::new(BrokenStore));
        assert!(recent.load().is_empty());
        assert!(!recent.save(&ticket(1)));
    }

    #[test]
    fn test_custom_config() {
        let config = RecentConfig {
            capacity: 2,
            load_limit: 1,
            empty_query_limit: 1,
            storage_key: "custom".to_string(),
        };
        let store = Arc::new(MemoryStore::new());
        let recent = RecentItems::with_config(store.clone(), &config);

        recent.save(&ticket(1));
        recent.save(&ticket(2));
        recent.save(&ticket(3));

        assert_eq!(recent.all().len(), 2);
        assert_eq!(recent.load().len(), 1);
        assert!(store.get("custom").unwrap().is_some());
        assert!(store.get("hearth.palette.recent").unwrap().is_none());
    }
}
