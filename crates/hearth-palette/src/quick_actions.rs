//! Capability-gated quick actions.
//!
//! Quick actions are declared in a table of `(requirement, action)` rows and
//! filtered once per render. Handlers are bound by action id in
//! [`ActionHandlers`], so the table itself stays plain data.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use hearth_core::{QuickAction, SearchResult};

use crate::capability::{CapabilityProvider, Requirement};
use crate::fuzzy::fuzzy_match;

// =============================================================================
// Table
// =============================================================================

/// A quick action together with what it requires.
#[derive(Debug, Clone)]
pub struct QuickActionEntry {
    pub requirement: Requirement,
    pub action: QuickAction,
}

/// Declarative list of every quick action the palette knows about.
#[derive(Debug, Clone, Default)]
pub struct QuickActionTable {
    entries: Vec<QuickActionEntry>,
}

impl QuickActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock CRM actions.
    pub fn crm_defaults() -> Self {
        let mut table = Self::new();
        table.add(
            Requirement::one("contacts:write"),
            QuickAction::new(
                "create_contact",
                "Create New Contact",
                "Add a guest or buyer contact",
                "user-plus",
            ),
        );
        table.add(
            Requirement::one("companies:write"),
            QuickAction::new(
                "create_company",
                "Create New Company",
                "Add a hotel, restaurant or distributor",
                "building",
            ),
        );
        table.add(
            Requirement::one("deals:write"),
            QuickAction::new(
                "create_deal",
                "Create New Deal",
                "Open a deal in the pipeline",
                "handshake",
            ),
        );
        table.add(
            Requirement::one("tickets:write"),
            QuickAction::new(
                "create_ticket",
                "Create New Ticket",
                "Log a support request",
                "ticket",
            ),
        );
        table.add(
            Requirement::one("activities:write"),
            QuickAction::new(
                "create_task",
                "Create New Task",
                "Schedule a follow-up activity",
                "check-square",
            ),
        );
        table.add(
            Requirement::one("deals:read"),
            QuickAction::new(
                "view_pipeline",
                "View Deal Pipeline",
                "Open the pipeline board",
                "kanban",
            ),
        );
        table.add(
            Requirement::any(&["products:read", "inventory:read"]),
            QuickAction::new(
                "browse_products",
                "Browse Products",
                "Catalog and stock levels",
                "package",
            ),
        );
        table.add(
            Requirement::all(&["pricing:write", "products:read"]),
            QuickAction::new(
                "edit_price_lists",
                "Edit Price Lists",
                "Update B2B pricing",
                "tag",
            ),
        );
        table
    }

    /// Append a row.
    pub fn add(&mut self, requirement: Requirement, action: QuickAction) {
        self.entries.push(QuickActionEntry {
            requirement,
            action,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a row by action id.
    pub fn entry(&self, id: &str) -> Option<&QuickActionEntry> {
        self.entries.iter().find(|entry| entry.action.id == id)
    }

    /// Whether `id` exists and the provider may run it.
    pub fn is_permitted(&self, caps: &dyn CapabilityProvider, id: &str) -> bool {
        self.entry(id)
            .is_some_and(|entry| caps.satisfies(&entry.requirement))
    }

    /// Actions the provider is allowed to see, in table order.
    pub fn permitted<'a>(&'a self, caps: &dyn CapabilityProvider) -> Vec<&'a QuickAction> {
        self.entries
            .iter()
            .filter(|entry| caps.satisfies(&entry.requirement))
            .map(|entry| &entry.action)
            .collect()
    }

    /// Permitted actions as palette rows.
    pub fn permitted_results(&self, caps: &dyn CapabilityProvider) -> Vec<SearchResult> {
        self.permitted(caps)
            .into_iter()
            .map(QuickAction::to_result)
            .collect()
    }

    /// Permitted actions whose title or subtitle fuzzy-matches `query`.
    pub fn matching_results(
        &self,
        caps: &dyn CapabilityProvider,
        query: &str,
    ) -> Vec<SearchResult> {
        self.permitted(caps)
            .into_iter()
            .filter(|action| {
                fuzzy_match(&action.title, query) || fuzzy_match(&action.subtitle, query)
            })
            .map(QuickAction::to_result)
            .collect()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Callback bound to a quick action.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync>;

/// Handlers keyed by quick action id.
#[derive(Default)]
pub struct ActionHandlers {
    handlers: RwLock<HashMap<String, ActionHandler>>,
}

impl ActionHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler. A later binding for the same id replaces the earlier one.
    pub fn register(&self, id: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) {
        self.handlers.write().insert(id.into(), Arc::new(handler));
    }

    /// Get handler by ID.
    pub fn get(&self, id: &str) -> Option<ActionHandler> {
        self.handlers.read().get(id).cloned()
    }

    /// Run the handler for `id`. Returns `false` if none is bound.
    ///
    /// The handler runs after the registry lock is released, so it may
    /// register further handlers.
    pub fn invoke(&self, id: &str) -> bool {
        match self.get(id) {
            Some(handler) => {
                handler();
                true
            }
            None => {
                tracing::warn!("No handler bound for quick action '{}'", id);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl std::fmt::Debug for ActionHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.read();
        let mut ids: Vec<_> = handlers.keys().collect();
        ids.sort();
        f.debug_struct("ActionHandlers").field("ids", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{CapabilitySet, ORG_ADMIN};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn titles(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_contacts_write_only() {
        let table = QuickActionTable::crm_defaults();
        let caps = CapabilitySet::from_strs(["contacts:write"]);

        let results = table.permitted_results(&caps);
        assert_eq!(titles(&results), vec!["Create New Contact"]);
        assert!(!titles(&results).contains(&"Create New Deal"));
    }

    #[test]
    fn test_no_capabilities_no_actions() {
        let table = QuickActionTable::crm_defaults();
        assert!(table.permitted(&CapabilitySet::new()).is_empty());
    }

    #[test]
    fn test_admin_sees_everything_in_table_order() {
        let table = QuickActionTable::crm_defaults();
        let caps = CapabilitySet::from_strs([ORG_ADMIN]);

        let permitted = table.permitted(&caps);
        assert_eq!(permitted.len(), table.len());
        assert_eq!(permitted[0].id, "create_contact");
    }

    #[test]
    fn test_any_and_all_requirements() {
        let table = QuickActionTable::crm_defaults();

        let inventory = CapabilitySet::from_strs(["inventory:read"]);
        let ids: Vec<_> = table.permitted(&inventory).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["browse_products"]);

        let pricing_only = CapabilitySet::from_strs(["pricing:write"]);
        assert!(table.permitted(&pricing_only).is_empty());
    }

    #[test]
    fn test_matching_results_use_title_and_subtitle() {
        let table = QuickActionTable::crm_defaults();
        let caps = CapabilitySet::from_strs([ORG_ADMIN]);

        let by_title = table.matching_results(&caps, "new deal");
        assert_eq!(titles(&by_title), vec!["Create New Deal"]);

        let by_subtitle = table.matching_results(&caps, "follow-up");
        assert_eq!(titles(&by_subtitle), vec!["Create New Task"]);
    }

    #[test]
    fn test_matching_respects_capabilities() {
        let table = QuickActionTable::crm_defaults();
        let caps = CapabilitySet::from_strs(["contacts:write"]);
        assert!(table.matching_results(&caps, "deal").is_empty());
    }

    #[test]
    fn test_is_permitted() {
        let table = QuickActionTable::crm_defaults();
        let caps = CapabilitySet::from_strs(["activities:write"]);
        assert!(table.is_permitted(&caps, "create_task"));
        assert!(!table.is_permitted(&caps, "create_deal"));
        assert!(!table.is_permitted(&caps, "no_such_action"));
    }

    #[test]
    fn test_handlers_invoke() {
        let handlers = ActionHandlers::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        handlers.register("create_task", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(handlers.invoke("create_task"));
        assert!(!handlers.invoke("missing"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(handlers.len(), 1);
    }
}
