//! Palette Registry
//!
//! Holds the quick action table and provides registries for action handlers
//! and keybindings.

use std::sync::Arc;

use crate::keymap::KeymapRegistry;
use crate::quick_actions::{ActionHandlers, QuickActionTable};

/// The palette registry stores the quick action table and sub-registries.
pub struct PaletteRegistry {
    /// Declared quick actions.
    quick_actions: Arc<QuickActionTable>,

    /// Handlers bound to quick action ids.
    handlers: Arc<ActionHandlers>,

    /// Keybindings.
    keymap: Arc<KeymapRegistry>,
}

impl PaletteRegistry {
    /// Create a registry over `quick_actions` with the given keymap.
    pub fn new(quick_actions: QuickActionTable, keymap: KeymapRegistry) -> Self {
        Self {
            quick_actions: Arc::new(quick_actions),
            handlers: Arc::new(ActionHandlers::new()),
            keymap: Arc::new(keymap),
        }
    }

    /// Stock CRM actions and default bindings for the `toggle` hotkey.
    pub fn crm_defaults(toggle: &str) -> Self {
        Self::new(
            QuickActionTable::crm_defaults(),
            KeymapRegistry::with_defaults(toggle),
        )
    }

    /// Get the quick action table (shared Arc).
    pub fn quick_actions(&self) -> Arc<QuickActionTable> {
        self.quick_actions.clone()
    }

    /// Get the handler registry (shared Arc).
    pub fn handlers(&self) -> Arc<ActionHandlers> {
        self.handlers.clone()
    }

    /// Get the keymap registry (shared Arc).
    pub fn keymap(&self) -> Arc<KeymapRegistry> {
        self.keymap.clone()
    }
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::crm_defaults("cmd+k")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_defaults() {
        let registry = PaletteRegistry::default();
        assert_eq!(registry.quick_actions().len(), 8);
        assert!(registry.handlers().is_empty());
        assert_eq!(registry.keymap().binding_count(), 8);
    }

    #[test]
    fn test_handlers_are_shared() {
        let registry = PaletteRegistry::default();
        registry.handlers().register("create_task", || {});
        assert_eq!(registry.handlers().len(), 1);
    }
}
