//! Palette logic for Hearth.
//!
//! This crate provides everything behind the command palette that does not
//! depend on a UI:
//! - Capability gating and the quick action table
//! - Fuzzy matching for quick action titles
//! - Recent items over an injected key-value store
//! - Multi-entity search aggregation and ranking
//! - Keybinding registry

pub mod capability;
pub mod directory;
pub mod fuzzy;
pub mod keymap;
pub mod quick_actions;
pub mod recent;
pub mod registry;
pub mod search;
pub mod storage;

// Re-export commonly used types
pub use capability::{Capability, CapabilityProvider, CapabilitySet, Requirement, ORG_ADMIN};
pub use directory::InMemoryDirectory;
pub use fuzzy::fuzzy_match;
pub use keymap::{
    KeyHandler, KeyScope, KeymapRegistry, Keystroke, KeystrokeError, Modifiers, PendingBinding,
};
pub use quick_actions::{ActionHandler, ActionHandlers, QuickActionEntry, QuickActionTable};
pub use recent::RecentItems;
pub use registry::PaletteRegistry;
pub use search::{
    normalize, rank, CompanyHit, ContactHit, DealHit, SearchAggregator, SearchResponse,
    SearchService, TicketHit,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

// Re-export hearth_core types for convenience
pub use hearth_core::{QuickAction, ResultKind, SearchError, SearchResult};
