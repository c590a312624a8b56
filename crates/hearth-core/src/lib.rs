//! Core types for the Hearth command palette.
//!
//! This crate contains shared data structures that are used across all Hearth crates:
//! - Search result types
//! - Quick actions and activation outcomes
//! - Configuration types
//! - Error types

mod action;
mod config;
mod error;
mod result;

pub use action::{Activation, QuickAction};
pub use config::{
    config_dir, config_path, data_dir, HotkeyConfig, PaletteConfig,
    RecentConfig,
};
pub use error::{BackendError, ConfigError, SearchError, StorageError};
pub use result::{default_icon, ResultId, ResultKind, ResultTarget, SearchResult};
