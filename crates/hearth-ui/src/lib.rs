//! Headless frontend for the Hearth command palette.
//!
//! This crate provides:
//! - PaletteController, the palette state machine
//! - Observable snapshots for any renderer
//! - Text views and a line-oriented shell
//! - Backend and navigation seams

pub mod actions;
pub mod backend;
pub mod controller;
pub mod model;
pub mod navigation;
pub mod views;
pub mod window;

// Re-export commonly used types
pub use actions::{available_commands, command_from_name, PaletteCommand};
pub use backend::{Backend, RuntimeBackend};
pub use controller::PaletteController;
pub use hearth_core::Activation;
pub use model::{ListEntry, ObservablePalette, PalettePhase, PaletteSnapshot, PaletteStatus};
pub use navigation::{LogNavigator, Navigator};
pub use views::{render_entries, render_row, render_snapshot};
pub use window::{run_palette, ShellCommand, ShellError};
