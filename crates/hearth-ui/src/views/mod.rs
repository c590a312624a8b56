//! Text views for the Hearth palette.
//!
//! Views are pure functions from a [`PaletteSnapshot`](crate::model::PaletteSnapshot)
//! to text, so any host can draw the palette without touching controller state.

mod palette_panel;
mod results_panel;

pub use palette_panel::render_snapshot;
pub use results_panel::{render_entries, render_row};
