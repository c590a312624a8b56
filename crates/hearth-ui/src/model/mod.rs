//! State model for the Hearth palette.
//!
//! This module contains the state machine and data structures that drive the palette.
//! All types are independent of any rendering layer for testability.

mod observable;
mod state;

pub use observable::ObservablePalette;
pub use state::{
    ListEntry, OpenStage, OpenState, PaletteModel, PalettePhase, PaletteSnapshot, PaletteStatus,
};
