//! Centralized commands for the Hearth palette.
//!
//! Keybindings refer to commands by name; this module maps names to
//! [`PaletteCommand`] values the controller executes.

/// A built-in palette command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCommand {
    // Visibility
    Toggle,
    Open,
    Dismiss,

    // Navigation
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,

    // Execution
    Submit,
}

/// Look up a command by name.
pub fn command_from_name(name: &str) -> Option<PaletteCommand> {
    match name {
        // Visibility
        "toggle" => Some(PaletteCommand::Toggle),
        "open" => Some(PaletteCommand::Open),
        "dismiss" => Some(PaletteCommand::Dismiss),

        // Navigation
        "cursor_up" => Some(PaletteCommand::CursorUp),
        "cursor_down" => Some(PaletteCommand::CursorDown),
        "cursor_home" => Some(PaletteCommand::CursorHome),
        "cursor_end" => Some(PaletteCommand::CursorEnd),

        // Execution
        "submit" => Some(PaletteCommand::Submit),

        _ => None,
    }
}

/// Get all available command names.
pub fn available_commands() -> &'static [&'static str] {
    &[
        "toggle",
        "open",
        "dismiss",
        "cursor_up",
        "cursor_down",
        "cursor_home",
        "cursor_end",
        "submit",
    ]
}
