//! Keymap registry for palette keybindings.
//!
//! Bindings are collected at startup (defaults first, then user overrides)
//! and resolved on every key event. Later bindings for the same keystroke
//! and scope override earlier ones.
//!
//! ```text
//! [defaults / config]                  [key event]
//!        │                                  │
//!        ▼                                  ▼
//! keymap.set()  ───►  KeymapRegistry  ◄── resolve(scope, keystroke)
//!                          │
//!                          └──► KeyHandler::Action("cursor_down")
//!                               KeyHandler::QuickAction { id }
//! ```

use bitflags::bitflags;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Keystroke
// =============================================================================

bitflags! {
    /// Modifier keys held with a keystroke.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const CMD = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const SHIFT = 1 << 3;
    }
}

/// Keystroke parse errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeystrokeError {
    #[error("Empty keystroke")]
    Empty,

    #[error("Unknown modifier '{0}'")]
    UnknownModifier(String),
}

/// A key plus modifiers, e.g. `cmd+k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub modifiers: Modifiers,
    /// Lowercase key name ("k", "up", "escape").
    pub key: String,
}

impl Keystroke {
    /// A keystroke with no modifiers.
    pub fn plain(key: &str) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            key: normalize_key(key),
        }
    }

    pub fn with_modifiers(modifiers: Modifiers, key: &str) -> Self {
        Self {
            modifiers,
            key: normalize_key(key),
        }
    }

    /// Parse "ctrl+n", "cmd-shift-z" or "escape".
    pub fn parse(s: &str) -> Result<Self, KeystrokeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeystrokeError::Empty);
        }

        let (mods, key) = split_key(s);
        if key.is_empty() {
            return Err(KeystrokeError::Empty);
        }

        let mut modifiers = Modifiers::empty();
        if !mods.is_empty() {
            for m in mods.split(is_separator) {
                modifiers |= match m.to_lowercase().as_str() {
                    "cmd" | "super" | "meta" | "win" => Modifiers::CMD,
                    "ctrl" | "control" => Modifiers::CTRL,
                    "alt" | "option" | "opt" => Modifiers::ALT,
                    "shift" => Modifiers::SHIFT,
                    other => return Err(KeystrokeError::UnknownModifier(other.to_string())),
                };
            }
        }

        Ok(Self::with_modifiers(modifiers, key))
    }
}

impl FromStr for Keystroke {
    type Err = KeystrokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CMD, "cmd"),
            (Modifiers::CTRL, "ctrl"),
            (Modifiers::ALT, "alt"),
            (Modifiers::SHIFT, "shift"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{}+", name)?;
            }
        }
        f.write_str(&self.key)
    }
}

fn is_separator(c: char) -> bool {
    c == '+' || c == '-'
}

/// Split "ctrl+shift+n" into ("ctrl+shift", "n"). Both `+` and `-` separate,
/// and a trailing doubled separator ("ctrl+-", "cmd--") binds the separator key.
fn split_key(s: &str) -> (&str, &str) {
    let mut tail = s.char_indices().rev();
    if let (Some((last, c1)), Some((before, c0))) = (tail.next(), tail.next()) {
        if is_separator(c1) && is_separator(c0) {
            return (&s[..before], &s[last..]);
        }
    }
    if s.len() == 1 {
        return ("", s);
    }
    match s.rfind(is_separator) {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => ("", s),
    }
}

fn normalize_key(key: &str) -> String {
    let key = key.trim().to_lowercase();
    match key.as_str() {
        "esc" => "escape".to_string(),
        "return" => "enter".to_string(),
        "arrowup" => "up".to_string(),
        "arrowdown" => "down".to_string(),
        _ => key,
    }
}

// =============================================================================
// Key Handler
// =============================================================================

/// A keybinding handler - either a built-in palette action or a quick action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyHandler {
    /// Built-in action name (e.g., "cursor_down").
    Action(String),

    /// Invoke a quick action handler directly.
    QuickAction { id: String },
}

/// Where a binding applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyScope {
    /// Anywhere in the host application, palette open or not.
    Global,
    /// Only while the palette is open.
    Palette,
}

/// A registered keybinding.
#[derive(Clone, Debug)]
pub struct PendingBinding {
    pub key: Keystroke,
    pub handler: KeyHandler,
    pub scope: KeyScope,
}

/// Composite key for deduplication: (keystroke, scope).
type BindingKey = (Keystroke, KeyScope);

// =============================================================================
// Keymap Registry
// =============================================================================

/// Registry of keybindings, keyed by (keystroke, scope).
#[derive(Default)]
pub struct KeymapRegistry {
    bindings: RwLock<HashMap<BindingKey, PendingBinding>>,
}

impl KeymapRegistry {
    /// Create a new empty keymap registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the stock palette bindings.
    ///
    /// `toggle` is the configured global hotkey; `ctrl+k` and `cmd+k` are
    /// always bound as well.
    pub fn with_defaults(toggle: &str) -> Self {
        let registry = Self::new();
        let global = |key: &str| (key.to_string(), "toggle", KeyScope::Global);
        let palette =
            |key: &str, action: &'static str| (key.to_string(), action, KeyScope::Palette);

        let defaults = [
            global("cmd+k"),
            global("ctrl+k"),
            palette("up", "cursor_up"),
            palette("down", "cursor_down"),
            palette("home", "cursor_home"),
            palette("end", "cursor_end"),
            palette("enter", "submit"),
            palette("escape", "dismiss"),
        ];
        for (key, action, scope) in defaults {
            if let Ok(key) = Keystroke::parse(&key) {
                registry.set(PendingBinding {
                    key,
                    handler: KeyHandler::Action(action.to_string()),
                    scope,
                });
            }
        }

        match Keystroke::parse(toggle) {
            Ok(key) => registry.set(PendingBinding {
                key,
                handler: KeyHandler::Action("toggle".to_string()),
                scope: KeyScope::Global,
            }),
            Err(e) => tracing::warn!("Ignoring toggle hotkey '{}': {}", toggle, e),
        }

        tracing::debug!("Registered {} default bindings", registry.binding_count());
        registry
    }

    /// Add a binding. If same (key, scope) exists, it's overwritten.
    pub fn set(&self, binding: PendingBinding) {
        let key = (binding.key.clone(), binding.scope);
        self.bindings.write().insert(key, binding);
    }

    /// Delete a binding. Returns `true` if a binding was removed.
    pub fn del(&self, key: &Keystroke, scope: KeyScope) -> bool {
        self.bindings.write().remove(&(key.clone(), scope)).is_some()
    }

    /// Find the handler for a keystroke.
    ///
    /// While the palette is open, palette bindings shadow global ones.
    pub fn resolve(&self, key: &Keystroke, palette_open: bool) -> Option<KeyHandler> {
        let bindings = self.bindings.read();
        let palette = palette_open
            .then(|| bindings.get(&(key.clone(), KeyScope::Palette)))
            .flatten();
        palette
            .or_else(|| bindings.get(&(key.clone(), KeyScope::Global)))
            .map(|b| b.handler.clone())
    }

    /// Get the number of bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(name: &str) -> KeyHandler {
        KeyHandler::Action(name.to_string())
    }

    #[test]
    fn test_parse_keystroke() {
        let ks = Keystroke::parse("cmd+k").unwrap();
        assert_eq!(ks.modifiers, Modifiers::CMD);
        assert_eq!(ks.key, "k");

        let ks = Keystroke::parse("Ctrl-Shift-P").unwrap();
        assert_eq!(ks.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(ks.key, "p");

        assert_eq!(Keystroke::parse("Esc").unwrap(), Keystroke::plain("escape"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Keystroke::parse("  "), Err(KeystrokeError::Empty));
        assert_eq!(Keystroke::parse("cmd+"), Err(KeystrokeError::Empty));
        assert_eq!(
            Keystroke::parse("hyper+k"),
            Err(KeystrokeError::UnknownModifier("hyper".to_string()))
        );
    }

    #[test]
    fn test_parse_minus_key() {
        let ks = Keystroke::parse("ctrl+-").unwrap();
        assert_eq!(ks.modifiers, Modifiers::CTRL);
        assert_eq!(ks.key, "-");

        let ks = Keystroke::parse("cmd-shift--").unwrap();
        assert_eq!(ks.modifiers, Modifiers::CMD | Modifiers::SHIFT);
        assert_eq!(ks.key, "-");

        assert_eq!(Keystroke::parse("-").unwrap(), Keystroke::plain("-"));
        assert_eq!(Keystroke::parse("ctrl+-").unwrap().to_string(), "ctrl+-");

        let registry = KeymapRegistry::new();
        let zoom_out = Keystroke::parse("ctrl+-").unwrap();
        registry.set(PendingBinding {
            key: zoom_out.clone(),
            handler: action("zoom_out"),
            scope: KeyScope::Palette,
        });
        assert_eq!(registry.resolve(&zoom_out, true), Some(action("zoom_out")));
        assert_eq!(registry.resolve(&Keystroke::plain("-"), true), None);
    }

    #[test]
    fn test_display() {
        let ks: Keystroke = "shift+cmd+k".parse().unwrap();
        assert_eq!(ks.to_string(), "cmd+shift+k");
    }

    #[test]
    fn test_set_overrides_same_scope() {
        let registry = KeymapRegistry::new();
        let key = Keystroke::parse("ctrl+n").unwrap();

        registry.set(PendingBinding {
            key: key.clone(),
            handler: action("cursor_down"),
            scope: KeyScope::Palette,
        });
        registry.set(PendingBinding {
            key: key.clone(),
            handler: action("cursor_up"),
            scope: KeyScope::Palette,
        });
        assert_eq!(registry.binding_count(), 1);

        registry.set(PendingBinding {
            key: key.clone(),
            handler: KeyHandler::QuickAction {
                id: "create_task".to_string(),
            },
            scope: KeyScope::Global,
        });
        assert_eq!(registry.binding_count(), 2);

        assert!(registry.del(&key, KeyScope::Palette));
        assert!(!registry.del(&key, KeyScope::Palette));
        assert_eq!(registry.binding_count(), 1);
    }

    #[test]
    fn test_defaults_resolve() {
        let registry = KeymapRegistry::with_defaults("cmd+k");

        let toggle = Keystroke::parse("ctrl+k").unwrap();
        assert_eq!(registry.resolve(&toggle, false), Some(action("toggle")));
        assert_eq!(registry.resolve(&toggle, true), Some(action("toggle")));

        let down = Keystroke::plain("down");
        assert_eq!(registry.resolve(&down, true), Some(action("cursor_down")));
        assert_eq!(registry.resolve(&down, false), None);
    }

    #[test]
    fn test_custom_toggle_and_bad_toggle() {
        let registry = KeymapRegistry::with_defaults("alt+space");
        let ks = Keystroke::parse("alt+space").unwrap();
        assert_eq!(registry.resolve(&ks, false), Some(action("toggle")));

        let registry = KeymapRegistry::with_defaults("nope+k");
        assert_eq!(registry.binding_count(), 8);
    }

    #[test]
    fn test_palette_scope_shadows_global() {
        let registry = KeymapRegistry::new();
        let key = Keystroke::parse("ctrl+n").unwrap();
        registry.set(PendingBinding {
            key: key.clone(),
            handler: KeyHandler::QuickAction {
                id: "create_contact".to_string(),
            },
            scope: KeyScope::Global,
        });
        registry.set(PendingBinding {
            key: key.clone(),
            handler: action("cursor_down"),
            scope: KeyScope::Palette,
        });

        assert_eq!(registry.resolve(&key, true), Some(action("cursor_down")));
        assert_eq!(
            registry.resolve(&key, false),
            Some(KeyHandler::QuickAction {
                id: "create_contact".to_string()
            })
        );
    }
}
