//! Key bindings for list-view navigation.
//!
//! A [`Binding`] groups the key presses that trigger one action together
//! with the help text shown for it. Bindings are matched against
//! `bubbletea_rs::KeyMsg` so the controller can sit inside a bubbletea-rs
//! model and receive its messages directly.
//!
//! ```
//! use cuentas_listview::key::{Binding, KeyPress};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next = Binding::new(vec![KeyPress::from(KeyCode::Right), KeyPress::from('l')])
//!     .with_help("→/l", "página siguiente");
//!
//! let msg = KeyMsg { key: KeyCode::Char('l'), modifiers: KeyModifiers::NONE };
//! assert!(next.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<char> for KeyPress {
    fn from(c: char) -> Self {
        KeyCode::Char(c).into()
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"→/l"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for the given key presses.
    pub fn new(keys: Vec<KeyPress>) -> Self {
        Self {
            keys,
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text (builder pattern).
    #[must_use]
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// True unless the binding was disabled or has no keys.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Bound key presses.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// True if `msg` is one of this binding's key presses.
    ///
    /// Shift is ignored for character keys, since terminals already report
    /// the shifted character.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        let modifiers = match msg.key {
            KeyCode::Char(_) => msg.modifiers.difference(KeyModifiers::SHIFT),
            _ => msg.modifiers,
        };
        self.keys
            .iter()
            .any(|press| press.code == msg.key && press.modifiers == modifiers)
    }
}

/// Components that expose their bindings for help display.
pub trait KeyMap {
    /// Bindings for the compact one-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped in columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_modifiers_must_match() {
        let binding = Binding::new(vec![(KeyCode::Char('a'), KeyModifiers::CONTROL).into()]);
        assert!(binding.matches(&key(KeyCode::Char('a'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&key(KeyCode::Char('a'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_shift_ignored_for_chars() {
        let binding = Binding::new(vec!['G'.into()]);
        assert!(binding.matches(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = Binding::new(vec![KeyCode::Home.into()]).with_help("home", "inicio");
        binding.set_enabled(false);
        assert!(!binding.matches(&key(KeyCode::Home, KeyModifiers::NONE)));
        assert_eq!(binding.help().desc, "inicio");
    }
}
