//! Keyboard command surface.
//!
//! Hosts pass every key press through [`resolve`]; presses that happen while
//! focus is in a text field never produce a command.

use crate::input::Modifiers;
use crate::zorder::Direction;
use serde::{Deserialize, Serialize};

/// An editor command reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "command", content = "direction", rename_all = "camelCase")]
pub enum Command {
    DeleteSelection,
    Undo,
    Redo,
    Group,
    Ungroup,
    Reorder(Direction),
    Copy,
    Paste,
    SelectAll,
}

/// A key press as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInput {
    /// Key name: a character such as `"z"` or `"]"`, or a named key such as
    /// `"Delete"`.
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Focus is inside a text input or textarea.
    #[serde(default)]
    pub in_text_input: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            in_text_input: false,
        }
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl (Cmd on macOS) must be held.
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, shift: bool, command: Command, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: &Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == modifiers.command() && self.shift == modifiers.shift
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("Delete", false, false, Command::DeleteSelection, "Delete selected layers"),
    Shortcut::new("Backspace", false, false, Command::DeleteSelection, "Delete selected layers"),
    Shortcut::new("Z", true, false, Command::Undo, "Undo"),
    Shortcut::new("Z", true, true, Command::Redo, "Redo"),
    Shortcut::new("Y", true, false, Command::Redo, "Redo"),
    Shortcut::new("G", true, false, Command::Group, "Group selected layers"),
    Shortcut::new("G", true, true, Command::Ungroup, "Ungroup selected group"),
    Shortcut::new("]", true, true, Command::Reorder(Direction::Front), "Bring to front"),
    Shortcut::new("[", true, true, Command::Reorder(Direction::Back), "Send to back"),
    Shortcut::new("]", false, true, Command::Reorder(Direction::Forward), "Bring forward"),
    Shortcut::new("[", false, true, Command::Reorder(Direction::Backward), "Send backward"),
    Shortcut::new("C", true, false, Command::Copy, "Copy layer"),
    Shortcut::new("V", true, false, Command::Paste, "Paste layer"),
    Shortcut::new("A", true, false, Command::SelectAll, "Select all layers"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Find the shortcut bound to a key press.
    pub fn lookup(key: &str, modifiers: &Modifiers) -> Option<&'static Shortcut> {
        SHORTCUTS.iter().find(|shortcut| shortcut.matches(key, modifiers))
    }
}

/// Keyboards report the shifted bracket characters when Shift is held.
fn normalize_key(key: &str) -> &str {
    match key {
        "}" => "]",
        "{" => "[",
        other => other,
    }
}

/// Map a key press to a command.
pub fn resolve(input: &KeyInput) -> Option<Command> {
    if input.in_text_input {
        return None;
    }
    ShortcutRegistry::lookup(normalize_key(&input.key), &input.modifiers).map(|shortcut| shortcut.command)
}
