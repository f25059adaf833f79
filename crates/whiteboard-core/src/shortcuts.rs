//! Keyboard shortcut registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Undo,
    Redo,
    Copy,
    Paste,
    Delete,
    /// Cancel the current edit, or clear the selection.
    Cancel,
    /// Finish the current text edit.
    CommitEdit,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Whether a key press with `modifiers` triggers this shortcut.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
    }
}

impl fmt::Display for Shortcut {
    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        f.write_str(self.key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, Command::Undo, "Undo"),
            Shortcut::new("Z", true, true, Command::Redo, "Redo"),
            Shortcut::new("Y", true, false, Command::Redo, "Redo"),
            Shortcut::new("C", true, false, Command::Copy, "Copy selected item"),
            Shortcut::new("V", true, false, Command::Paste, "Paste item"),
            Shortcut::new("Delete", false, false, Command::Delete, "Delete selected item"),
            Shortcut::new("Backspace", false, false, Command::Delete, "Delete selected item"),
            Shortcut::new("Escape", false, false, Command::Cancel, "Cancel edit or deselect"),
            Shortcut::new("Enter", false, false, Command::CommitEdit, "Finish editing text"),
        ]
    }

    /// Resolve a key press to a command.
    pub fn lookup(key: &str, modifiers: Modifiers) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.command)
    }

    /// Human-readable list of shortcuts, one per line.
    pub fn describe() -> String {
        Self::all()
            .iter()
            .map(|shortcut| format!("  {:20} {}", shortcut.to_string(), shortcut.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
