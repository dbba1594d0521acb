//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Directory navigation
    Enter,
    NavigateBack,
    ToggleHidden,
    Refresh,
    Filter,

    // Buffer
    EditBuffer,
    NewBuffer,
    Save,
    SaveAs,

    // Focus
    NextFocus,
    PrevFocus,

    // UI toggles
    ToggleHelp,
    ToggleTheme,

    Cancel,
    Quit,

    // No action
    None,
}

impl KeyAction {
    /// Keys that act the same whatever pane has focus.
    pub fn global(event: KeyEvent) -> Option<Self> {
        match (event.code, event.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(KeyAction::Save),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(KeyAction::Quit),
            (KeyCode::BackTab, _) => Some(KeyAction::PrevFocus),
            _ => None,
        }
    }

    /// Convert a key event in the explorer pane to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        if let Some(action) = Self::global(event) {
            return action;
        }

        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT | KeyModifiers::NONE) => {
                KeyAction::JumpToBottom
            }
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            // Directory navigation
            (KeyCode::Enter, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Enter,
            (KeyCode::Right, _) => KeyAction::Enter,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::NavigateBack,
            (KeyCode::Left, _) => KeyAction::NavigateBack,
            (KeyCode::Backspace, _) => KeyAction::NavigateBack,
            (KeyCode::Char('-'), KeyModifiers::NONE) => KeyAction::NavigateBack,
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::ToggleHidden,
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Refresh,
            (KeyCode::Char('/'), KeyModifiers::NONE) => KeyAction::Filter,

            // Buffer
            (KeyCode::Char('e'), KeyModifiers::NONE) => KeyAction::EditBuffer,
            (KeyCode::Char('i'), KeyModifiers::NONE) => KeyAction::EditBuffer,
            (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::NewBuffer,
            (KeyCode::Char('S'), KeyModifiers::SHIFT | KeyModifiers::NONE) => KeyAction::SaveAs,

            // Focus
            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::NextFocus,

            // UI toggles
            (KeyCode::Char('?'), _) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Explorer",
            bindings: vec![
                KeyBinding { keys: "j/k ↑/↓", description: "Move up/down" },
                KeyBinding { keys: "g/G", description: "Jump to top/bottom" },
                KeyBinding { keys: "Ctrl-u/d", description: "Page up/down" },
                KeyBinding { keys: "Enter/l", description: "Open file or directory" },
                KeyBinding { keys: "h/Bksp/-", description: "Parent directory" },
                KeyBinding { keys: "a", description: "Toggle hidden files" },
                KeyBinding { keys: "r", description: "Refresh listing" },
                KeyBinding { keys: "/", description: "Filter entries" },
            ],
        },
        HelpSection {
            title: "Buffer",
            bindings: vec![
                KeyBinding { keys: "e/i", description: "Edit buffer" },
                KeyBinding { keys: "n", description: "New buffer" },
                KeyBinding { keys: "Ctrl-s", description: "Save" },
                KeyBinding { keys: "S", description: "Save as" },
                KeyBinding { keys: "Esc", description: "Leave editor" },
            ],
        },
        HelpSection {
            title: "Unsaved Changes",
            bindings: vec![
                KeyBinding { keys: "s", description: "Save, then continue" },
                KeyBinding { keys: "d", description: "Discard, then continue" },
                KeyBinding { keys: "c/Esc", description: "Cancel" },
            ],
        },
        HelpSection {
            title: "General",
            bindings: vec![
                KeyBinding { keys: "Tab/S-Tab", description: "Switch pane" },
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}
