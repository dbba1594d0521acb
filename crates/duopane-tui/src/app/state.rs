//! Application state types and enums.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoEnumIterator};

use crate::theme::ThemeVariant;

use super::constants::DEFAULT_TAB_SIZE;

/// Application mode representing the current UI state.
///
/// Modal modes (`ConfirmUnsaved`, `SavePath`) capture all keys until they
/// are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Help,
    /// Asking whether to save, discard or cancel.
    ConfirmUnsaved,
    /// Asking for a path to save the buffer to.
    SavePath,
    Quit,
}

/// Why the save path prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePrompt {
    /// Explicit save-as; submitting rebinds the buffer.
    #[default]
    SaveAs,
    /// A save (possibly on behalf of a gated action) needs a target.
    Gate,
}

/// Pane that receives keys in normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, FromRepr)]
pub enum Focus {
    #[default]
    Explorer,
    Filter,
    Editor,
}

impl Focus {
    /// Move to next focus target (cyclic).
    pub fn next(self) -> Self {
        let current = self as usize;
        let next = (current + 1) % Self::iter().count();
        Self::from_repr(next).unwrap_or_default()
    }

    /// Move to previous focus target (cyclic).
    pub fn prev(self) -> Self {
        let current = self as usize;
        let count = Self::iter().count();
        let prev = (current + count - 1) % count;
        Self::from_repr(prev).unwrap_or_default()
    }
}

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Persistent user settings stored in config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Show hidden files by default.
    pub show_hidden: bool,
    /// Color theme.
    pub theme: ThemeVariant,
    /// Spaces inserted by Tab in the editor.
    pub tab_size: usize,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            show_hidden: false,
            theme: ThemeVariant::Dark,
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("duopane").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from a specific file. Missing or malformed files yield
    /// defaults.
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;
        self.save_to(&path)
    }

    /// Save settings to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Explorer.next(), Focus::Filter);
        assert_eq!(Focus::Editor.next(), Focus::Explorer);
        assert_eq!(Focus::Explorer.prev(), Focus::Editor);
        for focus in Focus::iter() {
            assert_eq!(focus.next().prev(), focus);
        }
    }

    #[test]
    fn test_settings_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("settings.toml");
        let settings = UserSettings {
            show_hidden: true,
            theme: ThemeVariant::Light,
            tab_size: 2,
        };

        settings.save_to(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("theme = \"light\""));
        assert_eq!(UserSettings::load_from(&path), settings);
    }

    #[test]
    fn test_settings_fallback_to_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing.toml");
        assert_eq!(UserSettings::load_from(&missing), UserSettings::default());

        let malformed = temp.path().join("bad.toml");
        std::fs::write(&malformed, "show_hidden = [").unwrap();
        assert_eq!(UserSettings::load_from(&malformed), UserSettings::default());

        // Missing keys take their defaults
        let partial = temp.path().join("partial.toml");
        std::fs::write(&partial, "tab_size = 8\n").unwrap();
        let loaded = UserSettings::load_from(&partial);
        assert_eq!(loaded.tab_size, 8);
        assert_eq!(loaded.theme, ThemeVariant::Dark);
    }
}
