//! Single-line text input used by the filter line and the save-as prompt.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// State for a single-line text input.
///
/// The cursor is a character index, so multi-byte input edits cleanly.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    error: Option<String>,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input state with an initial value and the cursor at the end.
    pub fn with_initial(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.chars().count(),
            error: None,
        }
    }

    /// Get the current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Get the cursor position (in characters).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the current error message (if any).
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set an error message.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Clear the error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn len_chars(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        self.clear_error();

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => InputResult::Submit(self.buffer.clone()),

            (KeyCode::Esc, _) => InputResult::Cancel,

            // Delete character before cursor
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                InputResult::Continue
            }

            // Delete character at cursor
            (KeyCode::Delete, _) => {
                if self.cursor < self.len_chars() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                InputResult::Continue
            }

            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                InputResult::Continue
            }

            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len_chars());
                InputResult::Continue
            }

            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                InputResult::Continue
            }

            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.len_chars();
                InputResult::Continue
            }

            // Clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.buffer.clear();
                self.cursor = 0;
                InputResult::Continue
            }

            // Delete from cursor to end
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                let at = self.byte_index(self.cursor);
                self.buffer.truncate(at);
                InputResult::Continue
            }

            // Delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor > 0 {
                    let end = self.byte_index(self.cursor);
                    let word_start = self.buffer[..end]
                        .trim_end()
                        .char_indices()
                        .rev()
                        .find(|&(_, c)| c.is_whitespace() || c == MAIN_SEPARATOR)
                        .map(|(i, c)| i + c.len_utf8())
                        .unwrap_or(0);
                    self.buffer.replace_range(word_start..end, "");
                    self.cursor = self.buffer[..word_start].chars().count();
                }
                InputResult::Continue
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                InputResult::Continue
            }

            _ => InputResult::Continue,
        }
    }

    /// Resolve the buffer as a file path to save to.
    ///
    /// Relative paths are taken relative to `base`, and a leading `~` expands
    /// to the home directory.
    pub fn resolve_save_path(&self, base: &Path) -> Result<PathBuf, String> {
        let raw = self.buffer.trim();

        if raw.is_empty() {
            return Err("Path cannot be empty".into());
        }
        if raw.contains('\0') {
            return Err("Path cannot contain null character".into());
        }
        if raw.ends_with(MAIN_SEPARATOR) {
            return Err("Path must name a file, not a directory".into());
        }

        let expanded = match raw.strip_prefix('~') {
            Some(rest) if rest.is_empty() || rest.starts_with(MAIN_SEPARATOR) => {
                let home = dirs::home_dir().ok_or("No home directory")?;
                home.join(rest.trim_start_matches(MAIN_SEPARATOR))
            }
            _ => PathBuf::from(raw),
        };

        let path = if expanded.is_absolute() {
            expanded
        } else {
            base.join(expanded)
        };

        if path.is_dir() {
            return Err(format!("{} is a directory", path.display()));
        }
        Ok(path)
    }
}

/// Result of handling input.
#[derive(Debug, Clone)]
pub enum InputResult {
    /// Continue accepting input.
    Continue,
    /// User cancelled the input.
    Cancel,
    /// User submitted the input with this value.
    Submit(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(input: &mut InputState, text: &str) {
        for c in text.chars() {
            input.handle_key(key_event(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn test_input_basic() {
        let mut input = InputState::new();
        type_str(&mut input, "test");

        assert_eq!(input.buffer(), "test");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_input_backspace() {
        let mut input = InputState::with_initial("test");

        input.handle_key(key_event(KeyCode::Backspace, KeyModifiers::NONE));

        assert_eq!(input.buffer(), "tes");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_input_multibyte() {
        let mut input = InputState::with_initial("héllo");
        input.handle_key(key_event(KeyCode::Home, KeyModifiers::NONE));
        input.handle_key(key_event(KeyCode::Right, KeyModifiers::NONE));
        input.handle_key(key_event(KeyCode::Delete, KeyModifiers::NONE));
        assert_eq!(input.buffer(), "hllo");

        type_str(&mut input, "ä");
        assert_eq!(input.buffer(), "hällo");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_input_cursor_movement() {
        let mut input = InputState::with_initial("test");

        input.handle_key(key_event(KeyCode::Home, KeyModifiers::NONE));
        assert_eq!(input.cursor(), 0);

        input.handle_key(key_event(KeyCode::End, KeyModifiers::NONE));
        assert_eq!(input.cursor(), 4);

        input.handle_key(key_event(KeyCode::Left, KeyModifiers::NONE));
        assert_eq!(input.cursor(), 3);

        input.handle_key(key_event(KeyCode::Right, KeyModifiers::NONE));
        input.handle_key(key_event(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_delete_word() {
        let mut input = InputState::with_initial("/tmp/notes.txt");
        input.handle_key(key_event(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(input.buffer(), "/tmp/");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_delete_word_after_wide_space() {
        let mut input = InputState::with_initial("メモ\u{3000}下書き");
        input.handle_key(key_event(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(input.buffer(), "メモ\u{3000}");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_resolve_save_path() {
        let temp = tempfile::tempdir().unwrap();

        let input = InputState::with_initial("notes.txt");
        assert_eq!(
            input.resolve_save_path(temp.path()).unwrap(),
            temp.path().join("notes.txt")
        );

        let absolute = temp.path().join("abs.txt");
        let input = InputState::with_initial(&absolute.to_string_lossy());
        assert_eq!(input.resolve_save_path(Path::new("/elsewhere")).unwrap(), absolute);

        assert!(InputState::new().resolve_save_path(temp.path()).is_err());
        assert!(InputState::with_initial("dir/").resolve_save_path(temp.path()).is_err());

        std::fs::create_dir(temp.path().join("sub")).unwrap();
        assert!(InputState::with_initial("sub").resolve_save_path(temp.path()).is_err());
    }

    #[test]
    fn test_submit_and_cancel() {
        let mut input = InputState::with_initial("test");

        let result = input.handle_key(key_event(KeyCode::Enter, KeyModifiers::NONE));
        assert!(matches!(result, InputResult::Submit(s) if s == "test"));

        let result = input.handle_key(key_event(KeyCode::Esc, KeyModifiers::NONE));
        assert!(matches!(result, InputResult::Cancel));
    }
}
