//! Cursor state for the editor pane.
//!
//! The buffer text itself lives in the session; the editor only tracks the
//! cursor and scroll position and turns key presses into replacement text.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

use super::constants::PAGE_SIZE;

/// Result of handling a key in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorResult {
    /// Cursor moved or key ignored.
    Continue,
    /// The text changed to this value.
    Edited(String),
    /// Leave the editor.
    Exit,
}

/// Cursor and viewport over the session text.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Cursor line.
    row: usize,
    /// Cursor column, in characters.
    col: usize,
    /// First visible line.
    pub offset: usize,
    /// Spaces inserted for Tab.
    tab_size: usize,
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

impl EditorState {
    pub fn new(tab_size: usize) -> Self {
        Self {
            tab_size: tab_size.max(1),
            ..Default::default()
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Move the cursor back to the start of the buffer.
    pub fn reset(&mut self) {
        self.row = 0;
        self.col = 0;
        self.offset = 0;
    }

    /// Clamp the cursor to the bounds of `text`.
    pub fn clamp(&mut self, text: &str) {
        let lines = split_lines(text);
        self.row = self.row.min(lines.len() - 1);
        self.col = self.col.min(char_len(&lines[self.row]));
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_display_col(&self, text: &str) -> usize {
        text.split('\n')
            .nth(self.row)
            .map(|line| {
                line.chars()
                    .take(self.col)
                    .map(|c| c.width().unwrap_or(0))
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Ensure the cursor line is visible, adjusting offset if needed.
    pub fn ensure_visible(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.row < self.offset {
            self.offset = self.row;
        } else if self.row >= self.offset + viewport_height {
            self.offset = self.row - viewport_height + 1;
        }
    }

    /// Handle a key event against the current text.
    pub fn handle_key(&mut self, text: &str, key: KeyEvent) -> EditorResult {
        let mut lines = split_lines(text);
        self.row = self.row.min(lines.len() - 1);
        self.col = self.col.min(char_len(&lines[self.row]));

        let edited = match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => return EditorResult::Exit,

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let line = &mut lines[self.row];
                let at = byte_index(line, self.col);
                line.insert(at, c);
                self.col += 1;
                true
            }

            (KeyCode::Tab, _) => {
                let line = &mut lines[self.row];
                let at = byte_index(line, self.col);
                line.insert_str(at, &" ".repeat(self.tab_size));
                self.col += self.tab_size;
                true
            }

            (KeyCode::Enter, _) => {
                let line = &mut lines[self.row];
                let at = byte_index(line, self.col);
                let rest = line.split_off(at);
                lines.insert(self.row + 1, rest);
                self.row += 1;
                self.col = 0;
                true
            }

            (KeyCode::Backspace, _) => {
                if self.col > 0 {
                    let line = &mut lines[self.row];
                    let at = byte_index(line, self.col - 1);
                    line.remove(at);
                    self.col -= 1;
                    true
                } else if self.row > 0 {
                    let current = lines.remove(self.row);
                    self.row -= 1;
                    self.col = char_len(&lines[self.row]);
                    lines[self.row].push_str(&current);
                    true
                } else {
                    false
                }
            }

            (KeyCode::Delete, _) => {
                if self.col < char_len(&lines[self.row]) {
                    let line = &mut lines[self.row];
                    let at = byte_index(line, self.col);
                    line.remove(at);
                    true
                } else if self.row + 1 < lines.len() {
                    let next = lines.remove(self.row + 1);
                    lines[self.row].push_str(&next);
                    true
                } else {
                    false
                }
            }

            (KeyCode::Left, _) => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = char_len(&lines[self.row]);
                }
                false
            }

            (KeyCode::Right, _) => {
                if self.col < char_len(&lines[self.row]) {
                    self.col += 1;
                } else if self.row + 1 < lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                false
            }

            (KeyCode::Up, _) => {
                self.move_rows(&lines, -1);
                false
            }
            (KeyCode::Down, _) => {
                self.move_rows(&lines, 1);
                false
            }
            (KeyCode::PageUp, _) => {
                self.move_rows(&lines, -(PAGE_SIZE as isize));
                false
            }
            (KeyCode::PageDown, _) => {
                self.move_rows(&lines, PAGE_SIZE as isize);
                false
            }

            (KeyCode::Home, _) => {
                self.col = 0;
                false
            }
            (KeyCode::End, _) => {
                self.col = char_len(&lines[self.row]);
                false
            }

            _ => false,
        };

        if edited {
            EditorResult::Edited(lines.join("\n"))
        } else {
            EditorResult::Continue
        }
    }

    fn move_rows(&mut self, lines: &[String], delta: isize) {
        self.row = self
            .row
            .saturating_add_signed(delta)
            .min(lines.len().saturating_sub(1));
        self.col = self.col.min(char_len(&lines[self.row]));
    }
}
