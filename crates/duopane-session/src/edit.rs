//! The open edit buffer.

use std::path::{Path, PathBuf};

use duopane_core::{FileSystem, decode_text, read_placeholder, syntax_label};
use strum::Display;
use tracing::{debug, warn};

/// Lifecycle state of an [`EditSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionState {
    /// New buffer without a path and without changes.
    Empty,
    /// Buffer matches what was last loaded or saved.
    Clean,
    /// Buffer has changes that were not written.
    Dirty,
}

/// The single buffer open in the editor pane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditSession {
    path: Option<PathBuf>,
    text: String,
    dirty: bool,
}

impl EditSession {
    /// Start a new, unsaved, empty buffer.
    pub fn new_buffer() -> Self {
        Self::default()
    }

    /// Open a file into a clean buffer.
    ///
    /// Unreadable or binary files do not fail: the buffer holds a
    /// diagnostic placeholder instead and stays editable.
    pub fn open<F: FileSystem + ?Sized>(fs: &F, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let text = match fs.read_file(&path) {
            Ok(bytes) => decode_text(&path, &bytes),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file");
                read_placeholder(&e)
            }
        };

        debug!(path = %path.display(), len = text.len(), "opened buffer");
        Self {
            path: Some(path),
            text,
            dirty: false,
        }
    }

    /// Path the buffer is bound to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current buffer text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the buffer has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        match (self.dirty, &self.path) {
            (true, _) => SessionState::Dirty,
            (false, Some(_)) => SessionState::Clean,
            (false, None) => SessionState::Empty,
        }
    }

    /// Syntax label for the bound path (empty for new buffers).
    pub fn syntax_label(&self) -> &'static str {
        self.path.as_deref().map(syntax_label).unwrap_or("")
    }

    /// Short name for display: the file name, or a marker for new buffers.
    pub fn title(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[new buffer]".to_string())
    }

    /// Replace the buffer text.
    ///
    /// Any change marks the buffer dirty; the flag then stays set until a
    /// successful save. Returns `true` if the text changed.
    pub fn edit(&mut self, new_text: impl Into<String>) -> bool {
        let new_text = new_text.into();
        if new_text == self.text {
            return false;
        }

        self.text = new_text;
        if !self.dirty {
            debug!(path = ?self.path, "buffer became dirty");
            self.dirty = true;
        }
        true
    }

    /// Record a successful write of the buffer to `path`.
    pub(crate) fn mark_saved(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.dirty = false;
    }
}
