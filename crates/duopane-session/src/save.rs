//! Writing the edit buffer to disk.

use std::path::{Path, PathBuf};

use duopane_core::{FileSystem, SaveError};
use tracing::{debug, info, warn};

use crate::EditSession;

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The buffer was written to this path.
    Written(PathBuf),
    /// The buffer was already clean at this path; nothing was written.
    Unchanged(PathBuf),
}

impl SaveOutcome {
    /// Path the buffer is now bound to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Unchanged(path) => path,
        }
    }
}

/// Resolves save targets and writes the buffer.
pub struct SaveController;

impl SaveController {
    /// Resolve where a save should go: the explicit target, else the
    /// session's own path.
    pub fn resolve_target(
        session: &EditSession,
        target: Option<&Path>,
    ) -> Result<PathBuf, SaveError> {
        target
            .or(session.path())
            .map(Path::to_path_buf)
            .ok_or(SaveError::NoTargetPath)
    }

    /// Save the session.
    ///
    /// On success the session is bound to the target and clean. On failure
    /// the session is left exactly as it was.
    pub fn save<F: FileSystem + ?Sized>(
        fs: &F,
        session: &mut EditSession,
        target: Option<&Path>,
    ) -> Result<SaveOutcome, SaveError> {
        let target = Self::resolve_target(session, target)?;

        if !session.is_dirty() && session.path() == Some(target.as_path()) {
            debug!(path = %target.display(), "buffer already clean, skipping write");
            return Ok(SaveOutcome::Unchanged(target));
        }

        match fs.write_file(&target, session.text().as_bytes()) {
            Ok(()) => {
                info!(path = %target.display(), bytes = session.text().len(), "saved buffer");
                session.mark_saved(target.clone());
                Ok(SaveOutcome::Written(target))
            }
            Err(source) => {
                warn!(path = %target.display(), error = %source, "save failed");
                Err(SaveError::Write {
                    path: target,
                    source,
                })
            }
        }
    }
}
