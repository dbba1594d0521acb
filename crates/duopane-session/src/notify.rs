//! Change notifications emitted by the [`Workbench`](crate::Workbench).

use std::path::PathBuf;

use crate::PromptId;

/// Something the presentation layer should react to.
///
/// Notifications are queued in the order the changes happened and drained
/// with [`Workbench::take_notifications`](crate::Workbench::take_notifications).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The current directory changed.
    DirectoryChanged(PathBuf),
    /// The visible entry list changed (re-listing or filtering).
    EntriesChanged,
    /// The selected index changed.
    SelectionChanged(Option<usize>),
    /// The buffer was replaced or its text changed.
    BufferChanged,
    /// The dirty flag flipped.
    DirtyChanged(bool),
    /// The buffer was saved to this path.
    SaveSucceeded(PathBuf),
    /// A save attempt failed.
    SaveFailed {
        path: Option<PathBuf>,
        reason: String,
    },
    /// An unsaved-changes prompt must be shown.
    ConfirmationNeeded(PromptId),
    /// A path for saving the buffer must be asked for.
    SavePathNeeded,
    /// A navigation request could not be carried out.
    NavigationFailed { path: PathBuf, reason: String },
    /// The application may exit.
    QuitApproved,
}

impl Notification {
    /// Short human-readable status text, if this notification has one.
    pub fn status_message(&self) -> Option<String> {
        match self {
            Self::SaveSucceeded(path) => Some(format!("Saved {}", path.display())),
            Self::SaveFailed { reason, .. } => Some(format!("Save failed: {reason}")),
            Self::NavigationFailed { reason, .. } => Some(reason.clone()),
            Self::ConfirmationNeeded(_) => Some("Unsaved changes".to_string()),
            _ => None,
        }
    }

    /// Whether this notification reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::SaveFailed { .. } | Self::NavigationFailed { .. })
    }
}
