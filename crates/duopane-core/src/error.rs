//! Error types for filesystem, navigation and save operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a [`FileSystem`](crate::FileSystem) provider.
#[derive(Debug, Error)]
pub enum FsError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// The path the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::PermissionDenied { path } | Self::NotFound { path } | Self::Io { path, .. } => {
                path
            }
        }
    }

    /// Check if this is a permission failure.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Errors raised when changing the current directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Target does not exist (for example, it was removed).
    #[error("Directory not found: {path}")]
    NotFound { path: PathBuf },

    /// Target exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl NavigationError {
    /// The path navigation was attempted to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path } | Self::NotADirectory { path } => path,
        }
    }
}

/// Errors raised when saving the edit buffer.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The buffer has no path and no target was supplied.
    #[error("No target path for save")]
    NoTargetPath,

    /// Writing the buffer failed.
    #[error("Failed to save {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: FsError,
    },
}
