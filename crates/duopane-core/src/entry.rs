//! Directory entry type.

use std::path::{Path, PathBuf};

use compact_str::{CompactString, format_compact};
use serde::{Deserialize, Serialize};

/// Display name of the synthetic parent-link entry.
pub const PARENT_LINK_NAME: &str = "..";

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Absolute path of the entry. For the parent link this is the parent
    /// directory, or the listed directory itself at filesystem root.
    pub path: PathBuf,
    /// Name shown in the listing (directories carry a trailing separator).
    pub display_name: CompactString,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Whether this is the synthetic ".." entry.
    pub is_parent_link: bool,
}

impl DirectoryEntry {
    /// Create the parent-link entry for a directory.
    pub fn parent_link(dir: &Path) -> Self {
        Self {
            path: crate::parent_of(dir),
            display_name: CompactString::from(PARENT_LINK_NAME),
            is_dir: true,
            is_parent_link: true,
        }
    }

    /// Create a regular child entry.
    pub fn child(path: impl Into<PathBuf>, name: &str, is_dir: bool) -> Self {
        let display_name = if is_dir {
            format_compact!("{name}{}", std::path::MAIN_SEPARATOR)
        } else {
            CompactString::from(name)
        };

        Self {
            path: path.into(),
            display_name,
            is_dir,
            is_parent_link: false,
        }
    }

    /// Base name without the directory separator marker.
    pub fn name(&self) -> &str {
        if self.is_dir && !self.is_parent_link {
            self.display_name
                .strip_suffix(std::path::MAIN_SEPARATOR)
                .unwrap_or(self.display_name.as_str())
        } else {
            self.display_name.as_str()
        }
    }

    /// Check if this is a regular file entry.
    pub fn is_file(&self) -> bool {
        !self.is_dir && !self.is_parent_link
    }
}
