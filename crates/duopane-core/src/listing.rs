//! Directory listing.

use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::{DirectoryEntry, FileSystem, ListingConfig};

/// Parent of a directory, or the directory itself at filesystem root.
pub fn parent_of(dir: &Path) -> PathBuf {
    dir.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf())
}

/// Make `dir` absolute against the working directory and fold away `.` and
/// `..` components, without touching the filesystem.
///
/// An empty path cannot be made absolute and comes back empty.
pub fn absolutize(dir: &Path) -> PathBuf {
    let Ok(absolute) = std::path::absolute(dir) else {
        return PathBuf::new();
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// List the direct children of `dir`.
///
/// The result always starts with the parent-link entry, followed by
/// directories and then files, each group in case-insensitive name order.
/// Hidden entries are dropped unless `config.show_hidden` is set.
///
/// Enumeration failures are not errors: a directory that cannot be read
/// (typically permission denied) is listed as empty.
pub fn list_directory<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    config: &ListingConfig,
) -> Vec<DirectoryEntry> {
    let children = match fs.list_children(dir) {
        Ok(children) => children,
        Err(e) if e.is_permission_denied() => {
            warn!(path = %dir.display(), "permission denied listing directory, showing it empty");
            Vec::new()
        }
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "failed to list directory, showing it empty");
            Vec::new()
        }
    };

    let mut children: Vec<DirectoryEntry> = children
        .into_iter()
        .filter(|child| !config.should_skip_hidden(&child.name))
        .map(|child| DirectoryEntry::child(child.path, &child.name, child.is_dir))
        .collect();

    children.sort_by(compare_entries);

    let mut entries = Vec::with_capacity(children.len() + 1);
    entries.push(DirectoryEntry::parent_link(dir));
    entries.extend(children);

    debug!(path = %dir.display(), count = entries.len() - 1, "listed directory");
    entries
}

/// Compare two entries by listing order: parent link first, then
/// directories, then case-insensitive name with the raw name breaking ties
/// so the order is total.
pub fn compare_entries(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    match (a.is_parent_link, b.is_parent_link) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => b
            .is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
            .then_with(|| a.name().cmp(b.name())),
    }
}
