//! Filesystem provider abstraction.
//!
//! Everything above this module talks to the disk through [`FileSystem`], so
//! the navigation and save logic can be exercised against fakes that simulate
//! permission failures or read-only targets.

use std::fs;
use std::path::{Path, PathBuf};

use crate::FsError;

/// A direct child of a directory as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    /// Absolute path of the child.
    pub path: PathBuf,
    /// File name of the child.
    pub name: String,
    /// Whether the child is a directory (symlinks are followed).
    pub is_dir: bool,
}

impl ChildEntry {
    /// Create a new child entry.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            is_dir,
        }
    }
}

/// Synchronous filesystem operations used by the explorer and editor.
pub trait FileSystem {
    /// List the direct children of a directory.
    fn list_children(&self, dir: &Path) -> Result<Vec<ChildEntry>, FsError>;

    /// Read a file's raw contents.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Write raw contents to a file, creating or truncating it.
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FsError>;

    /// Check whether a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether a path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn list_children(&self, dir: &Path) -> Result<Vec<ChildEntry>, FsError> {
        (**self).list_children(dir)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FsError> {
        (**self).write_file(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// Create a new OS filesystem provider.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn list_children(&self, dir: &Path) -> Result<Vec<ChildEntry>, FsError> {
        let read_dir = fs::read_dir(dir).map_err(|e| FsError::io(dir, e))?;

        let mut children = Vec::new();
        for entry in read_dir {
            // Entries that vanish mid-listing are skipped
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks; a broken link is listed as a file
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
            children.push(ChildEntry { path, name, is_dir });
        }

        Ok(children)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        fs::read(path).map_err(|e| FsError::io(path, e))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FsError> {
        fs::write(path, contents).map_err(|e| FsError::io(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_fs_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let fs = OsFileSystem::new();
        let file = temp.path().join("note.txt");

        fs.write_file(&file, b"hello").unwrap();
        assert_eq!(fs.read_file(&file).unwrap(), b"hello");
        assert!(fs.exists(&file));
        assert!(!fs.is_dir(&file));
        assert!(fs.is_dir(temp.path()));
    }

    #[test]
    fn test_os_fs_list_children() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("a.txt"), "a").unwrap();

        let mut children = OsFileSystem.list_children(temp.path()).unwrap();
        children.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "a.txt");
        assert!(!children[0].is_dir);
        assert_eq!(children[1].name, "sub");
        assert!(children[1].is_dir);
    }

    #[test]
    fn test_os_fs_missing_paths() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing");

        let err = OsFileSystem.list_children(&missing).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));

        let err = OsFileSystem.read_file(&missing).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));

        let err = OsFileSystem
            .write_file(&missing.join("nested.txt"), b"x")
            .unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
    }
}
