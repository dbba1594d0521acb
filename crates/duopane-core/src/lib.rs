//! Core types and traits for duopane.
//!
//! This crate provides the leaf building blocks shared by the rest of the
//! workspace: directory entries, listing configuration, the filesystem
//! provider trait, the directory lister, the entry filter and the
//! extension-to-syntax-label lookup.

mod config;
mod content;
mod entry;
mod error;
mod filter;
mod fs;
mod listing;
mod syntax;

pub use config::{ListingConfig, ListingConfigBuilder};
pub use content::{BINARY_CHECK_BYTES, decode_text, read_placeholder};
pub use entry::{DirectoryEntry, PARENT_LINK_NAME};
pub use error::{FsError, NavigationError, SaveError};
pub use filter::filter_entries;
pub use fs::{ChildEntry, FileSystem, OsFileSystem};
pub use listing::{absolutize, compare_entries, list_directory, parent_of};
pub use syntax::syntax_label;
