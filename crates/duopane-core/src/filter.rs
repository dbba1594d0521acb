//! Live name filtering of a directory listing.

use crate::DirectoryEntry;

/// Derive the filtered view of `entries` for `query`.
///
/// The query is trimmed and matched case-insensitively as a substring of
/// each entry's display name. The parent link is always kept, and the
/// result preserves the relative order of `entries`.
pub fn filter_entries(entries: &[DirectoryEntry], query: &str) -> Vec<DirectoryEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|entry| {
            entry.is_parent_link || entry.display_name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
