//! Directory navigation state.

use std::path::{Path, PathBuf};

use duopane_core::{
    DirectoryEntry, FileSystem, ListingConfig, NavigationError, absolutize, filter_entries,
    list_directory, parent_of,
};
use tracing::debug;

/// Result of entering the selected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entered {
    /// Navigated into a directory (or the parent link).
    Directory(PathBuf),
    /// The selection is a file; opening it is up to the caller.
    File(PathBuf),
    /// Nothing is selected.
    Nothing,
}

/// Current directory, its listing, the live filter and the selection.
///
/// `entries` is the unfiltered master list and is only replaced wholesale by
/// re-listing. The filtered view is derived from it on every filter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_dir: PathBuf,
    entries: Vec<DirectoryEntry>,
    filter_query: String,
    view: Vec<DirectoryEntry>,
    selected: Option<usize>,
    config: ListingConfig,
}

impl NavigationState {
    /// Create navigation state rooted at `dir`. A relative `dir` is taken
    /// against the working directory.
    pub fn new<F: FileSystem + ?Sized>(
        fs: &F,
        dir: impl Into<PathBuf>,
        config: ListingConfig,
    ) -> Result<Self, NavigationError> {
        let dir = absolutize(&dir.into());
        validate_directory(fs, &dir)?;

        let mut state = Self {
            current_dir: dir.clone(),
            entries: Vec::new(),
            filter_query: String::new(),
            view: Vec::new(),
            selected: None,
            config,
        };
        state.load(fs, dir);
        Ok(state)
    }

    /// Current directory.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Unfiltered listing of the current directory.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Entries visible under the current filter.
    pub fn visible_entries(&self) -> &[DirectoryEntry] {
        &self.view
    }

    /// Current filter query.
    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    /// Selected index into the visible entries.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selected entry, if any.
    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.selected.and_then(|i| self.view.get(i))
    }

    /// Listing configuration.
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Whether hidden entries are listed.
    pub fn show_hidden(&self) -> bool {
        self.config.show_hidden
    }

    /// Change to `dir`, re-listing it and clearing the filter.
    ///
    /// Fails without touching any state if `dir` is missing or not a
    /// directory.
    pub fn set_directory<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
        dir: &Path,
    ) -> Result<(), NavigationError> {
        let dir = absolutize(dir);
        validate_directory(fs, &dir)?;
        debug!(path = %dir.display(), "changed directory");
        self.load(fs, dir);
        Ok(())
    }

    /// Set the filter query and recompute the visible entries.
    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter_query = query.into();
        self.view = filter_entries(&self.entries, &self.filter_query);
        self.selected = match self.selected {
            _ if self.view.is_empty() => None,
            Some(i) => Some(i.min(self.view.len() - 1)),
            None => Some(0),
        };
    }

    /// Select an index, clamped to the visible entries.
    pub fn select_index(&mut self, index: usize) {
        if !self.view.is_empty() {
            self.selected = Some(index.min(self.view.len() - 1));
        }
    }

    /// Move the selection up by `count` entries.
    pub fn move_up(&mut self, count: usize) {
        if let Some(current) = self.selected {
            self.select_index(current.saturating_sub(count));
        }
    }

    /// Move the selection down by `count` entries.
    pub fn move_down(&mut self, count: usize) {
        match self.selected {
            Some(current) => self.select_index(current.saturating_add(count)),
            None => self.select_index(0),
        }
    }

    /// Move the selection by a signed offset.
    pub fn move_selection(&mut self, delta: isize) {
        if delta < 0 {
            self.move_up(delta.unsigned_abs());
        } else {
            self.move_down(delta.unsigned_abs());
        }
    }

    /// Select the first visible entry.
    pub fn select_first(&mut self) {
        self.select_index(0);
    }

    /// Select the last visible entry.
    pub fn select_last(&mut self) {
        self.select_index(usize::MAX);
    }

    /// Enter the selected entry.
    ///
    /// Directories and the parent link are navigated into. Files are
    /// returned as [`Entered::File`] without changing any state.
    pub fn enter_selection<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
    ) -> Result<Entered, NavigationError> {
        let Some(entry) = self.selected_entry() else {
            return Ok(Entered::Nothing);
        };

        if entry.is_parent_link || entry.is_dir {
            let target = entry.path.clone();
            self.set_directory(fs, &target)?;
            Ok(Entered::Directory(target))
        } else {
            Ok(Entered::File(entry.path.clone()))
        }
    }

    /// Navigate to the parent directory. At filesystem root this re-lists
    /// the root itself.
    pub fn go_to_parent<F: FileSystem + ?Sized>(&mut self, fs: &F) -> Result<(), NavigationError> {
        let parent = parent_of(&self.current_dir);
        self.set_directory(fs, &parent)
    }

    /// Flip hidden-entry visibility and re-list the current directory.
    ///
    /// Returns the new visibility. The flag is flipped even when the
    /// re-listing fails, so a fallback directory is listed with it.
    pub fn toggle_hidden<F: FileSystem + ?Sized>(
        &mut self,
        fs: &F,
    ) -> Result<bool, NavigationError> {
        let show_hidden = self.config.toggle_hidden();
        let dir = self.current_dir.clone();
        self.set_directory(fs, &dir)?;
        Ok(show_hidden)
    }

    /// Re-list the current directory, keeping the filter and clamping the
    /// selection.
    pub fn refresh<F: FileSystem + ?Sized>(&mut self, fs: &F) -> Result<(), NavigationError> {
        validate_directory(fs, &self.current_dir)?;
        self.entries = list_directory(fs, &self.current_dir, &self.config);
        let query = std::mem::take(&mut self.filter_query);
        self.set_filter(query);
        Ok(())
    }

    fn load<F: FileSystem + ?Sized>(&mut self, fs: &F, dir: PathBuf) {
        self.entries = list_directory(fs, &dir, &self.config);
        self.current_dir = dir;
        self.filter_query.clear();
        self.view = self.entries.clone();
        self.selected = if self.view.is_empty() { None } else { Some(0) };
    }
}

fn validate_directory<F: FileSystem + ?Sized>(fs: &F, dir: &Path) -> Result<(), NavigationError> {
    if !fs.exists(dir) {
        return Err(NavigationError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !fs.is_dir(dir) {
        return Err(NavigationError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use duopane_core::OsFileSystem;

    use super::*;

    fn fixture() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src").join("lib.rs"), "").unwrap();
        fs::write(temp.path().join("Cargo.toml"), "").unwrap();
        fs::write(temp.path().join("README.md"), "").unwrap();
        fs::write(temp.path().join(".gitignore"), "").unwrap();
        temp
    }

    #[test]
    fn test_new_selects_first_entry() {
        let temp = fixture();
        let nav = NavigationState::new(&OsFileSystem, temp.path(), ListingConfig::default()).unwrap();

        assert_eq!(nav.current_dir(), temp.path());
        assert_eq!(nav.entries().len(), 4);
        assert_eq!(nav.selected(), Some(0));
        assert!(nav.selected_entry().unwrap().is_parent_link);
    }

    #[test]
    fn test_new_rejects_missing_directory() {
        let temp = fixture();
        let missing = temp.path().join("nope");
        let err = NavigationState::new(&OsFileSystem, &missing, ListingConfig::default()).unwrap_err();
        assert_eq!(err, NavigationError::NotFound { path: missing });
    }

    #[test]
    fn test_set_directory_rejects_file_without_change() {
        let temp = fixture();
        let mut nav =
            NavigationState::new(&OsFileSystem, temp.path(), ListingConfig::default()).unwrap();
        nav.set_filter("read");
        let before = nav.clone();

        let err = nav
            .set_directory(&OsFileSystem, &temp.path().join("README.md"))
            .unwrap_err();
        assert!(matches!(err, NavigationError::NotADirectory { .. }));
        assert_eq!(nav, before);
    }

    #[test]
    fn test_filter_clamps_selection() {
        let temp = fixture();
        let mut nav =
            NavigationState::new(&OsFileSystem, temp.path(), ListingConfig::default()).unwrap();
        nav.select_last();
        assert_eq!(nav.selected(), Some(3));

        nav.set_filter("cargo");
        assert_eq!(nav.visible_entries().len(), 2);
        assert_eq!(nav.selected(), Some(1));
        assert_eq!(nav.selected_entry().unwrap().display_name, "Cargo.toml");

        // Master list is untouched by filtering
        assert_eq!(nav.entries().len(), 4);

        nav.set_filter("");
        assert_eq!(nav.visible_entries().len(), 4);
        assert_eq!(nav.selected(), Some(1));
    }

    #[test]
    fn test_selection_movement_is_clamped() {
        let temp = fixture();
        let mut nav =
            NavigationState::new(&OsFileSystem, temp.path(), ListingConfig::default()).unwrap();

        nav.move_up(5);
        assert_eq!(nav.selected(), Some(0));
        nav.move_down(2);
        assert_eq!(nav.selected(), Some(2));
        nav.move_down(100);
        assert_eq!(nav.selected(), Some(3));
        nav.select_index(42);
        assert_eq!(nav.selected(), Some(3));
        nav.select_first();
        assert_eq!(nav.selected(), Some(0));
        nav.move_selection(2);
        assert_eq!(nav.selected(), Some(2));
        nav.move_selection(-1);
        assert_eq!(nav.selected(), Some(1));
    }

    #[test]
    fn test_enter_directory_and_parent_link() {
        let temp = fixture();
        let mut nav =
            NavigationState::new(&OsFileSystem, temp.path(), ListingConfig::default()).unwrap();

        nav.set_filter("src");
        nav.select_index(1);
        let entered = nav.enter_selection(&OsFileSystem).unwrap();
        assert_eq!(entered, Entered::Directory(temp.path().join("src")));
        assert_eq!(nav.current_dir(), temp.path().join("src"));
        assert_eq!(nav.filter_query(), "");
        assert_eq!(nav.selected(), Some(0));

        // Selection 0 is the parent link
        let entered = nav.enter_selection(&OsFileSystem).unwrap();
        assert_eq!(entered, Entered::Directory(temp.path().to_path_buf()));
        assert_eq!(nav.current_dir(), temp.path());
    }

    #[test]
    fn test_enter_file_does_not_navigate() {
        let temp = fixture();
        let mut nav =
            NavigationState::new(&OsFileSystem, temp.path(), ListingConfig::default()).unwrap();
        nav.set_filter("readme");
        nav.select_index(1);

        let entered = nav.enter_selection(&OsFileSystem).unwrap();
        assert_eq!(entered, Entered::File(temp.path().join("README.md")));
        assert_eq!(nav.current_dir(), temp.path());
        assert_eq!(nav.filter_query(), "readme");
    }

    #[test]
    fn test_go_to_parent_at_root_stays() {
        let root = Path::new("/");
        let mut nav = NavigationState::new(&OsFileSystem, root, ListingConfig::default()).unwrap();
        nav.go_to_parent(&OsFileSystem).unwrap();
        assert_eq!(nav.current_dir(), root);
        assert_eq!(nav.entries()[0].path, root);
    }

    #[test]
    fn test_toggle_hidden_relists() {
        let temp = fixture();
        let mut nav =
            NavigationState::new(&OsFileSystem, temp.path(), ListingConfig::default()).unwrap();
        nav.set_filter("git");
        assert_eq!(nav.visible_entries().len(), 1);

        assert!(nav.toggle_hidden(&OsFileSystem).unwrap());
        assert!(nav.show_hidden());
        assert_eq!(nav.entries().len(), 5);
        assert_eq!(nav.filter_query(), "");

        assert!(!nav.toggle_hidden(&OsFileSystem).unwrap());
        assert_eq!(nav.entries().len(), 4);
    }

    #[test]
    fn test_refresh_keeps_filter() {
        let temp = fixture();
        let mut nav =
            NavigationState::new(&OsFileSystem, temp.path(), ListingConfig::default()).unwrap();
        nav.set_filter(".md");
        fs::write(temp.path().join("CHANGELOG.md"), "").unwrap();

        nav.refresh(&OsFileSystem).unwrap();
        assert_eq!(nav.filter_query(), ".md");
        assert_eq!(nav.visible_entries().len(), 3);
        assert_eq!(nav.entries().len(), 5);
    }
}
