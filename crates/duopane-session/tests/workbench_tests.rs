//! End-to-end tests for the workbench state machine.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use duopane_core::{ChildEntry, FileSystem, FsError, ListingConfig, OsFileSystem};
use duopane_session::{
    ConfirmChoice, Notification, PendingAction, PromptId, SessionState, Workbench,
};
use tempfile::TempDir;

/// Real filesystem that refuses every write.
struct ReadOnlyFs;

impl FileSystem for ReadOnlyFs {
    fn list_children(&self, dir: &Path) -> Result<Vec<ChildEntry>, FsError> {
        OsFileSystem.list_children(dir)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        OsFileSystem.read_file(path)
    }

    fn write_file(&self, path: &Path, _contents: &[u8]) -> Result<(), FsError> {
        Err(FsError::PermissionDenied {
            path: path.to_path_buf(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        OsFileSystem.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        OsFileSystem.is_dir(path)
    }
}

/// In-memory tree where only the listed directories exist. The set is
/// shared so a test can delete directories behind the workbench's back.
#[derive(Clone, Default)]
struct MemoryFs {
    dirs: Rc<RefCell<BTreeSet<PathBuf>>>,
    children: Rc<RefCell<Vec<(PathBuf, ChildEntry)>>>,
}

impl MemoryFs {
    fn add_dir(&self, path: &str, parent: Option<&str>) {
        let path = PathBuf::from(path);
        self.dirs.borrow_mut().insert(path.clone());
        if let Some(parent) = parent {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.children
                .borrow_mut()
                .push((PathBuf::from(parent), ChildEntry::new(path, name, true)));
        }
    }

    fn remove_dir(&self, path: &str) {
        self.dirs.borrow_mut().remove(Path::new(path));
    }
}

impl FileSystem for MemoryFs {
    fn list_children(&self, dir: &Path) -> Result<Vec<ChildEntry>, FsError> {
        Ok(self
            .children
            .borrow()
            .iter()
            .filter(|(parent, _)| parent == dir)
            .map(|(_, child)| child.clone())
            .collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        Err(FsError::NotFound {
            path: path.to_path_buf(),
        })
    }

    fn write_file(&self, path: &Path, _contents: &[u8]) -> Result<(), FsError> {
        Err(FsError::NotFound {
            path: path.to_path_buf(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }
}

fn project() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp.path().join("pkg").join("deep")).unwrap();
    fs::write(temp.path().join("main.py"), "print('main')\n").unwrap();
    fs::write(temp.path().join("other.py"), "print('other')\n").unwrap();
    temp
}

fn open_workbench(dir: &Path) -> Workbench {
    Workbench::new(OsFileSystem, dir, ListingConfig::default()).unwrap()
}

/// Drain notifications and return the prompt id of the last confirmation.
fn expect_prompt<F: FileSystem>(wb: &mut Workbench<F>) -> PromptId {
    wb.take_notifications()
        .into_iter()
        .rev()
        .find_map(|note| match note {
            Notification::ConfirmationNeeded(prompt) => Some(prompt),
            _ => None,
        })
        .expect("a confirmation prompt")
}

#[test]
fn discard_then_open_other_file() {
    let temp = project();
    let main = temp.path().join("main.py");
    let other = temp.path().join("other.py");
    let mut wb = open_workbench(temp.path());

    wb.request_open(main.clone());
    wb.edit_buffer("print('changed')\n");
    assert_eq!(wb.session().state(), SessionState::Dirty);
    wb.take_notifications();

    wb.request_open(other.clone());
    let prompt = expect_prompt(&mut wb);
    assert_eq!(wb.pending_action(), Some(&PendingAction::OpenFile(other.clone())));
    // Nothing happens until the prompt is answered
    assert_eq!(wb.session().path(), Some(main.as_path()));

    wb.resolve_confirmation(prompt, ConfirmChoice::Discard);
    assert_eq!(wb.session().path(), Some(other.as_path()));
    assert_eq!(wb.session().text(), "print('other')\n");
    assert_eq!(wb.session().syntax_label(), "python");
    assert!(!wb.session().is_dirty());
    assert_eq!(fs::read_to_string(&main).unwrap(), "print('main')\n");

    let notes = wb.take_notifications();
    assert!(notes.contains(&Notification::DirtyChanged(false)));
    assert_eq!(wb.pending_prompt(), None);
}

#[test]
fn new_buffer_saved_under_a_chosen_path() {
    let temp = project();
    let target = temp.path().join("x.txt");
    let mut wb = open_workbench(temp.path());

    wb.request_new_buffer();
    assert_eq!(wb.session().state(), SessionState::Empty);
    wb.edit_buffer("scratch");
    wb.request_save();
    assert!(wb.is_awaiting_save_path());
    assert!(wb.take_notifications().contains(&Notification::SavePathNeeded));

    wb.submit_save_path(Some(target.clone()));
    assert_eq!(fs::read_to_string(&target).unwrap(), "scratch");
    assert_eq!(wb.session().path(), Some(target.as_path()));
    assert_eq!(wb.session().state(), SessionState::Clean);
    assert!(
        wb.take_notifications()
            .contains(&Notification::SaveSucceeded(target))
    );
}

#[test]
fn save_as_binds_buffer_to_new_path() {
    let temp = project();
    let main = temp.path().join("main.py");
    let copy = temp.path().join("copy.py");
    let mut wb = open_workbench(temp.path());

    wb.request_open(main.clone());
    wb.edit_buffer("x = 1\n");
    wb.request_save_as(copy.clone());

    assert_eq!(fs::read_to_string(&copy).unwrap(), "x = 1\n");
    assert_eq!(fs::read_to_string(&main).unwrap(), "print('main')\n");
    assert_eq!(wb.session().path(), Some(copy.as_path()));
}

#[test]
fn quit_with_unsaved_new_buffer_saves_then_quits() {
    let temp = project();
    let target = temp.path().join("notes.md");
    let mut wb = open_workbench(temp.path());

    wb.edit_buffer("# notes\n");
    wb.request_quit();
    let prompt = expect_prompt(&mut wb);

    wb.resolve_confirmation(prompt, ConfirmChoice::Save);
    assert!(!wb.should_quit());
    assert!(wb.is_awaiting_save_path());
    assert!(wb.take_notifications().contains(&Notification::SavePathNeeded));

    wb.submit_save_path(Some(target.clone()));
    assert_eq!(fs::read_to_string(&target).unwrap(), "# notes\n");
    assert!(wb.should_quit());
}

#[test]
fn aborting_save_path_cancels_the_action() {
    let temp = project();
    let mut wb = open_workbench(temp.path());

    wb.edit_buffer("draft");
    wb.request_quit();
    let prompt = expect_prompt(&mut wb);
    wb.resolve_confirmation(prompt, ConfirmChoice::Save);
    wb.submit_save_path(None);

    assert!(!wb.should_quit());
    assert!(wb.session().is_dirty());
    assert_eq!(wb.session().text(), "draft");
    assert!(!wb.is_awaiting_save_path());
}

#[test]
fn cancel_leaves_everything_untouched() {
    let temp = project();
    let mut wb = open_workbench(temp.path());
    wb.request_open(temp.path().join("main.py"));
    wb.edit_buffer("changed");
    wb.set_filter("py");
    wb.select_index(1);

    let nav_before = wb.navigation().clone();
    let session_before = wb.session().clone();

    wb.request_open(temp.path().join("other.py"));
    let prompt = expect_prompt(&mut wb);
    wb.resolve_confirmation(prompt, ConfirmChoice::Cancel);

    assert_eq!(wb.navigation(), &nav_before);
    assert_eq!(wb.session(), &session_before);
    assert_eq!(wb.pending_prompt(), None);
    assert!(wb.take_notifications().is_empty());
}

#[test]
fn save_choice_writes_before_proceeding() {
    let temp = project();
    let main = temp.path().join("main.py");
    let other = temp.path().join("other.py");
    let mut wb = open_workbench(temp.path());

    wb.request_open(main.clone());
    wb.edit_buffer("saved = True\n");
    wb.request_open(other.clone());
    let prompt = expect_prompt(&mut wb);

    wb.resolve_confirmation(prompt, ConfirmChoice::Save);
    assert_eq!(fs::read_to_string(&main).unwrap(), "saved = True\n");
    assert_eq!(wb.session().path(), Some(other.as_path()));

    // The save is reported before the buffer is replaced
    let notes = wb.take_notifications();
    let saved = notes
        .iter()
        .position(|n| *n == Notification::SaveSucceeded(main.clone()))
        .unwrap();
    let replaced = notes
        .iter()
        .rposition(|n| *n == Notification::BufferChanged)
        .unwrap();
    assert!(saved < replaced);
}

#[test]
fn failed_save_is_treated_as_cancel() {
    let temp = project();
    let main = temp.path().join("main.py");
    let mut wb = Workbench::new(ReadOnlyFs, temp.path(), ListingConfig::default()).unwrap();

    wb.request_open(main.clone());
    wb.edit_buffer("lost?");
    wb.request_quit();
    let prompt = expect_prompt(&mut wb);

    wb.resolve_confirmation(prompt, ConfirmChoice::Save);
    assert!(!wb.should_quit());
    assert!(wb.session().is_dirty());
    assert_eq!(wb.session().text(), "lost?");
    assert_eq!(wb.pending_prompt(), None);

    let notes = wb.take_notifications();
    assert!(notes.iter().any(|n| matches!(
        n,
        Notification::SaveFailed { path: Some(path), .. } if *path == main
    )));
}

#[test]
fn failed_plain_save_keeps_buffer_dirty() {
    let temp = project();
    let mut wb = Workbench::new(ReadOnlyFs, temp.path(), ListingConfig::default()).unwrap();
    wb.request_open(temp.path().join("other.py"));
    wb.edit_buffer("nope");

    wb.request_save();
    assert!(wb.session().is_dirty());
    assert!(wb.take_notifications().iter().any(Notification::is_error));
}

#[test]
fn discarding_on_quit_resets_buffer() {
    let temp = project();
    let mut wb = open_workbench(temp.path());
    wb.request_open(temp.path().join("main.py"));
    wb.edit_buffer("gone");
    wb.request_quit();
    let prompt = expect_prompt(&mut wb);

    wb.resolve_confirmation(prompt, ConfirmChoice::Discard);
    assert!(wb.should_quit());
    assert_eq!(wb.session().state(), SessionState::Empty);
    assert!(wb.take_notifications().contains(&Notification::QuitApproved));
    assert_eq!(
        fs::read_to_string(temp.path().join("main.py")).unwrap(),
        "print('main')\n"
    );
}

#[test]
fn last_request_wins() {
    let temp = project();
    let mut wb = open_workbench(temp.path());
    wb.edit_buffer("dirty");

    wb.request_open(temp.path().join("main.py"));
    let first = expect_prompt(&mut wb);
    wb.request_new_buffer();
    let second = expect_prompt(&mut wb);
    assert_ne!(first, second);
    assert_eq!(wb.pending_action(), Some(&PendingAction::NewBuffer));

    // A stale answer does nothing
    wb.resolve_confirmation(first, ConfirmChoice::Discard);
    assert!(wb.session().is_dirty());
    assert_eq!(wb.pending_prompt(), Some(second));

    wb.resolve_confirmation(second, ConfirmChoice::Discard);
    assert_eq!(wb.session().state(), SessionState::Empty);
}

#[test]
fn navigation_is_never_gated() {
    let temp = project();
    let mut wb = open_workbench(temp.path());
    wb.edit_buffer("dirty");
    wb.request_quit();
    let prompt = expect_prompt(&mut wb);

    // Directory changes keep working while the prompt is open
    wb.set_filter("pkg");
    wb.select_index(1);
    wb.enter_selection();
    assert_eq!(wb.navigation().current_dir(), temp.path().join("pkg"));
    wb.go_to_parent();
    assert_eq!(wb.navigation().current_dir(), temp.path());
    assert_eq!(wb.session().text(), "dirty");

    wb.resolve_confirmation(prompt, ConfirmChoice::Discard);
    assert!(wb.should_quit());
}

#[test]
fn entering_a_file_while_dirty_asks_first() {
    let temp = project();
    let mut wb = open_workbench(temp.path());
    wb.edit_buffer("dirty");
    wb.set_filter("other");
    wb.select_index(1);
    wb.take_notifications();

    wb.enter_selection();
    let prompt = expect_prompt(&mut wb);
    assert_eq!(
        wb.pending_action(),
        Some(&PendingAction::OpenFile(temp.path().join("other.py")))
    );
    wb.resolve_confirmation(prompt, ConfirmChoice::Cancel);
    assert_eq!(wb.session().text(), "dirty");
}

#[test]
fn dirty_flag_is_monotonic() {
    let temp = project();
    let mut wb = open_workbench(temp.path());
    wb.request_open(temp.path().join("main.py"));

    wb.edit_buffer("print('main')\n");
    assert!(!wb.session().is_dirty());

    wb.edit_buffer("edited");
    wb.edit_buffer("print('main')\n");
    assert!(wb.session().is_dirty());
}

#[test]
fn saving_clean_buffer_is_idempotent() {
    let temp = project();
    let main = temp.path().join("main.py");
    let mut wb = open_workbench(temp.path());
    wb.request_open(main.clone());
    wb.edit_buffer("v2");
    wb.request_save();
    assert_eq!(fs::read_to_string(&main).unwrap(), "v2");

    // A second save of the clean buffer must not write again
    fs::write(&main, "external").unwrap();
    wb.request_save();
    assert_eq!(fs::read_to_string(&main).unwrap(), "external");
    assert!(!wb.session().is_dirty());
}

#[test]
fn deleted_directory_falls_back_to_ancestor() {
    let temp = project();
    let deep = temp.path().join("pkg").join("deep");
    let mut wb = open_workbench(&deep);
    wb.take_notifications();

    fs::remove_dir_all(temp.path().join("pkg")).unwrap();
    wb.refresh();

    assert_eq!(wb.navigation().current_dir(), temp.path());
    let notes = wb.take_notifications();
    assert!(matches!(
        &notes[0],
        Notification::NavigationFailed { path, .. } if *path == deep
    ));
    assert!(notes.contains(&Notification::DirectoryChanged(temp.path().to_path_buf())));
}

#[test]
fn toggle_hidden_on_deleted_directory_still_flips() {
    let temp = project();
    let pkg = temp.path().join("pkg");
    fs::write(temp.path().join(".env"), "").unwrap();
    let mut wb = open_workbench(&pkg);

    fs::remove_dir_all(&pkg).unwrap();
    wb.toggle_hidden();

    assert!(wb.navigation().show_hidden());
    assert_eq!(wb.navigation().current_dir(), temp.path());
    assert!(
        wb.navigation()
            .entries()
            .iter()
            .any(|e| e.display_name == ".env")
    );
}

#[test]
fn parent_of_root_is_root() {
    let mut wb = open_workbench(Path::new("/"));
    wb.go_to_parent();
    assert_eq!(wb.navigation().current_dir(), PathBuf::from("/"));
    assert!(
        !wb.take_notifications()
            .iter()
            .any(|n| matches!(n, Notification::DirectoryChanged(_)))
    );
}

#[test]
fn relative_start_directory_is_made_absolute() {
    let cwd = std::env::current_dir().unwrap();
    let parent = cwd.parent().unwrap().to_path_buf();
    let mut wb = open_workbench(Path::new("."));

    assert_eq!(wb.navigation().current_dir(), cwd);
    assert_eq!(wb.start_dir(), cwd);
    assert_eq!(wb.navigation().entries()[0].path, parent);

    wb.go_to_parent();
    assert_eq!(wb.navigation().current_dir(), parent);
    let notes = wb.take_notifications();
    assert!(!notes.iter().any(Notification::is_error));
    assert!(notes.contains(&Notification::DirectoryChanged(parent)));
}

#[test]
fn save_path_submitted_during_confirmation_is_ignored() {
    let temp = project();
    let mut wb = open_workbench(temp.path());
    wb.edit_buffer("dirty");
    wb.request_quit();
    let prompt = expect_prompt(&mut wb);

    wb.submit_save_path(Some(temp.path().join("x.txt")));

    assert_eq!(wb.pending_prompt(), Some(prompt));
    assert_eq!(wb.pending_action(), Some(&PendingAction::Quit));
    assert!(!temp.path().join("x.txt").exists());
    assert!(wb.take_notifications().is_empty());

    wb.resolve_confirmation(prompt, ConfirmChoice::Discard);
    assert!(wb.should_quit());
}

#[test]
fn stale_directory_without_live_ancestor_returns_to_start() {
    let fs = MemoryFs::default();
    fs.add_dir("/start", None);
    fs.add_dir("/far/away", Some("/start"));

    let mut wb = Workbench::new(fs.clone(), "/start", ListingConfig::default()).unwrap();
    wb.select_index(1);
    wb.enter_selection();
    assert_eq!(wb.navigation().current_dir(), Path::new("/far/away"));
    wb.take_notifications();

    // Neither /far nor / exist in this tree
    fs.remove_dir("/far/away");
    wb.refresh();

    assert_eq!(wb.navigation().current_dir(), Path::new("/start"));
    let notes = wb.take_notifications();
    assert!(matches!(
        &notes[0],
        Notification::NavigationFailed { path, .. } if path == Path::new("/far/away")
    ));
    assert!(notes.contains(&Notification::DirectoryChanged(PathBuf::from("/start"))));
}
