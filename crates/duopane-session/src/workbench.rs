//! The top-level state machine driven by the presentation layer.

use std::mem;
use std::path::{Path, PathBuf};

use duopane_core::{
    DirectoryEntry, FileSystem, ListingConfig, NavigationError, OsFileSystem, SaveError,
};
use tracing::{debug, info, warn};

use crate::{
    ConfirmChoice, EditSession, Entered, GateDecision, GateOutcome, NavigationState, Notification,
    PendingAction, PromptId, SaveController, UnsavedChangesGate,
};

/// Navigation state as seen before an intent, for change detection.
struct NavSnapshot {
    dir: PathBuf,
    view: Vec<DirectoryEntry>,
    selected: Option<usize>,
}

impl NavSnapshot {
    fn of(nav: &NavigationState) -> Self {
        Self {
            dir: nav.current_dir().to_path_buf(),
            view: nav.visible_entries().to_vec(),
            selected: nav.selected(),
        }
    }
}

/// Owns navigation, the edit session and the unsaved-changes gate.
///
/// Every method is an intent from the user. State changes are reported
/// through a queue of [`Notification`]s, drained with
/// [`take_notifications`](Self::take_notifications).
pub struct Workbench<F: FileSystem = OsFileSystem> {
    fs: F,
    start_dir: PathBuf,
    nav: NavigationState,
    session: EditSession,
    gate: UnsavedChangesGate,
    notifications: Vec<Notification>,
    quit: bool,
}

impl<F: FileSystem> Workbench<F> {
    /// Create a workbench rooted at `start_dir` with an empty buffer.
    pub fn new(
        fs: F,
        start_dir: impl Into<PathBuf>,
        config: ListingConfig,
    ) -> Result<Self, NavigationError> {
        let nav = NavigationState::new(&fs, start_dir, config)?;
        let start_dir = nav.current_dir().to_path_buf();
        info!(path = %start_dir.display(), "workbench started");

        Ok(Self {
            fs,
            start_dir,
            nav,
            session: EditSession::new_buffer(),
            gate: UnsavedChangesGate::new(),
            notifications: Vec::new(),
            quit: false,
        })
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Directory the workbench was started in.
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    /// Whether a quit was approved.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Open unsaved-changes prompt, if any.
    pub fn pending_prompt(&self) -> Option<PromptId> {
        self.gate.open_prompt()
    }

    /// Action waiting on a prompt, if any.
    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.gate.pending_action()
    }

    /// Whether a save path is being asked for.
    pub fn is_awaiting_save_path(&self) -> bool {
        self.gate.awaiting_save_path()
    }

    /// Drain queued notifications in the order they were raised.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    // ---- navigation intents (never gated) ----

    pub fn select_index(&mut self, index: usize) {
        self.navigate(|nav, _| {
            nav.select_index(index);
            Ok(())
        });
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.navigate(|nav, _| {
            nav.move_selection(delta);
            Ok(())
        });
    }

    pub fn select_first(&mut self) {
        self.navigate(|nav, _| {
            nav.select_first();
            Ok(())
        });
    }

    pub fn select_last(&mut self) {
        self.navigate(|nav, _| {
            nav.select_last();
            Ok(())
        });
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.navigate(|nav, _| {
            nav.set_filter(query);
            Ok(())
        });
    }

    /// Enter the selected entry. Selecting a file issues a gated open.
    pub fn enter_selection(&mut self) {
        let mut entered = Entered::Nothing;
        self.navigate(|nav, fs| {
            entered = nav.enter_selection(fs)?;
            Ok(())
        });

        if let Entered::File(path) = entered {
            self.request_open(path);
        }
    }

    pub fn go_to_parent(&mut self) {
        self.navigate(|nav, fs| nav.go_to_parent(fs));
    }

    pub fn toggle_hidden(&mut self) {
        self.navigate(|nav, fs| nav.toggle_hidden(fs).map(|_| ()));
    }

    pub fn refresh(&mut self) {
        self.navigate(|nav, fs| nav.refresh(fs));
    }

    // ---- buffer intents ----

    /// Replace the buffer text with `text`.
    pub fn edit_buffer(&mut self, text: impl Into<String>) {
        let was_dirty = self.session.is_dirty();
        if self.session.edit(text) {
            self.notifications.push(Notification::BufferChanged);
            if !was_dirty {
                self.notifications.push(Notification::DirtyChanged(true));
            }
        }
    }

    /// Open `path` in the editor, asking first if the buffer is dirty.
    pub fn request_open(&mut self, path: PathBuf) {
        self.guard(PendingAction::OpenFile(path));
    }

    /// Start a new buffer, asking first if the buffer is dirty.
    pub fn request_new_buffer(&mut self) {
        self.guard(PendingAction::NewBuffer);
    }

    /// Quit, asking first if the buffer is dirty.
    pub fn request_quit(&mut self) {
        self.guard(PendingAction::Quit);
    }

    /// Save the buffer to its own path, or ask for one if it has none.
    pub fn request_save(&mut self) {
        if self.session.path().is_none() {
            self.gate.request_save_path();
            self.notifications.push(Notification::SavePathNeeded);
            return;
        }
        self.save_to(None);
    }

    /// Save the buffer to `path` and bind it there.
    pub fn request_save_as(&mut self, path: PathBuf) {
        self.save_to(Some(&path));
    }

    /// Answer the unsaved-changes prompt `prompt`.
    ///
    /// Answers for a prompt that is no longer open are ignored.
    pub fn resolve_confirmation(&mut self, prompt: PromptId, choice: ConfirmChoice) {
        let has_path = self.session.path().is_some();
        match self.gate.resolve(prompt, choice, has_path) {
            Some(decision) => self.apply(decision),
            None => debug!(prompt = prompt.0, %choice, "no open prompt to resolve"),
        }
    }

    /// Answer the save-path prompt. `None` aborts it.
    pub fn submit_save_path(&mut self, path: Option<PathBuf>) {
        match self.gate.submit_save_path(path) {
            Some(decision) => self.apply(decision),
            None => debug!("no save path was requested"),
        }
    }

    // ---- internals ----

    fn navigate(
        &mut self,
        op: impl FnOnce(&mut NavigationState, &F) -> Result<(), NavigationError>,
    ) {
        let before = NavSnapshot::of(&self.nav);
        if let Err(err) = op(&mut self.nav, &self.fs) {
            self.recover(err);
        }
        self.emit_navigation_changes(before);
    }

    /// Report a failed navigation. If the current directory itself has gone
    /// away, move to the nearest ancestor that still exists.
    fn recover(&mut self, err: NavigationError) {
        warn!(error = %err, "navigation failed");

        if !self.fs.is_dir(self.nav.current_dir()) {
            let fallback = self
                .nav
                .current_dir()
                .ancestors()
                .skip(1)
                .find(|dir| self.fs.is_dir(dir))
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.start_dir.clone());

            match self.nav.set_directory(&self.fs, &fallback) {
                Ok(()) => info!(path = %fallback.display(), "fell back from stale directory"),
                Err(e) => warn!(error = %e, "fallback directory unavailable"),
            }
        }

        self.notifications.push(Notification::NavigationFailed {
            path: err.path().clone(),
            reason: err.to_string(),
        });
    }

    fn emit_navigation_changes(&mut self, before: NavSnapshot) {
        if before.dir != self.nav.current_dir() {
            self.notifications.push(Notification::DirectoryChanged(
                self.nav.current_dir().to_path_buf(),
            ));
        }
        if before.view != self.nav.visible_entries() {
            self.notifications.push(Notification::EntriesChanged);
        }
        if before.selected != self.nav.selected() {
            self.notifications
                .push(Notification::SelectionChanged(self.nav.selected()));
        }
    }

    fn guard(&mut self, action: PendingAction) {
        match self.gate.guard(self.session.is_dirty(), action) {
            GateOutcome::Proceed(action) => self.perform(action),
            GateOutcome::Awaiting(prompt) => {
                self.notifications
                    .push(Notification::ConfirmationNeeded(prompt));
            }
        }
    }

    fn apply(&mut self, decision: GateDecision) {
        match decision {
            GateDecision::Proceed(action) => self.perform(action),
            GateDecision::SaveThenProceed(action) => {
                if self.save_to(None) {
                    self.perform(action);
                }
            }
            GateDecision::SaveAsThenProceed { path, action } => {
                if self.save_to(Some(&path)) {
                    if let Some(action) = action {
                        self.perform(action);
                    }
                }
            }
            GateDecision::NeedsSavePath => {
                self.notifications.push(Notification::SavePathNeeded);
            }
            GateDecision::Aborted => debug!("gated action aborted"),
        }
    }

    fn perform(&mut self, action: PendingAction) {
        debug!(?action, "performing action");
        match action {
            PendingAction::OpenFile(path) => {
                let session = EditSession::open(&self.fs, path);
                self.replace_session(session);
            }
            PendingAction::NewBuffer => self.replace_session(EditSession::new_buffer()),
            PendingAction::Quit => {
                // Still dirty here only if the changes were discarded
                if self.session.is_dirty() {
                    self.replace_session(EditSession::new_buffer());
                }
                self.quit = true;
                self.notifications.push(Notification::QuitApproved);
            }
        }
    }

    fn replace_session(&mut self, session: EditSession) {
        let was_dirty = self.session.is_dirty();
        self.session = session;
        self.notifications.push(Notification::BufferChanged);
        if was_dirty != self.session.is_dirty() {
            self.notifications
                .push(Notification::DirtyChanged(self.session.is_dirty()));
        }
    }

    /// Save and report the result. Returns whether the save succeeded.
    fn save_to(&mut self, target: Option<&Path>) -> bool {
        let was_dirty = self.session.is_dirty();
        let old_path = self.session.path().map(Path::to_path_buf);

        match SaveController::save(&self.fs, &mut self.session, target) {
            Ok(outcome) => {
                if old_path.as_deref() != Some(outcome.path()) {
                    self.notifications.push(Notification::BufferChanged);
                }
                if was_dirty {
                    self.notifications.push(Notification::DirtyChanged(false));
                }
                self.notifications
                    .push(Notification::SaveSucceeded(outcome.path().to_path_buf()));
                true
            }
            Err(err) => {
                let path = match &err {
                    SaveError::Write { path, .. } => Some(path.clone()),
                    SaveError::NoTargetPath => None,
                };
                self.notifications.push(Notification::SaveFailed {
                    path,
                    reason: err.to_string(),
                });
                false
            }
        }
    }
}
