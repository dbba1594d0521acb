//! Main application state and logic.

mod constants;
pub mod editor;
pub mod input;
mod render;
pub mod state;

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::WrapErr;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, warn};

use duopane_core::{ListingConfig, OsFileSystem};
use duopane_session::{ConfirmChoice, Notification, Workbench};

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::theme::Theme;
use crate::ui::{AppLayout, ExplorerState};

pub use self::constants::TICK_INTERVAL_MS;
use self::constants::PAGE_SIZE;
use self::editor::{EditorResult, EditorState};
use self::input::{InputResult, InputState};
use self::render::{RenderContext, render_app};
use self::state::{AppMode, Focus, SavePrompt, StatusMessage, UserSettings};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App {
    /// Navigation, buffer and unsaved-changes protocol.
    workbench: Workbench<OsFileSystem>,
    /// Current mode.
    mode: AppMode,
    /// Pane receiving keys in normal mode.
    focus: Focus,
    /// Color theme.
    theme: Theme,
    /// Persisted settings.
    settings: UserSettings,
    /// Filter line contents.
    filter_input: InputState,
    /// Save path prompt, while open.
    save_input: Option<InputState>,
    /// Why the save path prompt is open.
    save_prompt: SavePrompt,
    /// Editor cursor and scroll.
    editor: EditorState,
    /// Explorer scroll.
    explorer_state: ExplorerState,
    /// Last status bar message.
    status: Option<StatusMessage>,
    /// Event loop tick period.
    tick_rate: Duration,
    /// Whether the UI needs to be redrawn.
    needs_redraw: bool,
}

impl App {
    /// Create a new application rooted at `path` with default options.
    pub fn new(path: PathBuf) -> AppResult<Self> {
        Self::with_config(path, TuiConfig::default())
    }

    /// Create a new application with the given options.
    ///
    /// When `path` is a file, the explorer starts in its directory and the
    /// file is opened in the editor.
    pub fn with_config(path: PathBuf, config: TuiConfig) -> AppResult<Self> {
        Self::with_settings(path, config, UserSettings::load())
    }

    fn with_settings(path: PathBuf, config: TuiConfig, settings: UserSettings) -> AppResult<Self> {
        let path = path
            .canonicalize()
            .wrap_err_with(|| format!("Invalid path: {}", path.display()))?;

        let (start_dir, open) = if path.is_file() {
            let dir = path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, Some(path))
        } else {
            (path, None)
        };

        let listing = ListingConfig::new(config.show_hidden || settings.show_hidden);
        let workbench = Workbench::new(OsFileSystem, &start_dir, listing)
            .wrap_err_with(|| format!("Cannot open {}", start_dir.display()))?;

        let mut app = Self {
            workbench,
            mode: AppMode::Normal,
            focus: Focus::Explorer,
            theme: Theme::from_variant(settings.theme),
            editor: EditorState::new(settings.tab_size),
            settings,
            filter_input: InputState::new(),
            save_input: None,
            save_prompt: SavePrompt::default(),
            explorer_state: ExplorerState::default(),
            status: None,
            tick_rate: config.tick_rate,
            needs_redraw: true,
        };

        if let Some(file) = open {
            app.workbench.request_open(file);
            app.focus = Focus::Editor;
            app.process_notifications();
        }

        Ok(app)
    }

    /// Run the application main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let mut interval = tokio::time::interval(self.tick_rate);
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    self.handle_event(event);

                    // Drain any additional pending events
                    while self.mode != AppMode::Quit && crossterm::event::poll(Duration::ZERO)? {
                        let event = crossterm::event::read()?;
                        self.handle_event(event);
                    }
                }

                _ = interval.tick() => {}
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::new(area);
        self.editor
            .ensure_visible(layout.editor.height.saturating_sub(2) as usize);

        let ctx = RenderContext {
            mode: self.mode,
            focus: self.focus,
            theme: &self.theme,
            navigation: self.workbench.navigation(),
            session: self.workbench.session(),
            filter_input: &self.filter_input,
            save_input: self.save_input.as_ref(),
            save_prompt: self.save_prompt,
            editor: &self.editor,
            status: self.status.as_ref(),
            pending_action: self.workbench.pending_action(),
        };

        render_app(&ctx, &mut self.explorer_state, area, frame.buffer_mut());
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(..) => self.needs_redraw = true,
            _ => {}
        }
    }

    /// Route a key press according to the current mode and focus.
    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Help => {
                if matches!(
                    KeyAction::from_key_event(key),
                    KeyAction::ToggleHelp | KeyAction::Cancel | KeyAction::Quit
                ) {
                    self.mode = AppMode::Normal;
                }
            }
            AppMode::ConfirmUnsaved => self.handle_confirm_key(key),
            AppMode::SavePath => self.handle_save_path_key(key),
            AppMode::Normal => match self.focus {
                Focus::Explorer => self.handle_action(KeyAction::from_key_event(key)),
                Focus::Filter => self.handle_filter_key(key),
                Focus::Editor => self.handle_editor_key(key),
            },
            AppMode::Quit => {}
        }

        self.process_notifications();
        self.needs_redraw = true;
    }

    /// Handle an explorer action.
    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveUp => self.workbench.move_selection(-1),
            KeyAction::MoveDown => self.workbench.move_selection(1),
            KeyAction::PageUp => self.workbench.move_selection(-(PAGE_SIZE as isize)),
            KeyAction::PageDown => self.workbench.move_selection(PAGE_SIZE as isize),
            KeyAction::JumpToTop => self.workbench.select_first(),
            KeyAction::JumpToBottom => self.workbench.select_last(),
            KeyAction::Enter => self.workbench.enter_selection(),
            KeyAction::NavigateBack => self.workbench.go_to_parent(),
            KeyAction::ToggleHidden => {
                self.workbench.toggle_hidden();
                let message = if self.workbench.navigation().show_hidden() {
                    "Showing hidden files"
                } else {
                    "Hiding hidden files"
                };
                self.status = Some(StatusMessage::info(message));
            }
            KeyAction::Refresh => {
                self.workbench.refresh();
                self.status = Some(StatusMessage::info("Refreshed"));
            }
            KeyAction::Filter => {
                self.filter_input = InputState::with_initial(self.workbench.navigation().filter_query());
                self.focus = Focus::Filter;
            }
            KeyAction::EditBuffer => self.focus = Focus::Editor,
            KeyAction::NewBuffer => self.workbench.request_new_buffer(),
            KeyAction::Save => self.workbench.request_save(),
            KeyAction::SaveAs => self.open_save_prompt(SavePrompt::SaveAs),
            KeyAction::NextFocus => self.focus = self.focus.next(),
            KeyAction::PrevFocus => self.focus = self.focus.prev(),
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::ToggleTheme => self.toggle_theme(),
            KeyAction::Cancel => {
                if !self.workbench.navigation().filter_query().is_empty() {
                    self.workbench.set_filter("");
                    self.filter_input = InputState::new();
                }
                self.status = None;
            }
            KeyAction::Quit => self.workbench.request_quit(),
            KeyAction::None => {}
        }
    }

    /// Keys for the filter line. Every edit re-filters the listing.
    fn handle_filter_key(&mut self, key: KeyEvent) {
        if let Some(action) = KeyAction::global(key) {
            self.handle_action(action);
            return;
        }

        match key.code {
            KeyCode::Up => return self.workbench.move_selection(-1),
            KeyCode::Down => return self.workbench.move_selection(1),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            _ => {}
        }

        let before = self.filter_input.buffer().to_string();
        match self.filter_input.handle_key(key) {
            InputResult::Submit(_) => self.focus = Focus::Explorer,
            InputResult::Cancel => {
                self.filter_input = InputState::new();
                self.workbench.set_filter("");
                self.focus = Focus::Explorer;
            }
            InputResult::Continue => {
                if self.filter_input.buffer() != before {
                    self.workbench.set_filter(self.filter_input.buffer());
                }
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        if let Some(action) = KeyAction::global(key) {
            self.handle_action(action);
            return;
        }

        match self.editor.handle_key(self.workbench.session().text(), key) {
            EditorResult::Edited(text) => self.workbench.edit_buffer(text),
            EditorResult::Exit => self.focus = Focus::Explorer,
            EditorResult::Continue => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.workbench.pending_prompt() else {
            self.mode = AppMode::Normal;
            return;
        };

        let choice = match (key.code, key.modifiers) {
            (KeyCode::Char('s') | KeyCode::Char('y'), KeyModifiers::NONE) => ConfirmChoice::Save,
            (KeyCode::Char('d') | KeyCode::Char('n'), KeyModifiers::NONE) => {
                ConfirmChoice::Discard
            }
            (KeyCode::Char('c'), KeyModifiers::NONE) | (KeyCode::Esc, _) => ConfirmChoice::Cancel,
            _ => return,
        };

        debug!(?prompt, %choice, "resolving unsaved-changes prompt");
        self.mode = AppMode::Normal;
        self.workbench.resolve_confirmation(prompt, choice);
    }

    fn handle_save_path_key(&mut self, key: KeyEvent) {
        let Some(input) = self.save_input.as_mut() else {
            self.mode = AppMode::Normal;
            return;
        };

        match input.handle_key(key) {
            InputResult::Continue => {}
            InputResult::Cancel => {
                self.close_save_prompt();
                if self.save_prompt == SavePrompt::Gate {
                    self.workbench.submit_save_path(None);
                }
            }
            InputResult::Submit(_) => {
                let base = self.workbench.navigation().current_dir().to_path_buf();
                match input.resolve_save_path(&base) {
                    Ok(path) => {
                        self.close_save_prompt();
                        match self.save_prompt {
                            SavePrompt::SaveAs => self.workbench.request_save_as(path),
                            SavePrompt::Gate => self.workbench.submit_save_path(Some(path)),
                        }
                    }
                    Err(message) => input.set_error(message),
                }
            }
        }
    }

    fn open_save_prompt(&mut self, purpose: SavePrompt) {
        let initial = self
            .workbench
            .session()
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.save_input = Some(InputState::with_initial(&initial));
        self.save_prompt = purpose;
        self.mode = AppMode::SavePath;
    }

    fn close_save_prompt(&mut self) {
        self.save_input = None;
        self.mode = AppMode::Normal;
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.settings.theme = self.theme.variant;
        if let Err(e) = self.settings.save() {
            warn!(error = %e, "failed to save settings");
        }
    }

    /// React to everything the workbench reported since the last call.
    fn process_notifications(&mut self) {
        let notes = self.workbench.take_notifications();
        if notes.is_empty() {
            return;
        }

        // A buffer change after the last save is a new buffer, not a rebind
        let last_save = notes
            .iter()
            .rposition(|n| matches!(n, Notification::SaveSucceeded(_)));
        let last_change = notes
            .iter()
            .rposition(|n| matches!(n, Notification::BufferChanged));
        let replaced = match (last_change, last_save) {
            (Some(change), Some(save)) => change > save,
            (Some(_), None) => !self.workbench.session().is_dirty(),
            _ => false,
        };

        for note in &notes {
            match note {
                Notification::ConfirmationNeeded(_) => {
                    self.save_input = None;
                    self.mode = AppMode::ConfirmUnsaved;
                }
                Notification::SavePathNeeded => self.open_save_prompt(SavePrompt::Gate),
                Notification::DirectoryChanged(_) => {
                    self.filter_input = InputState::new();
                    self.explorer_state = ExplorerState::default();
                }
                Notification::QuitApproved => self.mode = AppMode::Quit,
                _ => {}
            }

            if let Some(text) = note.status_message() {
                self.status = Some(if note.is_error() {
                    StatusMessage::error(text)
                } else {
                    StatusMessage::info(text)
                });
            }
        }

        if replaced {
            self.editor.reset();
        } else {
            self.editor.clamp(self.workbench.session().text());
        }

        // A superseded or resolved prompt must not stay on screen
        if self.mode == AppMode::ConfirmUnsaved && self.workbench.pending_prompt().is_none() {
            self.mode = AppMode::Normal;
        }
    }
}
