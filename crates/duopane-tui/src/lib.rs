//! Terminal user interface for duopane.
//!
//! A two-pane terminal file explorer: a filterable directory listing on the
//! left and a plain-text editor on the right, built with ratatui.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Run the TUI on a directory
//! duopane_tui::run(PathBuf::from("/path/to/explore")).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Enter`/`l` - Enter directory or open file
//! - `-`/`h`/`Backspace` - Parent directory
//! - `/` - Filter entries
//! - `a` - Toggle hidden files
//! - `e` - Edit the buffer, `Esc` to leave the editor
//! - `n` - New buffer
//! - `Ctrl+s` / `S` - Save / save as
//! - `?` - Help
//! - `q` / `Ctrl+c` - Quit

pub mod app;
mod event;
mod theme;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

pub use app::{App, AppResult};
pub use theme::Theme;

/// Startup options for the TUI.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Show hidden entries from the start, overriding saved settings.
    pub show_hidden: bool,
    /// Event loop tick period.
    pub tick_rate: Duration,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            tick_rate: Duration::from_millis(app::TICK_INTERVAL_MS),
        }
    }
}

impl TuiConfig {
    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }
}

/// Run the TUI application.
pub fn run(path: PathBuf) -> AppResult<()> {
    run_with_config(path, TuiConfig::default())
}

/// Run the TUI application with the given options.
pub fn run_with_config(path: PathBuf, config: TuiConfig) -> AppResult<()> {
    // Fail before touching the terminal if the start path is unusable
    let app = App::with_config(path, config)?;

    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    rt.shutdown_timeout(Duration::from_millis(100));

    result
}
