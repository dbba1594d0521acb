//! UI components and widgets.

mod editor;
mod explorer;
mod help;
pub mod modals;

pub use editor::EditorView;
pub use explorer::{ExplorerState, ExplorerView};
pub use help::HelpOverlay;

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// Share of the body width given to the explorer pane.
const EXPLORER_PERCENT: u16 = 40;

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub filter: Rect,
    pub explorer: Rect,
    pub editor: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect) -> Self {
        // Vertical split: header, body, status bar, footer
        let [header, body, status, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let [left, editor] = Layout::horizontal([
            Constraint::Percentage(EXPLORER_PERCENT),
            Constraint::Percentage(100 - EXPLORER_PERCENT),
        ])
        .areas(body);

        let [filter, explorer] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(left);

        Self {
            header,
            filter,
            explorer,
            editor,
            status,
            footer,
        }
    }
}

/// Truncate `text` from the left to fit `max_width` columns, marking the cut
/// with an ellipsis.
pub fn truncate_start(text: &str, max_width: usize) -> String {
    let width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut kept = Vec::new();
    let mut used = 1; // ellipsis
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        kept.push(c);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

/// Truncate `text` from the right to fit `max_width` columns.
pub fn truncate_end(text: &str, max_width: usize) -> String {
    let width: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 1;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
