//! Directory listing widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};

use duopane_core::DirectoryEntry;

use crate::theme::Theme;
use crate::ui::truncate_end;

/// Scroll state for the explorer list.
#[derive(Debug, Default, Clone)]
pub struct ExplorerState {
    /// First visible row.
    pub offset: usize,
}

impl ExplorerState {
    /// Ensure `selected` is visible, adjusting offset if needed.
    pub fn ensure_visible(&mut self, selected: Option<usize>, len: usize, viewport_height: usize) {
        let Some(selected) = selected else {
            self.offset = 0;
            return;
        };
        if viewport_height == 0 {
            return;
        }

        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + viewport_height {
            self.offset = selected - viewport_height + 1;
        }
        // Don't leave blank rows below the list after it shrinks
        self.offset = self.offset.min(len.saturating_sub(viewport_height));
    }
}

/// Explorer list widget over the visible entries.
pub struct ExplorerView<'a> {
    entries: &'a [DirectoryEntry],
    selected: Option<usize>,
    theme: &'a Theme,
    focused: bool,
    block: Option<Block<'a>>,
}

impl<'a> ExplorerView<'a> {
    pub fn new(
        entries: &'a [DirectoryEntry],
        selected: Option<usize>,
        theme: &'a Theme,
        focused: bool,
    ) -> Self {
        Self {
            entries,
            selected,
            theme,
            focused,
            block: None,
        }
    }

    /// Set the block (border) for the widget.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn entry_style(&self, entry: &DirectoryEntry) -> Style {
        if entry.is_parent_link {
            self.theme.parent_link
        } else if entry.is_dir {
            self.theme.directory
        } else {
            self.theme.file
        }
    }
}

impl StatefulWidget for ExplorerView<'_> {
    type State = ExplorerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        if self.entries.is_empty() {
            let line = Line::styled("  (empty)", Style::default().fg(self.theme.muted));
            Widget::render(line, inner_area, buf);
            return;
        }

        let viewport_height = inner_area.height as usize;
        state.ensure_visible(self.selected, self.entries.len(), viewport_height);

        let start = state.offset;
        let end = (start + viewport_height).min(self.entries.len());
        let name_width = (inner_area.width as usize).saturating_sub(2);

        for (row_idx, entry_idx) in (start..end).enumerate() {
            let entry = &self.entries[entry_idx];
            let y = inner_area.y + row_idx as u16;
            let is_selected = self.selected == Some(entry_idx);

            let marker = if is_selected { "› " } else { "  " };
            let name = truncate_end(&entry.display_name, name_width);
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(self.theme.info)),
                Span::styled(name, self.entry_style(entry)),
            ]);

            let line = match (is_selected, self.focused) {
                (true, true) => line.style(self.theme.selected),
                (true, false) => line.style(self.theme.selected_unfocused),
                _ => line,
            };

            let line_area = Rect::new(inner_area.x, y, inner_area.width, 1);
            Widget::render(line, line_area, buf);
        }
    }
}
