//! Editor pane widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Widget};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;

/// Renders the buffer text with a line-number gutter and a block cursor.
pub struct EditorView<'a> {
    text: &'a str,
    /// Cursor line and display column.
    cursor: (usize, usize),
    /// First visible line.
    offset: usize,
    theme: &'a Theme,
    focused: bool,
    block: Option<Block<'a>>,
}

/// Take the part of `line` that falls in display columns
/// `[start, start + width)`.
fn slice_columns(line: &str, start: usize, width: usize) -> String {
    let mut col = 0;
    let mut out = String::new();
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if col >= start + width {
            break;
        }
        if col >= start && col + w <= start + width {
            out.push(c);
        }
        col += w;
    }
    out
}

impl<'a> EditorView<'a> {
    pub fn new(text: &'a str, cursor: (usize, usize), offset: usize, theme: &'a Theme) -> Self {
        Self {
            text,
            cursor,
            offset,
            theme,
            focused: false,
            block: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the block (border) for the widget.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for EditorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
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

        let lines: Vec<&str> = self.text.split('\n').collect();
        let gutter_width = lines.len().to_string().len() + 1;
        let text_width = (inner_area.width as usize).saturating_sub(gutter_width + 1);
        if text_width == 0 {
            return;
        }

        let (cursor_row, cursor_col) = self.cursor;
        let hscroll = (cursor_col + 1).saturating_sub(text_width);

        let viewport_height = inner_area.height as usize;
        let end = (self.offset + viewport_height).min(lines.len());

        for (row_idx, line_idx) in (self.offset..end).enumerate() {
            let y = inner_area.y + row_idx as u16;
            let number = format!("{:>width$} ", line_idx + 1, width = gutter_width);
            let content = slice_columns(lines[line_idx], hscroll, text_width);

            let line = Line::from(vec![
                Span::styled(number, self.theme.line_number),
                Span::styled(content, self.theme.file),
            ]);
            let line_area = Rect::new(inner_area.x, y, inner_area.width, 1);
            Widget::render(line, line_area, buf);
        }

        if self.focused && (self.offset..end).contains(&cursor_row) {
            let x = inner_area.x + (gutter_width + 1 + cursor_col - hscroll) as u16;
            let y = inner_area.y + (cursor_row - self.offset) as u16;
            if x < inner_area.right() {
                buf[(x, y)].set_style(self.theme.cursor);
            }
        }
    }
}
