//! Modal dialog widgets.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use duopane_session::PendingAction;

use crate::app::input::InputState;
use crate::theme::Theme;
use crate::ui::truncate_start;

/// Center a popup of the given size within `area`.
fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Describe what will happen once the prompt is resolved.
fn describe(action: Option<&PendingAction>, max_width: usize) -> String {
    match action {
        Some(PendingAction::OpenFile(path)) => {
            let path = path.display().to_string();
            truncate_start(&format!("before opening {path}"), max_width)
        }
        Some(PendingAction::NewBuffer) => "before starting a new buffer".into(),
        Some(PendingAction::Quit) => "before quitting".into(),
        None => String::new(),
    }
}

/// Save / discard / cancel prompt for a dirty buffer.
pub struct ConfirmUnsavedModal<'a> {
    theme: &'a Theme,
    buffer_title: &'a str,
    action: Option<&'a PendingAction>,
}

impl<'a> ConfirmUnsavedModal<'a> {
    pub fn new(theme: &'a Theme, buffer_title: &'a str, action: Option<&'a PendingAction>) -> Self {
        Self {
            theme,
            buffer_title,
            action,
        }
    }
}

impl Widget for ConfirmUnsavedModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = popup_rect(area, 56, 8);
        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Unsaved Changes ")
            .title_style(
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.warning));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let max_width = inner.width as usize;
        let lines = vec![
            Line::styled(
                truncate_start(&format!("{} has unsaved changes.", self.buffer_title), max_width),
                Style::default()
                    .fg(self.theme.warning)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format!("Save them {}?", describe(self.action, max_width.saturating_sub(12))),
                self.theme.help_desc,
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" s ", self.theme.help_key),
                Span::raw("Save  "),
                Span::styled(" d ", self.theme.help_key),
                Span::raw("Discard  "),
                Span::styled(" c/Esc ", self.theme.help_key),
                Span::raw("Cancel"),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Text input modal, used for the save-as path.
pub struct InputModal<'a> {
    theme: &'a Theme,
    input: &'a InputState,
    title: &'a str,
    prompt: &'a str,
}

impl<'a> InputModal<'a> {
    /// Create a new input modal.
    pub fn new(theme: &'a Theme, input: &'a InputState, title: &'a str, prompt: &'a str) -> Self {
        Self {
            theme,
            input,
            title,
            prompt,
        }
    }
}

impl Widget for InputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_height = if self.input.error().is_some() { 8 } else { 7 };
        let popup_area = popup_rect(area, 60, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(self.theme.info)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(self.theme.border);

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let mut lines = vec![
            Line::styled(self.prompt, self.theme.help_desc),
            Line::raw(""),
            input_line(self.input, (inner.width as usize).saturating_sub(4), self.theme),
        ];

        if let Some(error) = self.input.error() {
            lines.push(Line::styled(
                format!("  {}", error),
                Style::default().fg(self.theme.error),
            ));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter ", self.theme.help_key),
            Span::raw("Confirm  "),
            Span::styled(" Esc ", self.theme.help_key),
            Span::raw("Cancel"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Render an input buffer with a reversed-cell cursor, scrolled so the
/// cursor stays within `max_visible` characters.
pub fn input_line(input: &InputState, max_visible: usize, theme: &Theme) -> Line<'static> {
    let max_visible = max_visible.max(1);
    let cursor = input.cursor();
    let start = (cursor + 1).saturating_sub(max_visible);

    let visible: Vec<char> = input
        .buffer()
        .chars()
        .skip(start)
        .take(max_visible)
        .collect();
    let cursor_in_view = cursor - start;

    let before: String = visible.iter().take(cursor_in_view).collect();
    let at: String = visible
        .get(cursor_in_view)
        .map(|c| c.to_string())
        .unwrap_or_else(|| " ".to_string());
    let after: String = visible.iter().skip(cursor_in_view + 1).collect();

    Line::from(vec![
        Span::raw("  "),
        Span::styled(before, theme.input_text),
        Span::styled(at, theme.cursor),
        Span::styled(after, theme.input_text),
    ])
}
