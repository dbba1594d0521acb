//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget};

use duopane_session::{EditSession, NavigationState, PendingAction};

use crate::theme::Theme;
use crate::ui::modals::{ConfirmUnsavedModal, InputModal, input_line};
use crate::ui::{
    AppLayout, EditorView, ExplorerState, ExplorerView, HelpOverlay, truncate_end, truncate_start,
};

use super::editor::EditorState;
use super::input::InputState;
use super::state::{AppMode, Focus, SavePrompt, StatusMessage};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub focus: Focus,
    pub theme: &'a Theme,
    pub navigation: &'a NavigationState,
    pub session: &'a EditSession,
    pub filter_input: &'a InputState,
    pub save_input: Option<&'a InputState>,
    pub save_prompt: SavePrompt,
    pub editor: &'a EditorState,
    pub status: Option<&'a StatusMessage>,
    pub pending_action: Option<&'a PendingAction>,
}

/// Main render function for the application.
pub fn render_app(
    ctx: &RenderContext,
    explorer_state: &mut ExplorerState,
    area: Rect,
    buf: &mut Buffer,
) {
    // Fill entire area with theme background color
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area);

    render_header(ctx, layout.header, buf);
    render_filter(ctx, layout.filter, buf);
    render_explorer(ctx, explorer_state, layout.explorer, buf);
    render_editor(ctx, layout.editor, buf);
    render_status(ctx, layout.status, buf);
    render_footer(ctx, layout.footer, buf);

    // Render overlays
    match ctx.mode {
        AppMode::Help => HelpOverlay::new(ctx.theme).render(area, buf),
        AppMode::ConfirmUnsaved => {
            let title = ctx.session.title();
            ConfirmUnsavedModal::new(ctx.theme, &title, ctx.pending_action).render(area, buf);
        }
        AppMode::SavePath => {
            if let Some(input) = ctx.save_input {
                let title = match ctx.save_prompt {
                    SavePrompt::SaveAs => "Save As",
                    SavePrompt::Gate => "Save Buffer",
                };
                InputModal::new(ctx.theme, input, title, "Enter file path:").render(area, buf);
            }
        }
        AppMode::Normal | AppMode::Quit => {}
    }
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![Span::styled(" duopane ", ctx.theme.title)];

    if ctx.navigation.show_hidden() {
        spans.push(Span::styled(
            " [hidden shown] ",
            Style::default().fg(ctx.theme.muted),
        ));
    }
    spans.push(Span::styled(
        format!(" {} ", ctx.focus),
        Style::default().fg(ctx.theme.info),
    ));

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.header)
        .render(area, buf);
}

fn render_filter(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let prompt = Span::styled(" / ", ctx.theme.input_prompt);
    let focused = ctx.mode == AppMode::Normal && ctx.focus == Focus::Filter;

    let line = if focused {
        let mut line = input_line(ctx.filter_input, (area.width as usize).saturating_sub(6), ctx.theme);
        line.spans.insert(0, prompt);
        line
    } else if ctx.navigation.filter_query().is_empty() {
        Line::from(vec![
            prompt,
            Span::styled("filter", Style::default().fg(ctx.theme.muted)),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(ctx.navigation.filter_query().to_string(), ctx.theme.input_text),
        ])
    };

    Paragraph::new(line).render(area, buf);
}

fn render_explorer(
    ctx: &RenderContext,
    state: &mut ExplorerState,
    area: Rect,
    buf: &mut Buffer,
) {
    let focused = ctx.focus != Focus::Editor;
    let visible = ctx.navigation.visible_entries();
    let title = if ctx.navigation.filter_query().is_empty() {
        format!(" {} ", visible.len().saturating_sub(1))
    } else {
        format!(
            " {}/{} ",
            visible.len().saturating_sub(1),
            ctx.navigation.entries().len().saturating_sub(1)
        )
    };

    let block = Block::default()
        .title(title)
        .title_style(ctx.theme.title)
        .borders(Borders::ALL)
        .border_style(ctx.theme.pane_border(focused));

    ExplorerView::new(visible, ctx.navigation.selected(), ctx.theme, focused)
        .block(block)
        .render(area, buf, state);
}

fn render_editor(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let focused = ctx.mode == AppMode::Normal && ctx.focus == Focus::Editor;
    let title_width = (area.width as usize).saturating_sub(6);
    let title = truncate_end(&ctx.session.title(), title_width);

    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(ctx.theme.title)
        .borders(Borders::ALL)
        .border_style(ctx.theme.pane_border(ctx.focus == Focus::Editor));

    let text = ctx.session.text();
    let (row, _) = ctx.editor.cursor();
    let cursor = (row, ctx.editor.cursor_display_col(text));

    EditorView::new(text, cursor, ctx.editor.offset, ctx.theme)
        .focused(focused)
        .block(block)
        .render(area, buf);
}

fn render_status(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let dirty = if ctx.session.is_dirty() {
        Span::styled(" ● ", ctx.theme.status.patch(ctx.theme.dirty))
    } else {
        Span::raw("   ")
    };

    let syntax = ctx.session.syntax_label();
    let syntax = if syntax.is_empty() {
        String::new()
    } else {
        format!("[{syntax}] ")
    };

    let message = ctx.status.map(|status| {
        let color = if status.is_error {
            ctx.theme.error
        } else {
            ctx.theme.success
        };
        Span::styled(format!(" {} ", status.text), Style::default().fg(color))
    });

    let message_width = message.as_ref().map(|m| m.width()).unwrap_or(0);
    let fixed = 3 + syntax.len() + message_width;
    let dir = ctx.navigation.current_dir().display().to_string();
    let dir = truncate_start(&dir, (area.width as usize).saturating_sub(fixed + 1));

    let mut spans = vec![dirty, Span::raw(syntax), Span::raw(dir), Span::raw(" ")];
    spans.extend(message);

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.status)
        .render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let keys: Vec<(&str, &str)> = match (ctx.mode, ctx.focus) {
        (AppMode::ConfirmUnsaved, _) => vec![("s", "Save"), ("d", "Discard"), ("c", "Cancel")],
        (AppMode::SavePath, _) => vec![("Enter", "Save"), ("Esc", "Cancel")],
        (_, Focus::Explorer) => vec![
            ("j/k", "Nav"),
            ("Enter", "Open"),
            ("-", "Up"),
            ("/", "Filter"),
            ("a", "Hidden"),
            ("n", "New"),
            ("^s", "Save"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        (_, Focus::Filter) => vec![("Enter", "Keep"), ("Esc", "Clear"), ("↑/↓", "Nav")],
        (_, Focus::Editor) => vec![("Esc", "Explorer"), ("^s", "Save"), ("S-Tab", "Switch")],
    };

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), ctx.theme.help_key),
                Span::styled(format!("{} ", desc), ctx.theme.help_desc),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.footer)
        .render(area, buf);
}
