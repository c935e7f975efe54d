//! New-task input box.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, LineEditor, PanelFocus};

/// Render the input box.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Input && app.modal.is_none();

    let input_line = if app.input.text().is_empty() && !is_focused {
        Line::from(Span::styled("Add a new task...", theme::dimmed()))
    } else {
        editor_line(&app.input, is_focused)
    };

    let block = Block::default()
        .title(Span::styled(
            "New task",
            theme::panel_title(theme::INPUT_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    frame.render_widget(Paragraph::new(input_line).block(block), area);
}

/// Editor contents with a block cursor drawn at the cursor position.
pub(super) fn editor_line(editor: &LineEditor, show_cursor: bool) -> Line<'static> {
    if !show_cursor {
        return Line::from(Span::styled(editor.text().to_string(), theme::normal()));
    }
    let before: String = editor.text().chars().take(editor.cursor()).collect();
    let after: String = editor.text().chars().skip(editor.cursor()).collect();
    Line::from(vec![
        Span::styled(before, theme::normal()),
        Span::styled("\u{2588}", theme::input_cursor()),
        Span::styled(after, theme::normal()),
    ])
}
