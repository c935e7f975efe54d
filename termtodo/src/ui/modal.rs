//! Modal dialogs drawn over the main screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{input, theme};
use crate::app::Modal;

/// Render `modal` centered over `area`.
pub fn render(frame: &mut Frame, area: Rect, modal: &Modal) {
    let (title, body) = match modal {
        Modal::ConfirmComplete { text, .. } => (
            "Complete task?",
            vec![
                Line::from(vec![
                    Span::raw("Mark \""),
                    Span::styled(text.clone(), theme::bold()),
                    Span::raw("\" as completed?"),
                ]),
                Line::raw(""),
                Line::from(Span::styled("[y] Yes    [n] No", theme::dimmed())),
            ],
        ),
        Modal::Edit { editor, .. } => (
            "Edit task",
            vec![
                input::editor_line(editor, true),
                Line::raw(""),
                Line::from(Span::styled("Enter: save | Esc: cancel", theme::dimmed())),
            ],
        ),
    };

    let popup = centered_rect(60, 7, area);
    let block = Block::default()
        .title(Span::styled(title, theme::highlighted()))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let paragraph = Paragraph::new(body)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
