//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Modal, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match (&app.modal, app.focus) {
        (Some(Modal::ConfirmComplete { .. }), _) => "y/Enter: complete | n/Esc: cancel",
        (Some(Modal::Edit { .. }), _) => {
            "Enter: save | Esc: cancel | \u{2190}\u{2192}: move cursor"
        }
        (None, PanelFocus::Input) => "Enter: add | Tab: switch panel | Esc: quit",
        (None, PanelFocus::Tasks) => {
            "\u{2191}\u{2193}/jk: select | c: complete | e: edit | d: delete | Tab: switch panel | Esc: quit"
        }
    };

    let partition = app.store().partition();
    let counts = format!(
        "{} pending \u{b7} {} done",
        partition.pending.len(),
        partition.completed.len()
    );

    let status_line = Line::from(vec![
        Span::styled(concat!("termtodo v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::styled(counts, theme::normal()),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
