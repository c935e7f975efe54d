//! Terminal UI rendering.

pub mod input;
pub mod modal;
pub mod status_bar;
pub mod task_panel;
pub mod theme;
pub mod weather_card;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    text::Span,
    widgets::Paragraph,
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(4), // Weather
            Constraint::Length(3), // Input
            Constraint::Min(3),    // Tasks
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new(Span::styled("To-Do List", theme::bold()))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    weather_card::render(frame, chunks[1], app);
    input::render(frame, chunks[2], app);
    task_panel::render(frame, chunks[3], app);
    status_bar::render(frame, chunks[4], app);

    if let Some(modal) = &app.modal {
        modal::render(frame, frame.area(), modal);
    }
}
