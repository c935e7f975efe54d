//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Completed-task accent color.
pub const SUCCESS: Color = Color::Green;

/// Pending-task accent color.
pub const WARNING: Color = Color::Yellow;

/// Error message color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the weather card.
pub const WEATHER_TITLE: Color = Color::LightBlue;

/// Panel title color for the tasks panel.
pub const TASKS_TITLE: Color = Color::Green;

/// Panel title color for the input box.
pub const INPUT_TITLE: Color = Color::Cyan;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (timestamps, placeholders).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Completed task text (dim, struck through).
#[must_use]
pub fn completed() -> Style {
    Style::default()
        .fg(FG_SECONDARY)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Error message text.
#[must_use]
pub fn error_text() -> Style {
    Style::default().fg(ERROR)
}

/// Style for section headers with a given accent color.
#[must_use]
pub fn section_header(color: Color) -> Style {
    Style::default()
        .fg(color)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Border style for a panel depending on focus.
#[must_use]
pub fn border(focused: bool) -> Style {
    if focused { highlighted() } else { normal() }
}
