//! Weather card rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme;
use crate::app::App;
use crate::weather::WeatherState;

/// Render the weather card for the current [`WeatherState`].
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let lines = match &app.weather {
        WeatherState::Loading => vec![Line::from(Span::styled(
            "Loading weather...",
            theme::dimmed(),
        ))],
        WeatherState::Ready(snapshot) => vec![
            Line::from(vec![
                Span::raw(format!("{} ", snapshot.icon_glyph())),
                Span::styled(snapshot.city.as_str(), theme::bold()),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("{}{}", snapshot.rounded_temperature(), app.temperature_suffix),
                    theme::normal(),
                ),
                Span::raw("  "),
                Span::styled(snapshot.description.as_str(), theme::dimmed()),
            ]),
        ],
        WeatherState::Unavailable(message) => vec![Line::from(Span::styled(
            message.as_str(),
            theme::error_text(),
        ))],
        WeatherState::Disabled => vec![Line::from(Span::styled(
            "Weather is turned off",
            theme::dimmed(),
        ))],
    };

    let block = Block::default()
        .title(Span::styled(
            "Weather",
            theme::panel_title(theme::WEATHER_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
