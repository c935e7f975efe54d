//! Task panel rendering.
//!
//! Shows the Pending section then the Completed section. A section header
//! is only drawn when the section has tasks.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use termtodo_core::task::Task;

use super::theme;
use crate::app::{App, PanelFocus};
use crate::tasks::SectionKind;

/// Shown in place of the list when there are no tasks.
pub const EMPTY_LIST_MESSAGE: &str = "No tasks! Add one to get started.";

/// Render the task panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Tasks && app.modal.is_none();
    let partition = app.store().partition();

    let block = Block::default()
        .title(Span::styled(
            "Tasks",
            theme::panel_title(theme::TASKS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    if partition.is_empty() {
        let message = if app.tasks_loaded {
            EMPTY_LIST_MESSAGE
        } else {
            "Loading tasks..."
        };
        let paragraph = Paragraph::new(Span::styled(message, theme::dimmed()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut items = Vec::with_capacity(partition.total() + 2);
    let mut selected_item = None;
    let mut row = 0;
    for section in partition.sections() {
        if section.is_empty() {
            continue;
        }
        let accent = match section.kind {
            SectionKind::Pending => theme::WARNING,
            SectionKind::Completed => theme::SUCCESS,
        };
        items.push(ListItem::new(Line::from(Span::styled(
            section.title(),
            theme::section_header(accent),
        ))));
        for task in &section.tasks {
            if row == app.selected {
                selected_item = Some(items.len());
            }
            items.push(task_item(task));
            row += 1;
        }
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(if is_focused {
            theme::selected()
        } else {
            theme::bold()
        })
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(selected_item);
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_item(task: &Task) -> ListItem<'static> {
    if task.is_pending() {
        return ListItem::new(Line::from(vec![
            Span::styled("[ ] ", theme::normal()),
            Span::styled(task.text.clone(), theme::normal()),
        ]));
    }
    let mut lines = vec![Line::from(vec![
        Span::styled("[\u{2713}] ", theme::normal().fg(theme::SUCCESS)),
        Span::styled(task.text.clone(), theme::completed()),
    ])];
    // Lists from older clients may lack the timestamp.
    if let Some(completed_at) = &task.completed_at {
        lines.push(Line::from(Span::styled(
            format!("    Completed: {completed_at}"),
            theme::dimmed(),
        )));
    }
    ListItem::new(lines)
}
