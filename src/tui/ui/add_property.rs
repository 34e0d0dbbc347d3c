//! Add-property form rendering

use crate::tui::app::App;
use crate::tui::screens::AddPropertyScreen;
use crate::tui::ui::helpers::help_bar;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the screen
pub fn render_add_property(f: &mut Frame, app: &App) {
    let Some(form) = &app.add_property_screen else {
        return;
    };
    let size = f.size();

    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(AddPropertyScreen::fields().iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(3)); // Error
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(3)); // Help

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(constraints)
        .split(size);

    let title = Paragraph::new("Add Property")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    for (i, field) in AddPropertyScreen::fields().iter().enumerate() {
        let focused = *field == form.focus;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = form.value(*field);
        let text = if focused { format!("{}_", value) } else { value.to_string() };
        let input = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(field.label()),
        );
        f.render_widget(input, chunks[i + 1]);
    }

    let error_row = AddPropertyScreen::fields().len() + 1;
    let error = Paragraph::new(form.error.as_deref().unwrap_or(""))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    f.render_widget(error, chunks[error_row]);

    f.render_widget(
        help_bar("Tab/↑↓: Next field | Enter: Create | Esc: Cancel"),
        chunks[chunks.len() - 1],
    );
}
