//! Delete confirmation popup rendering

use crate::tui::app::App;
use crate::tui::ui::helpers::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Renders the popup over the current screen
pub fn render_delete_confirmation(f: &mut Frame, app: &App) {
    let Some(property) = app.delete_gate.pending().and_then(|id| app.store.get(id)) else {
        return;
    };

    let popup_area = centered_rect(60, 12, f.size());

    let popup_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Message
            Constraint::Length(2), // Acknowledgment
            Constraint::Length(2), // Buttons
        ])
        .split(popup_area);

    f.render_widget(Clear, popup_area);
    let background = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));
    f.render_widget(background, popup_area);

    let title = Paragraph::new("Delete Property")
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, popup_chunks[0]);

    let message = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Delete "),
            Span::styled(property.name.clone(), Style::default().fg(Color::Cyan)),
            Span::raw("?"),
        ]),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(Color::Yellow),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: false });
    f.render_widget(message, popup_chunks[1]);

    let acknowledged = app.delete_gate.is_acknowledged();
    let checkbox = Paragraph::new(Line::from(vec![
        Span::styled(
            if acknowledged { "[x] " } else { "[ ] " },
            Style::default().fg(if acknowledged { Color::Green } else { Color::Gray }),
        ),
        Span::raw("I understand (Space to toggle)"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(checkbox, popup_chunks[2]);

    let confirm_style = if app.delete_gate.can_confirm() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let buttons = Paragraph::new(Line::from(vec![
        Span::styled("[Y]", confirm_style),
        Span::styled("es  ", confirm_style),
        Span::styled("[N]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw("o"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(buttons, popup_chunks[3]);
}
