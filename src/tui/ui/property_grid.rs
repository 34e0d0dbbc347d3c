//! Property grid screen rendering

use crate::tui::app::App;
use crate::tui::ui::helpers::help_bar;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the screen
pub fn render_property_grid(f: &mut Frame, app: &App) {
    let size = f.size();
    let properties = app.store.list();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Property list
            Constraint::Length(3), // Status message
            Constraint::Length(3), // Help text
        ])
        .split(size);

    let title = Paragraph::new(format!("PropAI Properties ({})", properties.len()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    if properties.is_empty() {
        let empty_msg = Paragraph::new("No properties yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Properties"));
        f.render_widget(empty_msg, chunks[1]);
    } else {
        let items: Vec<ListItem> = properties
            .iter()
            .enumerate()
            .map(|(i, property)| {
                let selected = i == app.grid.selected_index;
                let name_style = if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let pending = app
                    .store
                    .conversation(&property.id)
                    .map(|c| c.pending.len())
                    .unwrap_or(0);

                let mut header = vec![
                    Span::styled(if selected { "→ " } else { "  " }, Style::default().fg(Color::Cyan)),
                    Span::styled(property.name.clone(), name_style),
                ];
                if pending > 0 {
                    header.push(Span::styled(
                        format!("  ⌛ {} queued", pending),
                        Style::default().fg(Color::Yellow),
                    ));
                }

                let ctx = &property.context;
                let details = Line::from(Span::styled(
                    format!("    {} · Unit {} · {} · {}", ctx.tenant_name, ctx.unit, ctx.address, property.phone),
                    Style::default().fg(Color::DarkGray),
                ));
                ListItem::new(vec![Line::from(header), details])
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Properties"));
        f.render_widget(list, chunks[1]);
    }

    let status_text = app.grid.status_message.as_deref().unwrap_or("");
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[2]);

    f.render_widget(
        help_bar("↑↓/j/k: Navigate | Enter: Open | a: Add | d/Del: Delete | q: Quit"),
        chunks[3],
    );
}
