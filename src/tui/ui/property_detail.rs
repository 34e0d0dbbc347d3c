//! Property detail screen rendering

use crate::chat::ChatRole;
use crate::conversation::{ClassifyPhase, Conversation};
use crate::storage::{recent_requests, ClassifyResult, HistoryMessage, Property};
use crate::tui::app::App;
use crate::tui::screens::DetailScreen;
use crate::tui::types::{DetailTab, InfoField};
use crate::tui::ui::helpers::{format_timestamp, help_bar, priority_color};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

/// Renders the screen
pub fn render_property_detail(f: &mut Frame, app: &App) {
    let (Some(screen), Some(property)) = (&app.detail_screen, app.store.selected()) else {
        return;
    };
    let conversation = app.store.active_conversation();
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Tab body
            Constraint::Length(3), // Status/Help
        ])
        .split(size);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(property.name.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {} · Unit {}", property.context.tenant_name, property.context.unit),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let titles: Vec<&str> = DetailTab::all().iter().map(|t| t.label()).collect();
    let selected = DetailTab::all().iter().position(|t| *t == screen.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[1]);

    match screen.tab {
        DetailTab::TextHistory => render_text_history(f, app, property, chunks[2]),
        DetailTab::Classify => render_classify(f, app, property, screen, conversation, chunks[2]),
        DetailTab::AiChat => render_chat(f, conversation, chunks[2]),
        DetailTab::RecentRequests => render_recent_requests(f, app, property, chunks[2]),
        DetailTab::ImportantInfo => render_info(f, property, screen, chunks[2]),
    }

    let help_text = match (&screen.status_message, screen.tab) {
        (Some(status), _) => status.clone(),
        (None, DetailTab::Classify) => {
            "Enter: Queue | Ctrl+S: Classify | Ctrl+Y: Copy reply | Del: Drop queued | Esc: Back".to_string()
        }
        (None, DetailTab::AiChat) => "Enter: Send | /attach <path> | /detach | Esc: Back".to_string(),
        (None, DetailTab::ImportantInfo) => "↑↓: Select | Enter: Edit | ←→: Tabs | Esc: Back".to_string(),
        (None, _) => "←→/Tab: Tabs | r/F5: Refresh | Esc: Back".to_string(),
    };
    f.render_widget(help_bar(&help_text), chunks[3]);
}

fn message_lines(messages: &[HistoryMessage]) -> Vec<ListItem<'static>> {
    messages
        .iter()
        .map(|msg| {
            let color = if msg.role.is_tenant() { Color::Blue } else { Color::Green };
            let mut spans = vec![
                Span::styled(
                    format!("[{}] ", format_timestamp(msg.timestamp())),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{}: ", msg.role.label()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(msg.text().to_string()),
            ];
            if !msg.media_urls.is_empty() {
                spans.push(Span::styled(
                    format!(" 📎{}", msg.media_urls.len()),
                    Style::default().fg(Color::Magenta),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect()
}

fn render_history_list(f: &mut Frame, title: String, messages: &[HistoryMessage], loading: bool, area: Rect) {
    let title = if loading { format!("{} (loading…)", title) } else { title };
    if messages.is_empty() {
        let text = if loading { "Loading…" } else { "No messages yet." };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    // Newest at the bottom; keep the tail visible
    let visible = area.height.saturating_sub(2) as usize;
    let start = messages.len().saturating_sub(visible);
    let list = List::new(message_lines(&messages[start..]))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn render_text_history(f: &mut Frame, app: &App, property: &Property, area: Rect) {
    let key = property.thread_key();
    render_history_list(
        f,
        format!("Thread {}", property.phone),
        app.store.history(&key),
        app.store.is_loading_history(&key),
        area,
    );
}

fn result_lines(result: &ClassifyResult) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Category: ", Style::default().fg(Color::Gray)),
            Span::styled(result.category.as_str(), Style::default().fg(Color::Cyan)),
            Span::styled("  Priority: ", Style::default().fg(Color::Gray)),
            Span::styled(
                result.priority.as_str(),
                Style::default().fg(priority_color(result.priority)).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Action: ", Style::default().fg(Color::Gray)),
            Span::raw(result.action.as_str()),
            Span::styled("  Confidence: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{:.0}%", result.confidence * 100.0)),
        ]),
    ];
    for (name, value) in &result.entities {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", name), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Suggested reply:", Style::default().fg(Color::Gray))));
    lines.push(Line::from(Span::styled(result.reply.clone(), Style::default().fg(Color::White))));
    lines
}

fn render_classify(
    f: &mut Frame,
    app: &App,
    property: &Property,
    screen: &DetailScreen,
    conversation: Option<&Conversation>,
    area: Rect,
) {
    let Some(conv) = conversation else {
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3), Constraint::Length(2)])
        .split(columns[0]);

    let pending: Vec<ListItem> = conv
        .pending
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let marker = if i == screen.pending_cursor { "→ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::raw(text.clone()),
            ]))
        })
        .collect();
    let phase = conv.phase();
    let list = List::new(pending).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Tenant messages ({}) · {}", conv.pending.len(), phase.label())),
    );
    f.render_widget(list, left[0]);

    let draft_style = if conv.is_classifying() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let draft = Paragraph::new(format!("{}_", conv.draft))
        .style(draft_style)
        .block(Block::default().borders(Borders::ALL).title("Type a tenant message"));
    f.render_widget(draft, left[1]);

    let notice = match (&conv.validation, &conv.error, phase) {
        (Some(v), _, _) => Span::styled(v.to_string(), Style::default().fg(Color::Red)),
        (_, Some(e), _) => Span::styled(e.clone(), Style::default().fg(Color::Red)),
        (_, _, ClassifyPhase::Classifying) => Span::styled("Classifying…", Style::default().fg(Color::Yellow)),
        _ => Span::raw(""),
    };
    f.render_widget(Paragraph::new(Line::from(notice)).wrap(Wrap { trim: true }), left[2]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    let verdict = match &conv.result {
        Some(result) => Paragraph::new(result_lines(result)),
        None => Paragraph::new("Queue messages and press Ctrl+S to classify.")
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(
        verdict
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("AI Suggestion")),
        right[0],
    );

    let key = property.history_key();
    render_history_list(
        f,
        "Conversation".to_string(),
        app.store.history(&key),
        app.store.is_loading_history(&key),
        right[1],
    );
}

fn render_chat(f: &mut Frame, conversation: Option<&Conversation>, area: Rect) {
    let Some(chat) = conversation.map(|c| &c.chat) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for entry in &chat.transcript {
        let (label, color) = match entry.role {
            ChatRole::User => ("You", Color::Green),
            ChatRole::Assistant => ("AI", Color::Blue),
        };
        let mut spans = vec![
            Span::styled(format!("{}: ", label), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(entry.content.clone()),
        ];
        if let Some(name) = &entry.attachment {
            spans.push(Span::styled(format!(" 📎 {}", name), Style::default().fg(Color::Magenta)));
        }
        lines.push(Line::from(spans));
    }
    if chat.is_sending() {
        lines.push(Line::from(Span::styled("AI is typing…", Style::default().fg(Color::DarkGray))));
    }
    let transcript = if lines.is_empty() {
        Paragraph::new("Ask the assistant about this property.").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(lines)
    };
    f.render_widget(
        transcript
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("AI Chat")),
        chunks[0],
    );

    let chip = match (&chat.error, &chat.attachment) {
        (Some(e), _) => Span::styled(e.clone(), Style::default().fg(Color::Red)),
        (None, Some(a)) => Span::styled(format!("📎 {}", a.display_name()), Style::default().fg(Color::Magenta)),
        (None, None) => Span::raw(""),
    };
    f.render_widget(Paragraph::new(Line::from(chip)), chunks[1]);

    let border = if chat.can_send() { Color::Yellow } else { Color::DarkGray };
    let input = Paragraph::new(format!("{}_", chat.input)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title("Message"),
    );
    f.render_widget(input, chunks[2]);
}

fn render_recent_requests(f: &mut Frame, app: &App, property: &Property, area: Rect) {
    let key = property.thread_key();
    let thread = app.store.history(&key);
    let requests = recent_requests(thread);

    if requests.is_empty() {
        let text = if app.store.is_loading_history(&key) { "Loading…" } else { "No classified requests yet." };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Recent Requests"));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = requests
        .iter()
        .map(|msg| {
            let mut header = vec![Span::styled(
                format!("[{}] ", format_timestamp(msg.timestamp())),
                Style::default().fg(Color::DarkGray),
            )];
            if let Some(category) = msg.category {
                header.push(Span::styled(
                    format!("{} ", category.as_str()),
                    Style::default().fg(Color::Cyan),
                ));
            }
            if let Some(priority) = msg.priority {
                header.push(Span::styled(
                    format!("{} ", priority.as_str()),
                    Style::default().fg(priority_color(priority)).add_modifier(Modifier::BOLD),
                ));
            }
            if let Some(action) = msg.action {
                header.push(Span::raw(format!("→ {}", action.as_str())));
            }
            ListItem::new(vec![
                Line::from(header),
                Line::from(Span::raw(format!("    {}", msg.text()))),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Recent Requests ({})", requests.len())),
    );
    f.render_widget(list, area);
}

fn render_info(f: &mut Frame, property: &Property, screen: &DetailScreen, area: Rect) {
    let items: Vec<ListItem> = InfoField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let highlighted = i == screen.info_cursor;
            let value = match &screen.editing {
                Some((editing, buffer)) if editing == field => {
                    Span::styled(format!("{}_", buffer), Style::default().fg(Color::Yellow))
                }
                _ => {
                    let value = field.value(property);
                    if value.is_empty() {
                        Span::styled("—", Style::default().fg(Color::DarkGray))
                    } else {
                        Span::raw(value.to_string())
                    }
                }
            };
            ListItem::new(Line::from(vec![
                Span::styled(if highlighted { "→ " } else { "  " }, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<14}", field.label()), Style::default().fg(Color::Gray)),
                value,
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Important Info"));
    f.render_widget(list, area);
}
