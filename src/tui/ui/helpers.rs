//! UI helper functions

use crate::storage::Priority;
use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

/// Rect of at most `width` x `height` centred in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Local time of a message, or a placeholder when the server sent none
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.with_timezone(&Local).format("%b %d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Colour for a priority badge
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Critical => Color::Red,
        Priority::High => Color::LightRed,
        Priority::Normal => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Bordered one-line help or status bar
pub fn help_bar(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}
