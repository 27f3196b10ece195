//! Console log view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .console
        .iter()
        .skip(app.log_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|line| ListItem::new(line.as_str()).style(line_style(line)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Console ({} lines) ", app.console.len())),
    );

    f.render_widget(list, area);
}

fn line_style(line: &str) -> Style {
    if line.starts_with("[ERROR]") {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if line.starts_with("[WARN]") || line.starts_with("Error") {
        Style::default().fg(Color::Yellow)
    } else if line.starts_with("[DEBUG]") {
        Style::default().fg(Color::DarkGray)
    } else if line.starts_with("> ") {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if line.starts_with("Barrage") {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::White)
    }
}
