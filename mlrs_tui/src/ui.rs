//! UI rendering

mod console_view;
mod help_view;
mod launchers_view;
mod settings_view;

use crate::app::{App, InputMode, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Keybindings footer or command input
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Launchers => launchers_view::draw(f, app, chunks[1]),
        Tab::Settings => settings_view::draw(f, app, chunks[1]),
        Tab::Console => console_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    match app.input_mode {
        InputMode::Normal => draw_keybindings(f, app, chunks[2]),
        InputMode::Command => draw_command_input(f, app, chunks[2]),
    }
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![(":", "Command"), ("Tab", "Next tab"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Launchers => vec![
            ("↑/↓", "Select"),
            ("s", "Spawn"),
            ("f", "Fire"),
            ("m", "Module"),
            ("d", "Destroy"),
        ],
        Tab::Settings => vec![("b", "Barrage"), ("l", "Reload")],
        Tab::Console => vec![("↑/↓", "Scroll log"), ("b", "Barrage")],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::White)));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_command_input(f: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled(app.input.clone(), Style::default().fg(Color::White)),
        Span::styled("█", Style::default().fg(Color::Gray)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Command (Enter to run, Esc to cancel) "),
    );

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" MLRS Rules "))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

/// Fill gauge for rockets and similar counts
pub fn progress_bar(current: f64, max: f64, width: u16, filled_color: Color) -> Span<'static> {
    let percent = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (percent * width as f64) as usize;
    let empty = (width as usize).saturating_sub(filled);

    Span::styled(
        format!("{}{}", "█".repeat(filled), "░".repeat(empty)),
        Style::default().fg(filled_color),
    )
}

pub fn value_line(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:28}", name), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

pub fn flag_line(name: &str, enabled: bool) -> Line<'static> {
    let (text, color) = if enabled { ("Enabled", Color::Green) } else { ("Disabled", Color::Red) };
    Line::from(vec![
        Span::styled(format!("{:28}", name), Style::default().fg(Color::Gray)),
        Span::styled(text, Style::default().fg(color)),
    ])
}

pub fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}
