//! Help tab view

use super::section;
use crate::app::App;
use mlrs_core::commands::COMMANDS;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, _app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let keys = vec![
        section("Navigation"),
        key_line("1-4", "Jump to tab (Launchers/Settings/Console/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Select launcher / scroll log"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        section("Server"),
        key_line("s", "Spawn a launcher"),
        key_line("f", "Load and fire the selected launcher"),
        key_line("m", "Insert an aiming module by hand"),
        key_line("d", "Destroy the selected launcher"),
        key_line("b", "Fire a barrage at the victim roster"),
        key_line("l", "Reload the settings file"),
        key_line(":", "Type an admin command"),
    ];

    let mut rules = vec![section("Commands")];
    rules.extend(COMMANDS.iter().map(|(_, usage)| {
        Line::from(Span::styled(format!("  {}", usage), Style::default().fg(Color::White)))
    }));
    rules.push(Line::from(""));
    rules.push(section("Damage Rules"));
    rules.extend(
        [
            "  Modifier <= 0 blocks every rocket hit",
            "  Players, NPCs and animals are judged by kind",
            "  Structures without an owner are raidable/abandoned",
            "  Allowed hits are scaled by the modifier",
        ]
        .into_iter()
        .map(Line::from),
    );
    rules.push(Line::from(""));
    rules.push(section("Fire Control"));
    rules.extend(
        [
            "  A barrage stops after the configured rocket count",
            "  The container holds two stacks of half that count",
        ]
        .into_iter()
        .map(Line::from),
    );

    f.render_widget(
        Paragraph::new(keys).block(Block::default().borders(Borders::ALL).title(" Keys ")),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(rules).block(Block::default().borders(Borders::ALL).title(" Rules ")),
        chunks[1],
    );
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
