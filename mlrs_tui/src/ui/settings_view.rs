//! Current rules and the last barrage report

use super::{flag_line, section, value_line};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(18),    // Settings
            Constraint::Length(8), // Barrage report
        ])
        .split(area);

    draw_settings(f, app, chunks[0]);
    draw_barrage(f, app, chunks[1]);
}

fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let settings = app.plugin.settings();
    let store = app.plugin.store();

    let mut lines = vec![section("Damage")];
    if app.plugin.damage_hook_enabled() {
        lines.push(value_line("Damage modifier", format!("x{}", settings.damage_modifier)));
        if settings.damage_disabled() {
            lines.push(Line::from(Span::styled(
                "  All rocket damage is blocked (modifier <= 0)",
                Style::default().fg(Color::Red),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Damage rules disabled: config failed to load. Fix it and press l.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(flag_line("Players", settings.allow_player_damage));
    lines.push(flag_line("NPCs", settings.allow_npc_damage));
    lines.push(flag_line("Player bases", settings.allow_owned_structure_damage));
    lines.push(flag_line("Raidable/abandoned bases", settings.allow_unowned_structure_damage));
    lines.push(Line::from(""));

    lines.push(section("Fire Control"));
    lines.push(value_line("Rockets per barrage", settings.rocket_capacity.to_string()));
    lines.push(value_line("Container stack size", settings.container_capacity().to_string()));
    let interval = format!("{}s", settings.launch_interval_seconds);
    if settings.interval_needs_caution() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:28}", "Launch interval"), Style::default().fg(Color::Gray)),
            Span::styled(format!("{} (very fast)", interval), Style::default().fg(Color::Yellow)),
        ]));
    } else {
        lines.push(value_line("Launch interval", interval));
    }
    lines.push(value_line("Cooldown", format!("{} min", settings.cooldown_minutes)));
    lines.push(flag_line("Aiming module required", settings.require_aiming_module));
    lines.push(Line::from(""));

    lines.push(section("Store"));
    let path = store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string());
    lines.push(value_line("File", path));
    lines.push(value_line("Format", format!("{:?}", store.format())));
    lines.push(value_line("Server time", app.server_time()));
    lines.push(value_line("Pending tasks", app.plugin.pending_tasks().to_string()));
    lines.push(value_line("Server cooldown", format!("{} min", app.host.cooldown_minutes())));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Settings "));

    f.render_widget(paragraph, area);
}

fn draw_barrage(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Last Barrage ");

    let Some(report) = &app.last_barrage else {
        let paragraph = Paragraph::new("Press b to fire a barrage at the victim roster")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let header = Row::new(vec!["Category", "Hits", "Allowed", "Denied", "Dealt", "Raw"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = report
        .tallies
        .iter()
        .map(|tally| {
            let denied_style = if tally.denied > 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(tally.category.name()),
                Cell::from(tally.hits.to_string()),
                Cell::from(tally.allowed.to_string()),
                Cell::from(tally.denied.to_string()).style(denied_style),
                Cell::from(format!("{:.1}", tally.dealt_damage)),
                Cell::from(format!("{:.1}", tally.raw_damage)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(26),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
