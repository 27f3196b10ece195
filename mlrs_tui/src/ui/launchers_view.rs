//! Launcher list and detail panel

use super::{progress_bar, section, value_line};
use crate::app::App;
use mlrs_core::host::SimulatedLauncher;
use mlrs_core::{EntityId, LauncherHost};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28), // Launcher list
            Constraint::Min(40),    // Details
        ])
        .split(area);

    draw_list(f, app, chunks[0]);

    match app.selected_launcher() {
        Some(id) => draw_details(f, app, id, chunks[1]),
        None => {
            let paragraph = Paragraph::new("No launchers. Press s to spawn one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Launcher "));
            f.render_widget(paragraph, chunks[1]);
        }
    }
}

fn draw_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .host
        .launchers()
        .into_iter()
        .filter_map(|id| app.host.launcher(id).map(|launcher| (id, launcher)))
        .map(|(id, launcher)| {
            let (state, color) = if launcher.firing {
                ("FIRING", Color::Red)
            } else if launcher.rockets_loaded > 0 {
                ("loaded", Color::Green)
            } else {
                ("empty", Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("MLRS {:6}", id.to_string()), Style::default().fg(Color::White)),
                Span::styled(state, Style::default().fg(color)),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.selected_launcher));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Launchers "))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    f.render_stateful_widget(list, area, &mut state);
}

fn draw_details(f: &mut Frame, app: &App, id: EntityId, area: Rect) {
    let Some(launcher) = app.host.launcher(id) else {
        return;
    };

    let mut lines = container_lines(launcher, area.width);
    lines.push(Line::from(""));
    lines.extend(engagement_lines(app, id, launcher));
    lines.push(Line::from(""));

    lines.push(section("Aiming Module"));
    let slot = launcher.module_slot;
    lines.push(value_line(
        "Slot",
        if slot.is_occupied() { format!("{} module(s)", slot.items) } else { "empty".to_string() },
    ));
    lines.push(value_line("Locked", slot.locked.to_string()));
    lines.push(value_line("Filled by rules", app.plugin.module_gate().is_armed(id).to_string()));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(format!(" Launcher {} ", id)));

    f.render_widget(paragraph, area);
}

fn container_lines(launcher: &SimulatedLauncher, width: u16) -> Vec<Line<'static>> {
    let max = launcher.max_loaded();
    vec![
        section("Container"),
        value_line("Stack size", launcher.container_capacity.to_string()),
        value_line("Rockets loaded", format!("{} / {}", launcher.rockets_loaded, max)),
        Line::from(progress_bar(
            launcher.rockets_loaded as f64,
            max as f64,
            width.saturating_sub(4).min(40),
            Color::Green,
        )),
    ]
}

fn engagement_lines(app: &App, id: EntityId, launcher: &SimulatedLauncher) -> Vec<Line<'static>> {
    let fired = app.plugin.fire_controller().rockets_fired(id);
    let remaining = app.host.rockets_remaining(id).unwrap_or(0);
    let index = launcher
        .next_rocket_index
        .map(|i| i.to_string())
        .unwrap_or_else(|| "-".to_string());

    vec![
        section("Engagement"),
        value_line("Firing", launcher.firing.to_string()),
        value_line("Rockets fired", format!("{} / {}", fired, app.plugin.settings().rocket_capacity)),
        value_line("Rockets remaining", remaining.to_string()),
        value_line("Next rocket index", index),
        value_line("Launch interval", format!("{:.2}s", launcher.launch_interval.as_secs_f64())),
        value_line("Lifetime launches", launcher.rockets_launched.to_string()),
    ]
}
