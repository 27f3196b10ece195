//! mlrs_tui - Interactive TUI for driving MLRS rules against a simulated server

mod app;
mod logger;
mod simulation;
mod ui;

use app::{App, InputMode};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("MLRSDamage.json"));

    if let Err(e) = logger::init(LevelFilter::Debug) {
        eprintln!("Failed to install logger: {}", e);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config_path);

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                let quit = match app.input_mode {
                    InputMode::Normal => handle_normal_key(&mut app, key),
                    InputMode::Command => {
                        handle_command_key(&mut app, key);
                        false
                    }
                };
                if quit {
                    break;
                }
            }
        }

        // Tick simulation
        app.tick(FRAME);
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Returns true when the app should quit
fn handle_normal_key(app: &mut App, key: KeyEvent) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
        (KeyCode::Tab, _) => app.next_tab(),
        (KeyCode::BackTab, _) => app.prev_tab(),
        (KeyCode::Char('1'), _) => app.set_tab(0),
        (KeyCode::Char('2'), _) => app.set_tab(1),
        (KeyCode::Char('3'), _) => app.set_tab(2),
        (KeyCode::Char('4'), _) => app.set_tab(3),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
        (KeyCode::Char('s'), _) => app.spawn_launcher(),
        (KeyCode::Char('f'), _) => app.fire_selected(),
        (KeyCode::Char('m'), _) => app.insert_module(),
        (KeyCode::Char('d'), _) => app.destroy_selected(),
        (KeyCode::Char('l'), _) => app.reload(),
        (KeyCode::Char('b'), _) => app.barrage(),
        (KeyCode::Char(':'), _) => app.start_command(),
        _ => {}
    }
    false
}

fn handle_command_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_command(),
        KeyCode::Esc => app.cancel_command(),
        KeyCode::Backspace => app.on_input_backspace(),
        KeyCode::Char(c) => app.on_input_char(c),
        _ => {}
    }
}
