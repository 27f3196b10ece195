//! Application state

use crate::logger;
use crate::simulation::BarrageReport;
use mlrs_core::{
    Caller, EntityId, EntityKind, LauncherHost, MlrsPlugin, OwnerId, SimulatedHost, Victim,
};
use rand::SeedableRng;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Oldest console lines are dropped past this
const CONSOLE_LIMIT: usize = 500;

/// Container for loading the victim roster from JSON
#[derive(Debug, Deserialize)]
struct VictimsFile {
    victims: Vec<Victim>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Launchers,
    Settings,
    Console,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Launchers, Tab::Settings, Tab::Console, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Launchers => "Launchers",
            Tab::Settings => "Settings",
            Tab::Console => "Console",
            Tab::Help => "Help",
        }
    }
}

/// Where key presses go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing an admin command
    Command,
}

pub struct App {
    pub current_tab: Tab,
    pub host: SimulatedHost,
    pub plugin: MlrsPlugin,
    pub roster: Vec<Victim>,
    pub selected_launcher: usize,
    pub console: Vec<String>,
    pub log_scroll: usize,
    pub input_mode: InputMode,
    pub input: String,
    pub last_barrage: Option<BarrageReport>,
    pub rng: rand::rngs::StdRng,
    pub time_elapsed: Duration,
}

impl App {
    /// Load settings from `config_path` and start a server with one launcher
    pub fn new(config_path: &Path) -> Self {
        let plugin = MlrsPlugin::load(config_path);
        let mut app = Self::with_plugin(plugin, Self::load_roster());
        app.spawn_launcher();
        app
    }

    pub fn with_plugin(mut plugin: MlrsPlugin, roster: Vec<Victim>) -> Self {
        let mut host = SimulatedHost::new();
        plugin.on_server_initialized(&mut host);

        let mut app = App {
            current_tab: Tab::Launchers,
            host,
            plugin,
            roster,
            selected_launcher: 0,
            console: vec!["MLRS console ready. Press : to enter a command.".to_string()],
            log_scroll: 0,
            input_mode: InputMode::Normal,
            input: String::new(),
            last_barrage: None,
            rng: rand::rngs::StdRng::seed_from_u64(42),
            time_elapsed: Duration::ZERO,
        };
        app.collect_log();
        app
    }

    fn load_roster() -> Vec<Victim> {
        let paths = ["mlrs_tui/data/victims.json", "data/victims.json", "../mlrs_tui/data/victims.json"];

        for path in paths {
            if let Ok(content) = fs::read_to_string(path) {
                match serde_json::from_str::<VictimsFile>(&content) {
                    Ok(file) => {
                        log::info!("Loaded {} victims from {}", file.victims.len(), path);
                        return file.victims;
                    }
                    Err(e) => log::warn!("Failed to parse {}: {}", path, e),
                }
            }
        }

        log::info!("No victims.json found, using built-in roster");
        default_roster()
    }

    // === Navigation ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(current_idx + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(current_idx + tabs.len() - 1) % tabs.len()];
    }

    pub fn set_tab(&mut self, index: usize) {
        if let Some(tab) = Tab::all().get(index) {
            self.current_tab = *tab;
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Launchers => self.selected_launcher = self.selected_launcher.saturating_sub(1),
            Tab::Console => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Launchers => {
                if self.selected_launcher + 1 < self.host.launchers().len() {
                    self.selected_launcher += 1;
                }
            }
            Tab::Console => {
                if self.log_scroll + 1 < self.console.len() {
                    self.log_scroll += 1;
                }
            }
            _ => {}
        }
    }

    pub fn selected_launcher(&self) -> Option<EntityId> {
        self.host.launchers().get(self.selected_launcher).copied()
    }

    // === Launcher actions ===

    pub fn spawn_launcher(&mut self) {
        let id = self.host.spawn_launcher();
        self.selected_launcher = self.host.launchers().len().saturating_sub(1);
        self.push_console(format!("Spawned launcher {}", id));
    }

    /// Fill the selected launcher's container and pull the trigger
    pub fn fire_selected(&mut self) {
        let Some(id) = self.selected_launcher() else {
            self.push_console("No launcher selected".to_string());
            return;
        };

        let result = self
            .host
            .load_rockets(id, u32::MAX)
            .and_then(|_| self.host.start_firing(id));
        match result {
            Ok(()) => self.push_console(format!("Launcher {} firing", id)),
            Err(e) => self.push_console(format!("Cannot fire: {}", e)),
        }
    }

    pub fn insert_module(&mut self) {
        let Some(id) = self.selected_launcher() else {
            return;
        };
        match self.host.insert_aiming_module(id) {
            Ok(()) => self.push_console(format!("Inserted aiming module into {}", id)),
            Err(e) => self.push_console(format!("Cannot insert module: {}", e)),
        }
    }

    pub fn destroy_selected(&mut self) {
        let Some(id) = self.selected_launcher() else {
            return;
        };
        match self.host.destroy(id) {
            Ok(()) => {
                self.push_console(format!("Destroyed launcher {}", id));
                let count = self.host.launchers().len();
                self.selected_launcher = self.selected_launcher.min(count.saturating_sub(1));
            }
            Err(e) => self.push_console(format!("Cannot destroy: {}", e)),
        }
    }

    // === Rules ===

    pub fn reload(&mut self) {
        if let Err(e) = self.plugin.reload(&mut self.host) {
            self.push_console(format!("Reload failed: {}", e));
        }
        self.collect_log();
    }

    /// Fire one full barrage worth of rockets into the victim roster
    pub fn barrage(&mut self) {
        let rockets = self.plugin.settings().rocket_capacity;
        let report = BarrageReport::run(&self.plugin, &self.roster, rockets, &mut self.rng);
        self.collect_log();
        for line in report.summary() {
            self.push_console(line);
        }
        self.last_barrage = Some(report);
    }

    // === Command input ===

    pub fn start_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.input.clear();
    }

    pub fn cancel_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn on_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn on_input_backspace(&mut self) {
        self.input.pop();
    }

    /// Run the typed command as an admin. Confirmations arrive through the log.
    pub fn submit_command(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.input_mode = InputMode::Normal;
        if line.trim().is_empty() {
            return;
        }

        self.push_console(format!("> {}", line));
        let result = self.plugin.run_command(&mut self.host, Caller::Admin, &line);
        self.collect_log();
        if let Err(e) = result {
            self.push_console(e.to_string());
        }
    }

    // === Simulation ===

    /// Advance the simulated server by one frame
    pub fn tick(&mut self, elapsed: Duration) {
        for event in self.host.advance(elapsed) {
            self.plugin.dispatch(&mut self.host, event);
        }
        self.plugin.run_due_tasks(&mut self.host, elapsed);
        self.time_elapsed += elapsed;
        self.collect_log();
    }

    /// Game time simulated so far, for display
    pub fn server_time(&self) -> String {
        format!("{:.1}s", self.time_elapsed.as_secs_f64())
    }

    fn collect_log(&mut self) {
        for line in logger::drain() {
            self.push_console(line);
        }
    }

    pub fn push_console(&mut self, line: String) {
        self.console.push(line);
        if self.console.len() > CONSOLE_LIMIT {
            let excess = self.console.len() - CONSOLE_LIMIT;
            self.console.drain(..excess);
            self.log_scroll = self.log_scroll.saturating_sub(excess);
        }
    }
}

/// One victim of every category
fn default_roster() -> Vec<Victim> {
    vec![
        Victim::new(EntityId(1001), EntityKind::Player, OwnerId::NONE),
        Victim::new(EntityId(1101), EntityKind::NpcPlayer, OwnerId::NONE),
        Victim::new(EntityId(1102), EntityKind::Animal, OwnerId::NONE),
        Victim::new(EntityId(1201), EntityKind::Structure, OwnerId(76561198000000001)),
        Victim::new(EntityId(1301), EntityKind::Structure, OwnerId::NONE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlrs_core::{Settings, SettingsStore};

    fn app_with(settings: Settings) -> App {
        let plugin = MlrsPlugin::new(SettingsStore::in_memory(settings));
        App::with_plugin(plugin, default_roster())
    }

    #[test]
    fn test_tab_cycling() {
        let mut app = app_with(Settings::default());
        app.prev_tab();
        assert_eq!(app.current_tab, Tab::Help);
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Launchers);
        app.set_tab(2);
        assert_eq!(app.current_tab, Tab::Console);
        app.set_tab(9);
        assert_eq!(app.current_tab, Tab::Console);
    }

    #[test]
    fn test_spawned_launcher_gets_capacity_next_tick() {
        let mut app = app_with(Settings {
            rocket_capacity: 20,
            ..Settings::default()
        });
        app.spawn_launcher();
        let id = app.selected_launcher().unwrap();
        assert_eq!(app.host.container_capacity(id).unwrap(), 6);

        // The tick that delivers the spawn event leaves the launcher alone
        app.tick(Duration::from_millis(100));
        assert_eq!(app.host.container_capacity(id).unwrap(), 6);

        app.tick(Duration::from_millis(100));
        assert_eq!(app.host.container_capacity(id).unwrap(), 10);
    }

    #[test]
    fn test_server_time_tracks_ticks() {
        let mut app = app_with(Settings::default());
        assert_eq!(app.server_time(), "0.0s");

        for _ in 0..15 {
            app.tick(Duration::from_millis(100));
        }
        assert_eq!(app.time_elapsed, Duration::from_millis(1500));
        assert_eq!(app.server_time(), "1.5s");
    }

    #[test]
    fn test_fire_without_module_is_refused() {
        let mut app = app_with(Settings::default());
        app.spawn_launcher();
        app.fire_selected();

        assert!(app.console.last().unwrap().starts_with("Cannot fire"));
    }

    #[test]
    fn test_command_input_applies_setting() {
        let mut app = app_with(Settings::default());
        app.start_command();
        for c in "mlrsdamage.rockets 30".chars() {
            app.on_input_char(c);
        }
        app.submit_command();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.plugin.settings().rocket_capacity, 30);
    }

    #[test]
    fn test_bad_command_reports_error() {
        let mut app = app_with(Settings::default());
        app.start_command();
        for c in "mlrsdamage.pvp maybe".chars() {
            app.on_input_char(c);
        }
        app.submit_command();

        assert_eq!(app.console.last().unwrap(), "Error: Enter either true or false!");
        assert!(app.plugin.settings().allow_player_damage);
    }

    #[test]
    fn test_destroy_clamps_selection() {
        let mut app = app_with(Settings::default());
        app.spawn_launcher();
        app.spawn_launcher();
        assert_eq!(app.selected_launcher, 1);

        app.destroy_selected();
        assert_eq!(app.selected_launcher, 0);
        assert!(app.selected_launcher().is_some());
    }

    #[test]
    fn test_barrage_records_report() {
        let mut app = app_with(Settings {
            rocket_capacity: 24,
            ..Settings::default()
        });
        app.barrage();

        let report = app.last_barrage.as_ref().unwrap();
        assert_eq!(report.rockets, 24);
    }
}
