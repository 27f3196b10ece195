//! MlrsPlugin - entry points the host calls into

use crate::commands::{AdminCommand, Caller, CommandError, CommandOutcome, Severity};
use crate::config::{
    ConfigError, Settings, SettingsStore, MODULE_REARM_DELAY, NATIVE_CONTAINER_CAPACITY,
    NATIVE_COOLDOWN_MINUTES, NATIVE_ROCKET_BATCH,
};
use crate::damage::{self, Authorization, DamageEvent, VictimCategory};
use crate::fire::{FireController, FireUpdate};
use crate::gate::ModuleGate;
use crate::host::{HostError, HostEvent, LauncherHost};
use crate::schedule::{Delay, Task, TaskQueue};
use crate::types::{EntityId, EntityKind};
use std::path::Path;
use std::time::Duration;

/// Log and swallow a failed host call. Launchers can vanish between an
/// event and the work it triggers; that is never fatal.
fn skip_on_error(launcher: EntityId, what: &str, result: Result<(), HostError>) {
    if let Err(e) = result {
        log::debug!("Skipped {} for launcher {}: {}", what, launcher, e);
    }
}

/// The MLRS rules, wired to host callbacks
#[derive(Debug)]
pub struct MlrsPlugin {
    store: SettingsStore,
    fire: FireController,
    gate: ModuleGate,
    tasks: TaskQueue,
    damage_hook_enabled: bool,
}

impl MlrsPlugin {
    /// Plugin with already-loaded settings
    pub fn new(store: SettingsStore) -> Self {
        MlrsPlugin {
            store,
            fire: FireController::new(),
            gate: ModuleGate::new(),
            tasks: TaskQueue::new(),
            damage_hook_enabled: true,
        }
    }

    /// Load settings from `path`. A broken file disables the damage hook
    /// and leaves everything else running on defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let (store, error) = SettingsStore::open_or_default(path);
        Self::with_load_result(store, error)
    }

    pub fn with_load_result(store: SettingsStore, error: Option<ConfigError>) -> Self {
        let mut plugin = Self::new(store);
        if let Some(e) = error {
            log::error!("Error reading config, please check! ({})", e);
            log::error!("MLRS damage rules are disabled until the config is fixed and reloaded");
            plugin.damage_hook_enabled = false;
        }
        plugin
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn damage_hook_enabled(&self) -> bool {
        self.damage_hook_enabled
    }

    pub fn fire_controller(&self) -> &FireController {
        &self.fire
    }

    pub fn module_gate(&self) -> &ModuleGate {
        &self.gate
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    // === Lifecycle ===

    /// Push the settings onto everything that already exists
    pub fn on_server_initialized<H: LauncherHost + ?Sized>(&mut self, host: &mut H) {
        host.set_cooldown_minutes(self.settings().cooldown_minutes);
        self.apply_container_capacity_all(host);
        if !self.settings().require_aiming_module {
            self.arm_all(host);
        }
        log::info!(
            "MLRS rules active: {} rockets per barrage, {} minute cooldown",
            self.settings().rocket_capacity,
            self.settings().cooldown_minutes
        );
    }

    /// Hand every launcher back to the host in its native state
    pub fn on_unload<H: LauncherHost + ?Sized>(&mut self, host: &mut H) {
        host.set_cooldown_minutes(NATIVE_COOLDOWN_MINUTES);
        for launcher in host.launchers() {
            let result = host.set_container_capacity(launcher, NATIVE_CONTAINER_CAPACITY);
            skip_on_error(launcher, "capacity reset", result);
        }
        self.gate.release_all(host);
        self.fire.clear();
        self.tasks.clear();

        log::info!("MLRS cooldown time reset to {} minutes", NATIVE_COOLDOWN_MINUTES);
        log::info!("MLRS total rockets to fire reset to {}", NATIVE_ROCKET_BATCH);
    }

    /// Unload, re-read the settings file and initialize again
    pub fn reload<H: LauncherHost + ?Sized>(&mut self, host: &mut H) -> Result<(), ConfigError> {
        self.on_unload(host);
        let result = self.store.reload();
        match &result {
            Ok(()) => self.damage_hook_enabled = true,
            Err(e) => {
                log::error!("Error reading config, please check! ({})", e);
                self.damage_hook_enabled = false;
            }
        }
        self.on_server_initialized(host);
        result
    }

    // === Entity hooks ===

    pub fn on_entity_spawned(&mut self, id: EntityId, kind: EntityKind) {
        if kind != EntityKind::RocketLauncher {
            return;
        }
        // The launcher sets up its own container after the spawn event
        self.tasks.schedule(Delay::NextTick, Task::ApplyContainerCapacity(id));
        if !self.settings().require_aiming_module {
            self.tasks.schedule(Delay::After(MODULE_REARM_DELAY), Task::RearmModule(id));
        }
    }

    pub fn on_entity_destroyed(&mut self, id: EntityId) {
        self.fire.forget(id);
        self.gate.forget(id);
        self.tasks.cancel_for(id);
    }

    /// Damage hook. Scales allowed rocket hits in place; the host suppresses
    /// the hit when `Deny` is returned.
    pub fn on_entity_take_damage(&self, event: &mut DamageEvent) -> Authorization {
        if !self.damage_hook_enabled {
            return Authorization::NoOpinion;
        }

        let authorization = damage::authorize(self.settings(), event);
        damage::apply(event, &authorization);

        match (&event.victim, authorization) {
            (_, Authorization::NoOpinion) | (None, _) => {}
            (Some(victim), _) => log::debug!(
                "Rocket hit on {} ({}): {:?}",
                victim.id,
                VictimCategory::classify(victim).name(),
                authorization
            ),
        }
        authorization
    }

    // === Fire control ===

    pub fn on_fire_start<H: LauncherHost + ?Sized>(&mut self, host: &mut H, launcher: EntityId) {
        let available = match host.rockets_remaining(launcher) {
            Ok(n) => n,
            Err(e) => {
                log::debug!("Ignoring fire start for {}: {}", launcher, e);
                return;
            }
        };

        let update = self.fire.begin(launcher, available, self.settings().rocket_capacity);
        skip_on_error(launcher, "fire start", Self::push_fire_update(host, launcher, &update));

        let interval = self.settings().launch_interval();
        skip_on_error(launcher, "launch interval", host.set_launch_interval(launcher, interval));

        log::debug!(
            "Launcher {} engaging: {} rockets, next index {:?}, every {:?}",
            launcher,
            update.remaining,
            update.next_index,
            interval
        );
    }

    pub fn on_rocket_fired<H: LauncherHost + ?Sized>(&mut self, host: &mut H, launcher: EntityId) {
        let available = match host.rockets_remaining(launcher) {
            Ok(n) => n,
            Err(e) => {
                log::debug!("Ignoring launch from {}: {}", launcher, e);
                return;
            }
        };

        let update = self.fire.record_launch(launcher, available, self.settings().rocket_capacity);
        skip_on_error(launcher, "launch update", Self::push_fire_update(host, launcher, &update));

        log::debug!(
            "Launcher {} fired rocket {} ({} left)",
            launcher,
            update.fired,
            update.remaining
        );
    }

    pub fn on_firing_ended(&mut self, launcher: EntityId) {
        self.fire.end(launcher);
        if !self.settings().require_aiming_module {
            // The host clears the module slot after a barrage
            self.tasks.schedule(Delay::After(MODULE_REARM_DELAY), Task::RearmModule(launcher));
        }
    }

    fn push_fire_update<H: LauncherHost + ?Sized>(
        host: &mut H,
        launcher: EntityId,
        update: &FireUpdate,
    ) -> Result<(), HostError> {
        host.set_rockets_remaining(launcher, update.remaining)?;
        host.set_next_rocket_index(launcher, update.next_index)
    }

    /// Route a host callback to its hook
    pub fn dispatch<H: LauncherHost + ?Sized>(&mut self, host: &mut H, event: HostEvent) {
        match event {
            HostEvent::EntitySpawned { id, kind } => self.on_entity_spawned(id, kind),
            HostEvent::EntityDestroyed(id) => self.on_entity_destroyed(id),
            HostEvent::FireStarted(id) => self.on_fire_start(host, id),
            HostEvent::RocketFired(id) => self.on_rocket_fired(host, id),
            HostEvent::FiringEnded(id) => self.on_firing_ended(id),
        }
    }

    /// Run deferred work that became due during this host tick
    pub fn run_due_tasks<H: LauncherHost + ?Sized>(&mut self, host: &mut H, elapsed: Duration) {
        for task in self.tasks.tick(elapsed) {
            match task {
                Task::ApplyContainerCapacity(id) => {
                    let capacity = self.settings().container_capacity();
                    skip_on_error(id, "container capacity", host.set_container_capacity(id, capacity));
                }
                Task::RearmModule(id) => {
                    // The requirement may have been switched back on meanwhile
                    if !self.settings().require_aiming_module {
                        let result = self.gate.arm(host, id);
                        skip_on_error(id, "module re-arm", result);
                    }
                }
            }
        }
    }

    // === Admin commands ===

    /// Run a console command. Nothing changes unless the command is accepted
    /// and saved.
    pub fn run_command<H: LauncherHost + ?Sized>(
        &mut self,
        host: &mut H,
        caller: Caller,
        line: &str,
    ) -> Result<CommandOutcome, CommandError> {
        if !caller.is_privileged() {
            return Err(CommandError::PermissionDenied);
        }

        let command = match AdminCommand::parse(line) {
            Ok(command) => command,
            Err(e) => {
                log::warn!("{}", e);
                return Err(e);
            }
        };
        if let Err(e) = self.store.update(|settings| command.apply(settings)) {
            log::error!("Failed to save MLRS settings: {}", e);
            return Err(e.into());
        }

        match command {
            AdminCommand::SetCooldown(minutes) => host.set_cooldown_minutes(minutes),
            AdminCommand::SetRocketCapacity(_) => self.apply_container_capacity_all(host),
            AdminCommand::SetRequireModule(true) => self.gate.release_all(host),
            AdminCommand::SetRequireModule(false) => self.arm_all(host),
            _ => {}
        }

        let outcome = command.outcome();
        match outcome.severity {
            Severity::Info => log::info!("{}", outcome.message),
            Severity::Caution => log::warn!("{}", outcome.message),
        }
        Ok(outcome)
    }

    fn apply_container_capacity_all<H: LauncherHost + ?Sized>(&mut self, host: &mut H) {
        let capacity = self.settings().container_capacity();
        for launcher in host.launchers() {
            skip_on_error(launcher, "container capacity", host.set_container_capacity(launcher, capacity));
        }
    }

    fn arm_all<H: LauncherHost + ?Sized>(&mut self, host: &mut H) {
        for launcher in host.launchers() {
            let result = self.gate.arm(host, launcher);
            skip_on_error(launcher, "module arm", result);
        }
    }
}
