//! SimulatedHost - in-memory stand-in for the game server
//!
//! Behaves like the host with no rules installed: 6-rocket stacks,
//! 12-rocket batches, a mandatory aiming module and a fixed launch cadence.

use super::{HostError, HostEvent, LauncherHost, ModuleSlot};
use crate::config::{NATIVE_CONTAINER_CAPACITY, NATIVE_COOLDOWN_MINUTES, NATIVE_ROCKET_BATCH};
use crate::types::{EntityId, EntityKind};
use std::collections::BTreeMap;
use std::time::Duration;

/// Launch cadence of an unmodified launcher
pub const NATIVE_LAUNCH_INTERVAL: Duration = Duration::from_millis(500);

/// One simulated MLRS
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedLauncher {
    /// Stack size; the container holds two stacks
    pub container_capacity: u32,
    /// Rockets sitting in the container
    pub rockets_loaded: u32,
    /// Rockets left in the current engagement
    pub rockets_remaining: u32,
    pub next_rocket_index: Option<u32>,
    pub launch_interval: Duration,
    pub module_slot: ModuleSlot,
    pub firing: bool,
    /// Rockets launched over the launcher's lifetime
    pub rockets_launched: u32,
    until_next_launch: Duration,
}

impl Default for SimulatedLauncher {
    fn default() -> Self {
        SimulatedLauncher {
            container_capacity: NATIVE_CONTAINER_CAPACITY,
            rockets_loaded: 0,
            rockets_remaining: 0,
            next_rocket_index: None,
            launch_interval: NATIVE_LAUNCH_INTERVAL,
            module_slot: ModuleSlot::default(),
            firing: false,
            rockets_launched: 0,
            until_next_launch: Duration::ZERO,
        }
    }
}

impl SimulatedLauncher {
    /// Most rockets the container accepts
    pub fn max_loaded(&self) -> u32 {
        self.container_capacity * 2
    }
}

/// In-memory host holding launchers and the server cooldown
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    launchers: BTreeMap<EntityId, SimulatedLauncher>,
    /// Entities that exist but are not launchers
    others: BTreeMap<EntityId, EntityKind>,
    cooldown_minutes: f64,
    next_id: u64,
    events: Vec<HostEvent>,
}

impl Default for SimulatedHost {
    fn default() -> Self {
        SimulatedHost {
            launchers: BTreeMap::new(),
            others: BTreeMap::new(),
            cooldown_minutes: NATIVE_COOLDOWN_MINUTES,
            next_id: 1,
            events: Vec::new(),
        }
    }
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cooldown_minutes(&self) -> f64 {
        self.cooldown_minutes
    }

    pub fn launcher(&self, id: EntityId) -> Option<&SimulatedLauncher> {
        self.launchers.get(&id)
    }

    fn missing(&self, id: EntityId) -> HostError {
        if self.others.contains_key(&id) {
            HostError::NotALauncher(id)
        } else {
            HostError::UnknownEntity(id)
        }
    }

    fn launcher_mut(&mut self, id: EntityId) -> Result<&mut SimulatedLauncher, HostError> {
        let error = self.missing(id);
        self.launchers.get_mut(&id).ok_or(error)
    }

    fn get(&self, id: EntityId) -> Result<&SimulatedLauncher, HostError> {
        self.launchers.get(&id).ok_or_else(|| self.missing(id))
    }

    /// Spawn a launcher with native settings and an empty container
    pub fn spawn_launcher(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.launchers.insert(id, SimulatedLauncher::default());
        self.events.push(HostEvent::EntitySpawned {
            id,
            kind: EntityKind::RocketLauncher,
        });
        id
    }

    /// Spawn something that is not a launcher
    pub fn spawn_other(&mut self, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.others.insert(id, kind);
        self.events.push(HostEvent::EntitySpawned { id, kind });
        id
    }

    pub fn destroy(&mut self, id: EntityId) -> Result<(), HostError> {
        let removed = self.launchers.remove(&id).is_some() || self.others.remove(&id).is_some();
        if !removed {
            return Err(HostError::UnknownEntity(id));
        }
        self.events.push(HostEvent::EntityDestroyed(id));
        Ok(())
    }

    /// Put rockets in the container. Returns how many fit.
    pub fn load_rockets(&mut self, id: EntityId, rockets: u32) -> Result<u32, HostError> {
        let launcher = self.launcher_mut(id)?;
        let space = launcher.max_loaded().saturating_sub(launcher.rockets_loaded);
        let accepted = rockets.min(space);
        launcher.rockets_loaded += accepted;
        Ok(accepted)
    }

    /// A player taking the module out by hand
    pub fn take_aiming_module(&mut self, id: EntityId) -> Result<(), HostError> {
        let launcher = self.launcher_mut(id)?;
        if launcher.module_slot.locked {
            return Err(HostError::SlotLocked(id));
        }
        launcher.module_slot.items = launcher.module_slot.items.saturating_sub(1);
        Ok(())
    }

    /// A player pulling the trigger
    pub fn start_firing(&mut self, id: EntityId) -> Result<(), HostError> {
        let launcher = self.launcher_mut(id)?;
        if launcher.firing {
            return Ok(());
        }
        if !launcher.module_slot.is_occupied() {
            return Err(HostError::ModuleRequired(id));
        }
        if launcher.rockets_loaded == 0 {
            return Err(HostError::NoRockets(id));
        }

        launcher.firing = true;
        launcher.rockets_remaining = launcher.rockets_loaded;
        launcher.next_rocket_index = launcher.rockets_loaded.min(NATIVE_ROCKET_BATCH).checked_sub(1);
        launcher.until_next_launch = Duration::ZERO;
        self.events.push(HostEvent::FireStarted(id));
        Ok(())
    }

    /// Events raised since the last drain
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run the launch routines for `elapsed` of game time.
    ///
    /// Each launcher launches at most one rocket per call, so the rules see
    /// every launch before the next one happens.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<HostEvent> {
        for (id, launcher) in self.launchers.iter_mut() {
            if !launcher.firing {
                continue;
            }

            launcher.until_next_launch = launcher.until_next_launch.saturating_sub(elapsed);
            if !launcher.until_next_launch.is_zero() {
                continue;
            }

            let spent = launcher.rockets_remaining == 0
                || launcher.rockets_loaded == 0
                || launcher.next_rocket_index.is_none();
            if spent {
                launcher.firing = false;
                launcher.rockets_remaining = 0;
                launcher.next_rocket_index = None;
                self.events.push(HostEvent::FiringEnded(*id));
                continue;
            }

            launcher.rockets_loaded -= 1;
            launcher.rockets_remaining -= 1;
            launcher.rockets_launched += 1;
            launcher.next_rocket_index = launcher.next_rocket_index.and_then(|i| i.checked_sub(1));
            launcher.until_next_launch = launcher.launch_interval;
            self.events.push(HostEvent::RocketFired(*id));
        }

        self.take_events()
    }
}

impl LauncherHost for SimulatedHost {
    fn launchers(&self) -> Vec<EntityId> {
        self.launchers.keys().copied().collect()
    }

    fn container_capacity(&self, launcher: EntityId) -> Result<u32, HostError> {
        Ok(self.get(launcher)?.container_capacity)
    }

    fn set_container_capacity(&mut self, launcher: EntityId, capacity: u32) -> Result<(), HostError> {
        let launcher = self.launcher_mut(launcher)?;
        launcher.container_capacity = capacity;
        // Overflow falls out of the container
        launcher.rockets_loaded = launcher.rockets_loaded.min(launcher.max_loaded());
        Ok(())
    }

    fn rockets_remaining(&self, launcher: EntityId) -> Result<u32, HostError> {
        Ok(self.get(launcher)?.rockets_remaining)
    }

    fn set_rockets_remaining(&mut self, launcher: EntityId, rockets: u32) -> Result<(), HostError> {
        self.launcher_mut(launcher)?.rockets_remaining = rockets;
        Ok(())
    }

    fn set_next_rocket_index(&mut self, launcher: EntityId, index: Option<u32>) -> Result<(), HostError> {
        self.launcher_mut(launcher)?.next_rocket_index = index;
        Ok(())
    }

    fn set_launch_interval(&mut self, launcher: EntityId, interval: Duration) -> Result<(), HostError> {
        self.launcher_mut(launcher)?.launch_interval = interval;
        Ok(())
    }

    fn module_slot(&self, launcher: EntityId) -> Result<ModuleSlot, HostError> {
        Ok(self.get(launcher)?.module_slot)
    }

    fn insert_aiming_module(&mut self, launcher: EntityId) -> Result<(), HostError> {
        self.launcher_mut(launcher)?.module_slot.items += 1;
        Ok(())
    }

    fn remove_aiming_module(&mut self, launcher: EntityId) -> Result<(), HostError> {
        self.launcher_mut(launcher)?.module_slot.items = 0;
        Ok(())
    }

    fn set_module_slot_locked(&mut self, launcher: EntityId, locked: bool) -> Result<(), HostError> {
        self.launcher_mut(launcher)?.module_slot.locked = locked;
        Ok(())
    }

    fn set_cooldown_minutes(&mut self, minutes: f64) {
        self.cooldown_minutes = minutes;
    }
}
