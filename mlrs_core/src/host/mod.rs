//! Host capability interface
//!
//! The host server owns every launcher. The rules only ever touch a
//! launcher through [`LauncherHost`], and only ever learn about it through
//! [`HostEvent`]s.

mod sim;

pub use sim::{SimulatedHost, SimulatedLauncher, NATIVE_LAUNCH_INTERVAL};

use crate::types::{EntityId, EntityKind};
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a host capability call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),
    #[error("entity {0} is not a rocket launcher")]
    NotALauncher(EntityId),
    #[error("launcher {0} needs an aiming module to fire")]
    ModuleRequired(EntityId),
    #[error("launcher {0} has no rockets loaded")]
    NoRockets(EntityId),
    #[error("module slot of launcher {0} is locked")]
    SlotLocked(EntityId),
}

/// Contents of a launcher's aiming module slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModuleSlot {
    /// Number of module items in the slot
    pub items: u32,
    /// Whether players are prevented from taking the item out
    pub locked: bool,
}

impl ModuleSlot {
    pub fn is_occupied(&self) -> bool {
        self.items > 0
    }
}

/// Callbacks the host raises for the rules to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    EntitySpawned { id: EntityId, kind: EntityKind },
    EntityDestroyed(EntityId),
    FireStarted(EntityId),
    RocketFired(EntityId),
    FiringEnded(EntityId),
}

/// Mutations the rules may request from the host
pub trait LauncherHost {
    /// Every launcher currently spawned
    fn launchers(&self) -> Vec<EntityId>;

    /// Stack size of the rocket container
    fn container_capacity(&self, launcher: EntityId) -> Result<u32, HostError>;
    fn set_container_capacity(&mut self, launcher: EntityId, capacity: u32) -> Result<(), HostError>;

    /// Rockets left in the launcher's current engagement
    fn rockets_remaining(&self, launcher: EntityId) -> Result<u32, HostError>;
    fn set_rockets_remaining(&mut self, launcher: EntityId, rockets: u32) -> Result<(), HostError>;

    /// `None` tells the host the engagement is spent
    fn set_next_rocket_index(&mut self, launcher: EntityId, index: Option<u32>) -> Result<(), HostError>;

    /// Delay between launches within an engagement
    fn set_launch_interval(&mut self, launcher: EntityId, interval: Duration) -> Result<(), HostError>;

    fn module_slot(&self, launcher: EntityId) -> Result<ModuleSlot, HostError>;
    fn insert_aiming_module(&mut self, launcher: EntityId) -> Result<(), HostError>;
    /// Empty the slot regardless of its lock
    fn remove_aiming_module(&mut self, launcher: EntityId) -> Result<(), HostError>;
    fn set_module_slot_locked(&mut self, launcher: EntityId, locked: bool) -> Result<(), HostError>;

    /// Server-wide broken-down cooldown after a barrage
    fn set_cooldown_minutes(&mut self, minutes: f64);
}
