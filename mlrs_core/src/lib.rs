//! mlrs_core - Rule engine for multi-rocket launcher vehicles
//!
//! This library provides:
//! - Settings: Administrator rules persisted to a flat settings file
//! - Damage Authorization: Per-victim-category allow/deny and scaling of rocket hits
//! - FireController: Rocket capacity and launch index control for barrages
//! - ModuleGate: Keeps the aiming module slot filled when it is not required
//! - MlrsPlugin: Entry points a host server calls into

pub mod commands;
pub mod config;
pub mod damage;
pub mod fire;
pub mod gate;
pub mod host;
pub mod plugin;
pub mod prelude;
pub mod schedule;
pub mod types;

// Re-export core types for convenience
pub use commands::{AdminCommand, Caller, CommandError, CommandOutcome, Severity};
pub use config::{ConfigError, Settings, SettingsStore};
pub use damage::{Authorization, DamageEvent, DamageType, DamageTypes, VictimCategory};
pub use fire::{next_rocket_index, FireController, FireUpdate};
pub use gate::ModuleGate;
pub use host::{HostError, HostEvent, LauncherHost, ModuleSlot, SimulatedHost};
pub use plugin::MlrsPlugin;
pub use schedule::{Delay, Task, TaskQueue};
pub use types::{EntityId, EntityKind, OwnerId, Victim};
