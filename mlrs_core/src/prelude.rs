//! Prelude module for convenient imports
//!
//! ```rust
//! use mlrs_core::prelude::*;
//! ```

// Core types
pub use crate::types::{EntityId, EntityKind, OwnerId, Victim};

// Settings
pub use crate::config::{Settings, SettingsStore};

// Damage
pub use crate::damage::{Authorization, DamageEvent, DamageTypes, VictimCategory};

// Host
pub use crate::host::{HostEvent, LauncherHost, SimulatedHost};

// Commands
pub use crate::commands::{Caller, CommandOutcome, Severity};

pub use crate::plugin::MlrsPlugin;
