//! Host constants the rules are written against

use std::time::Duration;

/// Short prefab name of the projectile fired by the MLRS
pub const ROCKET_PREFAB: &str = "rocket_mlrs";

/// Rockets the host fires per engagement on its own
pub const NATIVE_ROCKET_BATCH: u32 = 12;

/// Width of the host's fixed rocket index range, minus the reserved slot.
/// Indices cycle through `1..=INDEX_CYCLE` once a load exceeds one batch.
pub const INDEX_CYCLE: u32 = 11;

/// Rocket container stack size the host ships with (two stacks, 12 rockets)
pub const NATIVE_CONTAINER_CAPACITY: u32 = 6;

/// Host's own broken-down cooldown, restored on unload
pub const NATIVE_COOLDOWN_MINUTES: f64 = 10.0;

/// Launch intervals below this are accepted with a caution
pub const INTERVAL_CAUTION_THRESHOLD: f64 = 0.1;

/// Wait before re-filling the aiming module slot, so the host's own
/// inventory clearing runs first
pub const MODULE_REARM_DELAY: Duration = Duration::from_millis(1000);

/// Console command namespace
pub const COMMAND_PREFIX: &str = "mlrsdamage";
