//! Rocket index arithmetic
//!
//! The host walks a fixed 12-slot rocket index down to zero and stops.
//! Loads larger than one batch keep the index cycling inside `1..=11`
//! so the host never reaches the end of its range early.

use crate::config::{INDEX_CYCLE, NATIVE_ROCKET_BATCH};

/// Index of the next rocket to launch, or `None` once the load is spent
/// (the host's `-1`).
///
/// - more than 12 remaining: `(remaining % 11) + 1`
/// - otherwise: `remaining - 1`
pub fn next_rocket_index(remaining: u32) -> Option<u32> {
    if remaining > NATIVE_ROCKET_BATCH {
        Some(remaining % INDEX_CYCLE + 1)
    } else {
        remaining.checked_sub(1)
    }
}

/// Rockets that may still fire this engagement
pub fn clamp_remaining(loaded: u32, capacity: u32, fired: u32) -> u32 {
    loaded.min(capacity.saturating_sub(fired))
}
