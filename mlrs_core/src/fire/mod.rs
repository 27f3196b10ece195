//! Fire control - rocket capacity and launch cadence per engagement

mod controller;
mod index;
mod session;

pub use controller::{FireController, FireUpdate};
pub use index::{clamp_remaining, next_rocket_index};
pub use session::{EngagementState, FiringSession};
