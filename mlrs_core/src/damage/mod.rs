//! Damage authorization for rocket hits

mod authorization;
mod event;

pub use authorization::{apply, authorize, Authorization, VictimCategory};
pub use event::{DamageEvent, DamageType, DamageTypes};
