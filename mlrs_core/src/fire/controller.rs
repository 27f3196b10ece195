//! FireController - turns the configured capacity into a bounded barrage

use super::index::{clamp_remaining, next_rocket_index};
use super::session::FiringSession;
use crate::types::EntityId;
use std::collections::HashMap;

/// Launcher state the host should adopt after a fire event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireUpdate {
    /// Rockets left to fire this engagement
    pub remaining: u32,
    /// Next index for the host's launch routine, `None` when spent
    pub next_index: Option<u32>,
    /// Rockets fired so far this engagement
    pub fired: u32,
}

impl FireUpdate {
    fn new(remaining: u32, fired: u32) -> Self {
        FireUpdate {
            remaining,
            next_index: next_rocket_index(remaining),
            fired,
        }
    }
}

/// Tracks one firing session per launcher
#[derive(Debug, Clone, Default)]
pub struct FireController {
    sessions: HashMap<EntityId, FiringSession>,
}

impl FireController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire-start: reset the counter and clamp the rockets the host has
    /// available to the capacity
    pub fn begin(&mut self, launcher: EntityId, available: u32, capacity: u32) -> FireUpdate {
        let session = self.sessions.entry(launcher).or_default();
        session.begin();
        FireUpdate::new(clamp_remaining(available, capacity, 0), 0)
    }

    /// Rocket-fired: count the launch and re-clamp so the engagement never
    /// exceeds `capacity` rockets in total.
    ///
    /// A launch without a prior fire-start opens the engagement implicitly.
    pub fn record_launch(&mut self, launcher: EntityId, available: u32, capacity: u32) -> FireUpdate {
        let session = self.sessions.entry(launcher).or_default();
        session.record_launch();
        let fired = session.rockets_fired;
        FireUpdate::new(clamp_remaining(available, capacity, fired), fired)
    }

    /// Firing-ended: back to idle with a zero counter
    pub fn end(&mut self, launcher: EntityId) {
        self.sessions.entry(launcher).or_default().end();
    }

    pub fn session(&self, launcher: EntityId) -> Option<&FiringSession> {
        self.sessions.get(&launcher)
    }

    pub fn rockets_fired(&self, launcher: EntityId) -> u32 {
        self.session(launcher).map(|s| s.rockets_fired).unwrap_or(0)
    }

    pub fn is_engaging(&self, launcher: EntityId) -> bool {
        self.session(launcher).is_some_and(|s| s.is_engaging())
    }

    /// Drop state for a launcher that no longer exists
    pub fn forget(&mut self, launcher: EntityId) {
        self.sessions.remove(&launcher);
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAUNCHER: EntityId = EntityId(10);

    #[test]
    fn test_begin_clamps_to_capacity() {
        let mut controller = FireController::new();
        let update = controller.begin(LAUNCHER, 24, 12);

        assert_eq!(update.remaining, 12);
        assert_eq!(update.next_index, Some(11));
        assert_eq!(update.fired, 0);
        assert!(controller.is_engaging(LAUNCHER));
    }

    #[test]
    fn test_large_capacity_cycles_index() {
        let mut controller = FireController::new();
        let update = controller.begin(LAUNCHER, 15, 30);

        assert_eq!(update.remaining, 15);
        assert_eq!(update.next_index, Some(5));
    }

    #[test]
    fn test_launches_never_exceed_capacity() {
        let mut controller = FireController::new();
        let capacity = 12;
        let mut loaded = 40;
        let mut update = controller.begin(LAUNCHER, loaded, capacity);

        let mut launched = 0;
        while update.remaining > 0 {
            loaded -= 1;
            launched += 1;
            update = controller.record_launch(LAUNCHER, loaded, capacity);
            assert!(update.fired + update.remaining <= capacity);
        }

        assert_eq!(launched, capacity);
        assert_eq!(update.next_index, None);
        assert_eq!(controller.rockets_fired(LAUNCHER), capacity);
    }

    #[test]
    fn test_end_resets_and_next_engagement_starts_clean() {
        let mut controller = FireController::new();
        controller.begin(LAUNCHER, 12, 12);
        controller.record_launch(LAUNCHER, 11, 12);
        controller.record_launch(LAUNCHER, 10, 12);
        assert_eq!(controller.rockets_fired(LAUNCHER), 2);

        controller.end(LAUNCHER);
        assert_eq!(controller.rockets_fired(LAUNCHER), 0);
        assert!(!controller.is_engaging(LAUNCHER));

        let update = controller.begin(LAUNCHER, 12, 12);
        assert_eq!(update.fired, 0);
        assert_eq!(update.remaining, 12);
    }

    #[test]
    fn test_launch_without_start_opens_engagement() {
        let mut controller = FireController::new();
        let update = controller.record_launch(LAUNCHER, 7, 12);

        assert_eq!(update.fired, 1);
        assert_eq!(update.remaining, 7);
        assert!(controller.is_engaging(LAUNCHER));
    }

    #[test]
    fn test_sessions_are_per_launcher() {
        let mut controller = FireController::new();
        let other = EntityId(11);

        controller.begin(LAUNCHER, 12, 12);
        controller.record_launch(LAUNCHER, 11, 12);
        controller.begin(other, 12, 12);

        assert_eq!(controller.rockets_fired(LAUNCHER), 1);
        assert_eq!(controller.rockets_fired(other), 0);

        controller.forget(LAUNCHER);
        assert!(controller.session(LAUNCHER).is_none());
    }
}
