//! FiringSession - per-launcher engagement state

/// Whether a launcher is mid-barrage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngagementState {
    #[default]
    Idle,
    Engaging,
}

/// Rockets fired during the current engagement of one launcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiringSession {
    pub state: EngagementState,
    pub rockets_fired: u32,
}

impl FiringSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle -> Engaging with a fresh counter
    pub fn begin(&mut self) {
        self.state = EngagementState::Engaging;
        self.rockets_fired = 0;
    }

    /// Count one launch
    pub fn record_launch(&mut self) {
        self.state = EngagementState::Engaging;
        self.rockets_fired = self.rockets_fired.saturating_add(1);
    }

    /// Engaging -> Idle
    pub fn end(&mut self) {
        self.state = EngagementState::Idle;
        self.rockets_fired = 0;
    }

    pub fn is_engaging(&self) -> bool {
        self.state == EngagementState::Engaging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session = FiringSession::new();
        assert!(!session.is_engaging());

        session.begin();
        session.record_launch();
        session.record_launch();
        assert!(session.is_engaging());
        assert_eq!(session.rockets_fired, 2);

        session.end();
        assert_eq!(session.state, EngagementState::Idle);
        assert_eq!(session.rockets_fired, 0);
    }

    #[test]
    fn test_begin_discards_stale_count() {
        let mut session = FiringSession::new();
        session.record_launch();
        session.record_launch();

        session.begin();
        assert_eq!(session.rockets_fired, 0);
    }
}
