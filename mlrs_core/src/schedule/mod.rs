//! Deferred work
//!
//! Some mutations cannot run inside the callback that triggers them: a
//! freshly spawned launcher finishes its own setup after the spawn event,
//! and the host clears a launcher's inventory after firing ends. Such work
//! is queued here and drained by the host's tick. A task is never due in
//! the tick that scheduled it: the first `tick` call after scheduling only
//! marks it as seen, and its delay starts counting from the next one.

use crate::types::EntityId;
use std::time::Duration;

/// Work to perform against a launcher later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Push the configured container capacity to the launcher
    ApplyContainerCapacity(EntityId),
    /// Refill and lock the aiming module slot
    RearmModule(EntityId),
}

impl Task {
    pub fn launcher(&self) -> EntityId {
        match self {
            Task::ApplyContainerCapacity(id) | Task::RearmModule(id) => *id,
        }
    }
}

/// When a queued task becomes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    /// The host tick after the current one
    NextTick,
    /// Once this much game time has passed after the current tick
    After(Duration),
}

#[derive(Debug, Clone)]
struct Pending {
    task: Task,
    remaining: Duration,
    /// Scheduled since the last tick
    fresh: bool,
}

/// Tasks waiting for their delay to pass
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    pending: Vec<Pending>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Delay, task: Task) {
        let remaining = match delay {
            Delay::NextTick => Duration::ZERO,
            Delay::After(d) => d,
        };
        self.pending.push(Pending {
            task,
            remaining,
            fresh: true,
        });
    }

    /// Advance by one host tick of `elapsed` game time and return the tasks
    /// that became due, in the order they were scheduled.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<Task> {
        let mut due = Vec::new();
        self.pending.retain_mut(|pending| {
            if pending.fresh {
                pending.fresh = false;
                return true;
            }
            pending.remaining = pending.remaining.saturating_sub(elapsed);
            if pending.remaining.is_zero() {
                due.push(pending.task);
                false
            } else {
                true
            }
        });
        due
    }

    /// Drop every task aimed at a launcher
    pub fn cancel_for(&mut self, launcher: EntityId) {
        self.pending.retain(|pending| pending.task.launcher() != launcher);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
