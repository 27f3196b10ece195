//! Aiming module gate
//!
//! With the module requirement switched off, every launcher's module slot
//! is kept filled and locked so the host's own requirement is always met.

use crate::host::{HostError, LauncherHost};
use crate::types::EntityId;
use std::collections::BTreeSet;

/// Launchers whose module slot this plugin filled
#[derive(Debug, Clone, Default)]
pub struct ModuleGate {
    armed: BTreeSet<EntityId>,
}

impl ModuleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill and lock the slot. Safe to repeat: a filled slot is only locked.
    pub fn arm<H: LauncherHost + ?Sized>(&mut self, host: &mut H, launcher: EntityId) -> Result<(), HostError> {
        let slot = host.module_slot(launcher)?;
        if !slot.is_occupied() {
            host.insert_aiming_module(launcher)?;
            self.armed.insert(launcher);
        }
        if !slot.locked {
            host.set_module_slot_locked(launcher, true)?;
        }
        Ok(())
    }

    /// Unlock the slot, taking the module back out only if we put it there
    pub fn release<H: LauncherHost + ?Sized>(&mut self, host: &mut H, launcher: EntityId) -> Result<(), HostError> {
        let inserted = self.armed.remove(&launcher);
        host.set_module_slot_locked(launcher, false)?;
        if inserted {
            host.remove_aiming_module(launcher)?;
        }
        Ok(())
    }

    /// Release every launcher we know of, skipping ones that are gone
    pub fn release_all<H: LauncherHost + ?Sized>(&mut self, host: &mut H) {
        for launcher in host.launchers() {
            if let Err(e) = self.release(host, launcher) {
                log::debug!("Could not release module slot of {}: {}", launcher, e);
            }
        }
        self.armed.clear();
    }

    pub fn is_armed(&self, launcher: EntityId) -> bool {
        self.armed.contains(&launcher)
    }

    pub fn forget(&mut self, launcher: EntityId) {
        self.armed.remove(&launcher);
    }

    pub fn clear(&mut self) {
        self.armed.clear();
    }
}
