//! Core types shared by the damage, fire and host layers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an entity owned by the host server
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id)
    }
}

/// Ownership identifier carried by every host entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OwnerId(pub u64);

impl OwnerId {
    /// No owner: abandoned, neutral and event-spawned entities
    pub const NONE: OwnerId = OwnerId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

/// Host entity categories the rules care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Character controlled by a connected player
    Player,
    /// Character controlled by the server (scientists, bandits, ...)
    NpcPlayer,
    /// Wildlife
    Animal,
    /// Building blocks, deployables, doors
    Structure,
    /// The MLRS vehicle itself
    RocketLauncher,
    Other,
}

impl EntityKind {
    /// Characters are classified before ownership is considered
    pub fn is_character(&self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::NpcPlayer | EntityKind::Animal)
    }

    /// Server-controlled characters, animals included
    pub fn is_npc(&self) -> bool {
        matches!(self, EntityKind::NpcPlayer | EntityKind::Animal)
    }

    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Player,
            EntityKind::NpcPlayer,
            EntityKind::Animal,
            EntityKind::Structure,
            EntityKind::RocketLauncher,
            EntityKind::Other,
        ]
    }
}

/// The entity on the receiving end of a damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victim {
    pub id: EntityId,
    pub kind: EntityKind,
    #[serde(default)]
    pub owner: OwnerId,
}

impl Victim {
    pub fn new(id: EntityId, kind: EntityKind, owner: OwnerId) -> Self {
        Victim { id, kind, owner }
    }
}
