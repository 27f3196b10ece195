//! Rule table deciding what happens to a rocket hit

use super::event::DamageEvent;
use crate::config::Settings;
use crate::types::Victim;
use serde::{Deserialize, Serialize};

/// Victim categories for authorization. Exactly one applies to any victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictimCategory {
    Player,
    /// Server-controlled characters and animals
    Npc,
    /// Structures with no owner: abandoned and raidable bases
    UnownedStructure,
    OwnedStructure,
}

impl VictimCategory {
    /// Characters are sorted by kind first. A character can carry an owner id,
    /// so ownership only decides between the two structure categories.
    pub fn classify(victim: &Victim) -> Self {
        if victim.kind.is_character() {
            if victim.kind.is_npc() {
                VictimCategory::Npc
            } else {
                VictimCategory::Player
            }
        } else if victim.owner.is_none() {
            VictimCategory::UnownedStructure
        } else {
            VictimCategory::OwnedStructure
        }
    }

    /// Whether the settings allow rocket damage against this category
    pub fn allowed(&self, settings: &Settings) -> bool {
        match self {
            VictimCategory::Player => settings.allow_player_damage,
            VictimCategory::Npc => settings.allow_npc_damage,
            VictimCategory::UnownedStructure => settings.allow_unowned_structure_damage,
            VictimCategory::OwnedStructure => settings.allow_owned_structure_damage,
        }
    }

    pub fn all() -> &'static [VictimCategory] {
        &[
            VictimCategory::Player,
            VictimCategory::Npc,
            VictimCategory::UnownedStructure,
            VictimCategory::OwnedStructure,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            VictimCategory::Player => "Players",
            VictimCategory::Npc => "NPCs",
            VictimCategory::UnownedStructure => "Raidable/Abandoned Bases",
            VictimCategory::OwnedStructure => "Player Bases",
        }
    }
}

/// Outcome of the damage hook
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Authorization {
    /// Let the hit through after scaling every component by the multiplier
    ScaleAndAllow(f64),
    /// Suppress the hit entirely
    Deny,
    /// Not a rocket hit, or not enough information: host default applies
    NoOpinion,
}

impl Authorization {
    pub fn is_denied(&self) -> bool {
        matches!(self, Authorization::Deny)
    }
}

/// Decide what happens to a hit. First matching rule wins:
/// 1. modifier at or below zero denies everything
/// 2. players
/// 3. NPCs and animals
/// 4. structures without an owner
/// 5. owned structures
pub fn authorize(settings: &Settings, event: &DamageEvent) -> Authorization {
    let Some(victim) = event.victim.as_ref() else {
        return Authorization::NoOpinion;
    };
    if !event.is_rocket() {
        return Authorization::NoOpinion;
    }

    if settings.damage_disabled() {
        return Authorization::Deny;
    }

    if VictimCategory::classify(victim).allowed(settings) {
        Authorization::ScaleAndAllow(settings.damage_modifier)
    } else {
        Authorization::Deny
    }
}

/// Apply an authorization to the event payload. Only an allow mutates the
/// event; suppressing a denied hit is the host's job.
pub fn apply(event: &mut DamageEvent, authorization: &Authorization) {
    if let Authorization::ScaleAndAllow(multiplier) = authorization {
        event.damage.scale_all(*multiplier as f32);
    }
}
