//! DamageEvent - An inbound hit reported by the host

use crate::config::ROCKET_PREFAB;
use crate::types::Victim;
use serde::{Deserialize, Serialize};

/// Damage components carried by a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Explosion,
    Heat,
    Blunt,
    Generic,
}

/// Per-type damage amounts of a single hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageTypes {
    amounts: Vec<(DamageType, f32)>,
}

impl DamageTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typical MLRS rocket hit: mostly explosive with some blunt force
    pub fn rocket(explosion: f32, blunt: f32) -> Self {
        DamageTypes::new()
            .with(DamageType::Explosion, explosion)
            .with(DamageType::Blunt, blunt)
    }

    pub fn with(mut self, damage_type: DamageType, amount: f32) -> Self {
        self.add(damage_type, amount);
        self
    }

    /// Add damage of a type
    pub fn add(&mut self, damage_type: DamageType, amount: f32) {
        if let Some(existing) = self.amounts.iter_mut().find(|(t, _)| *t == damage_type) {
            existing.1 += amount;
        } else {
            self.amounts.push((damage_type, amount));
        }
    }

    pub fn get(&self, damage_type: DamageType) -> f32 {
        self.amounts
            .iter()
            .filter(|(t, _)| *t == damage_type)
            .map(|(_, amount)| amount)
            .sum()
    }

    /// Sum of all damage types
    pub fn total(&self) -> f32 {
        self.amounts.iter().map(|(_, amount)| amount).sum()
    }

    /// Multiply every component
    pub fn scale_all(&mut self, multiplier: f32) {
        for (_, amount) in &mut self.amounts {
            *amount *= multiplier;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(DamageType, f32)> {
        self.amounts.iter()
    }
}

/// A hit as seen by the damage hook.
///
/// References the host could not resolve are `None`; such events are
/// never acted on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Short prefab name of the weapon or projectile that dealt the hit
    pub weapon_prefab: Option<String>,
    pub victim: Option<Victim>,
    pub damage: DamageTypes,
}

impl DamageEvent {
    pub fn new(weapon_prefab: impl Into<String>, victim: Victim, damage: DamageTypes) -> Self {
        DamageEvent {
            weapon_prefab: Some(weapon_prefab.into()),
            victim: Some(victim),
            damage,
        }
    }

    /// A hit from an MLRS rocket
    pub fn rocket(victim: Victim, damage: DamageTypes) -> Self {
        Self::new(ROCKET_PREFAB, victim, damage)
    }

    pub fn is_rocket(&self) -> bool {
        self.weapon_prefab.as_deref() == Some(ROCKET_PREFAB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityId, EntityKind, OwnerId};

    #[test]
    fn test_add_merges_types() {
        let mut damage = DamageTypes::rocket(100.0, 20.0);
        damage.add(DamageType::Explosion, 50.0);

        assert!((damage.get(DamageType::Explosion) - 150.0).abs() < f32::EPSILON);
        assert!((damage.total() - 170.0).abs() < f32::EPSILON);
        assert_eq!(damage.iter().count(), 2);
    }

    #[test]
    fn test_scale_all() {
        let mut damage = DamageTypes::rocket(100.0, 20.0).with(DamageType::Heat, 10.0);
        damage.scale_all(0.5);

        assert!((damage.get(DamageType::Explosion) - 50.0).abs() < f32::EPSILON);
        assert!((damage.get(DamageType::Blunt) - 10.0).abs() < f32::EPSILON);
        assert!((damage.get(DamageType::Heat) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_is_rocket() {
        let victim = Victim::new(EntityId(1), EntityKind::Player, OwnerId::NONE);
        assert!(DamageEvent::rocket(victim, DamageTypes::new()).is_rocket());
        assert!(!DamageEvent::new("rocket_basic", victim, DamageTypes::new()).is_rocket());

        let orphan = DamageEvent {
            weapon_prefab: None,
            victim: Some(victim),
            damage: DamageTypes::new(),
        };
        assert!(!orphan.is_rocket());
    }
}
