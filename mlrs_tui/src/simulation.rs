//! Barrage simulation against a victim roster

use mlrs_core::{Authorization, DamageEvent, DamageTypes, MlrsPlugin, Victim, VictimCategory};
use rand::Rng;

/// Outcome of every rocket that landed on one victim category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTally {
    pub category: VictimCategory,
    pub hits: u32,
    pub allowed: u32,
    pub denied: u32,
    /// Hits the rules left alone (damage hook disabled)
    pub unruled: u32,
    pub raw_damage: f64,
    pub dealt_damage: f64,
}

impl CategoryTally {
    fn new(category: VictimCategory) -> Self {
        CategoryTally {
            category,
            hits: 0,
            allowed: 0,
            denied: 0,
            unruled: 0,
            raw_damage: 0.0,
            dealt_damage: 0.0,
        }
    }

    /// Dealt damage as a share of raw damage
    pub fn effective_multiplier(&self) -> f64 {
        if self.raw_damage > 0.0 {
            self.dealt_damage / self.raw_damage
        } else {
            0.0
        }
    }
}

/// Run a barrage of rockets through the damage hook
pub struct BarrageReport {
    pub rockets: u32,
    pub tallies: Vec<CategoryTally>,
}

impl BarrageReport {
    /// Fire `rockets` at random roster members and tally what the rules did
    pub fn run(plugin: &MlrsPlugin, roster: &[Victim], rockets: u32, rng: &mut impl Rng) -> Self {
        let mut report = BarrageReport {
            rockets: 0,
            tallies: VictimCategory::all().iter().copied().map(CategoryTally::new).collect(),
        };
        if roster.is_empty() {
            return report;
        }

        for _ in 0..rockets {
            let victim = roster[rng.gen_range(0..roster.len())];
            let damage = DamageTypes::rocket(rng.gen_range(60.0f32..90.0), rng.gen_range(10.0f32..20.0));
            let mut event = DamageEvent::rocket(victim, damage);
            let raw = event.damage.total() as f64;

            let authorization = plugin.on_entity_take_damage(&mut event);
            let category = VictimCategory::classify(&victim);
            report.rockets += 1;

            if let Some(tally) = report.tallies.iter_mut().find(|t| t.category == category) {
                tally.hits += 1;
                tally.raw_damage += raw;
                match authorization {
                    Authorization::ScaleAndAllow(_) => {
                        tally.allowed += 1;
                        tally.dealt_damage += event.damage.total() as f64;
                    }
                    Authorization::Deny => tally.denied += 1,
                    Authorization::NoOpinion => {
                        tally.unruled += 1;
                        tally.dealt_damage += raw;
                    }
                }
            }
        }

        report
    }

    pub fn tally(&self, category: VictimCategory) -> Option<&CategoryTally> {
        self.tallies.iter().find(|t| t.category == category)
    }

    pub fn total_dealt(&self) -> f64 {
        self.tallies.iter().map(|t| t.dealt_damage).sum()
    }

    /// One console line per category that was hit
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!("Barrage of {} rockets:", self.rockets)];
        for tally in self.tallies.iter().filter(|t| t.hits > 0) {
            lines.push(format!(
                "  {:26} {:3} hits  {:3} allowed  {:3} denied  {:7.1} / {:7.1} dmg (x{:.2})",
                tally.category.name(),
                tally.hits,
                tally.allowed,
                tally.denied,
                tally.dealt_damage,
                tally.raw_damage,
                tally.effective_multiplier()
            ));
        }
        lines
    }
}
