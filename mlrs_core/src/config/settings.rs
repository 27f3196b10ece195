//! Administrator-tunable rule settings

use super::constants::INTERVAL_CAUTION_THRESHOLD;
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// On-disk layout: every setting lives under one named section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(rename = "MLRS Settings", default)]
    pub settings: Settings,
}

/// Tunable rules for the MLRS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Multiplier applied to every rocket hit. Zero or below disables rocket damage.
    #[serde(rename = "MLRS Damage Modifier", default = "default_damage_modifier")]
    pub damage_modifier: f64,

    #[serde(rename = "Allow Damage to Players", default = "default_true")]
    pub allow_player_damage: bool,

    #[serde(rename = "Allow Damage to Player Built Bases", default = "default_true")]
    pub allow_owned_structure_damage: bool,

    #[serde(
        rename = "Allow Damage to Raidable and Abandoned Bases",
        default = "default_true"
    )]
    pub allow_unowned_structure_damage: bool,

    #[serde(rename = "Allow Damage to NPCs", default = "default_true")]
    pub allow_npc_damage: bool,

    /// Forwarded to the host's broken-down timer, not enforced here
    #[serde(rename = "MLRS Cooldown time (in minutes)", default = "default_cooldown")]
    pub cooldown_minutes: f64,

    /// Rockets per engagement
    #[serde(rename = "Total Rockets for MLRS to fire", default = "default_rocket_capacity")]
    pub rocket_capacity: u32,

    #[serde(
        rename = "Seconds between rocket launches",
        default = "default_launch_interval"
    )]
    pub launch_interval_seconds: f64,

    #[serde(rename = "Require Aiming Module", default = "default_true")]
    pub require_aiming_module: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            damage_modifier: default_damage_modifier(),
            allow_player_damage: true,
            allow_owned_structure_damage: true,
            allow_unowned_structure_damage: true,
            allow_npc_damage: true,
            cooldown_minutes: default_cooldown(),
            rocket_capacity: default_rocket_capacity(),
            launch_interval_seconds: default_launch_interval(),
            require_aiming_module: true,
        }
    }
}

fn default_damage_modifier() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}
fn default_cooldown() -> f64 {
    10.0
}
fn default_rocket_capacity() -> u32 {
    12
}
fn default_launch_interval() -> f64 {
    0.5
}

/// Zero or more seconds, and small enough to become a `Duration`
pub fn launch_interval_in_range(seconds: f64) -> bool {
    Duration::try_from_secs_f64(seconds).is_ok()
}

impl Settings {
    /// Stack size for the rocket container. The container holds two stacks.
    pub fn container_capacity(&self) -> u32 {
        self.rocket_capacity / 2
    }

    /// Global kill-switch for rocket damage
    pub fn damage_disabled(&self) -> bool {
        self.damage_modifier <= 0.0
    }

    /// Saturates at `Duration::MAX` for intervals too long to represent
    pub fn launch_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.launch_interval_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Intervals this short are allowed but may outrun the host's projectile tracking
    pub fn interval_needs_caution(&self) -> bool {
        self.launch_interval_seconds < INTERVAL_CAUTION_THRESHOLD
    }

    /// Reject values no code path can act on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.damage_modifier.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "damage modifier must be a finite number, got {}",
                self.damage_modifier
            )));
        }
        if !self.cooldown_minutes.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "cooldown must be a finite number, got {}",
                self.cooldown_minutes
            )));
        }
        if !launch_interval_in_range(self.launch_interval_seconds) {
            return Err(ConfigError::ValidationError(format!(
                "launch interval must be zero or more seconds and fit a duration, got {}",
                self.launch_interval_seconds
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!((settings.damage_modifier - 1.0).abs() < f64::EPSILON);
        assert!((settings.cooldown_minutes - 10.0).abs() < f64::EPSILON);
        assert_eq!(settings.rocket_capacity, 12);
        assert!((settings.launch_interval_seconds - 0.5).abs() < f64::EPSILON);
        assert!(settings.allow_player_damage);
        assert!(settings.allow_owned_structure_damage);
        assert!(settings.allow_unowned_structure_damage);
        assert!(settings.allow_npc_damage);
        assert!(settings.require_aiming_module);
    }

    #[test]
    fn test_container_capacity_halves() {
        let mut settings = Settings::default();
        assert_eq!(settings.container_capacity(), 6);

        settings.rocket_capacity = 25;
        assert_eq!(settings.container_capacity(), 12);

        settings.rocket_capacity = 1;
        assert_eq!(settings.container_capacity(), 0);
    }

    #[test]
    fn test_parse_partial_json_fills_defaults() {
        let json = r#"{
  "MLRS Settings": {
    "MLRS Damage Modifier": 0.25,
    "Allow Damage to Players": false
  }
}"#;
        let file: SettingsFile = serde_json::from_str(json).unwrap();
        assert!((file.settings.damage_modifier - 0.25).abs() < f64::EPSILON);
        assert!(!file.settings.allow_player_damage);
        assert_eq!(file.settings.rocket_capacity, 12);
        assert!(file.settings.require_aiming_module);
    }

    #[test]
    fn test_parse_toml_section() {
        let toml = r#"
["MLRS Settings"]
"MLRS Damage Modifier" = 2.0
"Total Rockets for MLRS to fire" = 24
"Require Aiming Module" = false
"#;
        let file: SettingsFile = toml::from_str(toml).unwrap();
        assert!((file.settings.damage_modifier - 2.0).abs() < f64::EPSILON);
        assert_eq!(file.settings.rocket_capacity, 24);
        assert!(!file.settings.require_aiming_module);
    }

    #[test]
    fn test_missing_section_is_default() {
        let file: SettingsFile = serde_json::from_str("{}").unwrap();
        assert_eq!(file.settings, Settings::default());
    }

    #[test]
    fn test_validate_rejects_negative_interval() {
        let mut settings = Settings::default();
        settings.launch_interval_seconds = -1.0;
        assert!(matches!(settings.validate(), Err(ConfigError::ValidationError(_))));

        settings.launch_interval_seconds = 0.0;
        assert!(settings.validate().is_ok());
        assert!(settings.interval_needs_caution());
    }

    #[test]
    fn test_validate_rejects_unrepresentable_interval() {
        let mut settings = Settings::default();
        settings.launch_interval_seconds = 1e300;
        assert!(matches!(settings.validate(), Err(ConfigError::ValidationError(_))));

        settings.launch_interval_seconds = u64::MAX as f64 * 2.0;
        assert!(settings.validate().is_err());

        settings.launch_interval_seconds = 86_400.0;
        assert!(settings.validate().is_ok());
        assert_eq!(settings.launch_interval(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_launch_interval_saturates() {
        let settings = Settings {
            launch_interval_seconds: 1e300,
            ..Settings::default()
        };
        assert_eq!(settings.launch_interval(), Duration::MAX);
    }

    #[test]
    fn test_large_modifier_and_cooldown_are_valid() {
        let settings = Settings {
            damage_modifier: 1e300,
            cooldown_minutes: 1e300,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
        assert!(!settings.damage_disabled());
    }

    proptest! {
        #[test]
        fn prop_accepted_interval_converts(seconds in proptest::num::f64::ANY) {
            let settings = Settings {
                launch_interval_seconds: seconds,
                ..Settings::default()
            };
            if settings.validate().is_ok() {
                let interval = settings.launch_interval();
                prop_assert!((interval.as_secs_f64() - seconds).abs() <= seconds * 1e-9 + 1e-9);
            }
        }
    }

    #[test]
    fn test_kill_switch() {
        let mut settings = Settings::default();
        assert!(!settings.damage_disabled());
        settings.damage_modifier = 0.0;
        assert!(settings.damage_disabled());
        settings.damage_modifier = -3.0;
        assert!(settings.damage_disabled());
    }
}
