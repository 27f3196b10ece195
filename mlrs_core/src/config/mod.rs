//! Configuration loading and persistence

mod constants;
mod settings;
mod store;

pub use constants::*;
pub use settings::{launch_interval_in_range, Settings, SettingsFile};
pub use store::{SettingsFormat, SettingsStore};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to write TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a JSON string and deserialize it
pub fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = serde_json::from_str(content)?;
    Ok(config)
}

pub fn to_toml<T: serde::Serialize>(value: &T) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(value)?)
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_toml_file() {
        let path = std::env::temp_dir().join(format!("mlrs_load_{}.toml", std::process::id()));
        fs::write(&path, "[\"MLRS Settings\"]\n\"Allow Damage to NPCs\" = false\n").unwrap();

        let file: SettingsFile = load_toml(&path).unwrap();
        assert!(!file.settings.allow_npc_damage);
        assert_eq!(file.settings.rocket_capacity, 12);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_toml_missing_file() {
        let result: Result<SettingsFile, _> = load_toml(Path::new("/nonexistent/mlrs.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_json_round_trip_keeps_key_names() {
        let json = to_json(&SettingsFile::default()).unwrap();
        assert!(json.contains("\"MLRS Cooldown time (in minutes)\""));
        assert!(json.contains("\"Seconds between rocket launches\""));

        let parsed: SettingsFile = parse_json(&json).unwrap();
        assert_eq!(parsed, SettingsFile::default());
    }
}
