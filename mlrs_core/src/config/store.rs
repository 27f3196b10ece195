//! SettingsStore - load, mutate and persist the rule settings

use super::settings::{Settings, SettingsFile};
use super::{parse_json, parse_toml, to_json, to_toml, ConfigError};
use std::fs;
use std::path::{Path, PathBuf};

/// File format of the persisted settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Toml,
    /// The host's native plugin config format
    Json,
}

impl SettingsFormat {
    /// `.toml` files are TOML, everything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SettingsFormat::Toml,
            _ => SettingsFormat::Json,
        }
    }
}

/// Owns the current settings and writes them back after every change
#[derive(Debug, Clone)]
pub struct SettingsStore {
    settings: Settings,
    path: Option<PathBuf>,
    format: SettingsFormat,
}

impl SettingsStore {
    /// A store that never touches disk
    pub fn in_memory(settings: Settings) -> Self {
        SettingsStore {
            settings,
            path: None,
            format: SettingsFormat::Json,
        }
    }

    /// Open a settings file, writing defaults if it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut store = Self::unloaded(path.as_ref());
        store.reload()?;
        Ok(store)
    }

    /// Open a settings file, falling back to defaults on failure.
    ///
    /// The broken file is left alone; it is only overwritten once a
    /// command successfully changes a setting.
    pub fn open_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::open(path.as_ref()) {
            Ok(store) => (store, None),
            Err(e) => (Self::unloaded(path.as_ref()), Some(e)),
        }
    }

    fn unloaded(path: &Path) -> Self {
        SettingsStore {
            settings: Settings::default(),
            path: Some(path.to_path_buf()),
            format: SettingsFormat::from_path(path),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> SettingsFormat {
        self.format
    }

    /// Re-read the file. On failure the current settings are kept.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };

        if !path.exists() {
            log::info!("Loading default config");
            self.settings = Settings::default();
            return self.save();
        }

        let content = fs::read_to_string(&path)?;
        let file: SettingsFile = match self.format {
            SettingsFormat::Toml => parse_toml(&content)?,
            SettingsFormat::Json => parse_json(&content)?,
        };
        file.settings.validate()?;
        self.settings = file.settings;

        // Rewrite so keys added since the file was created show up
        self.save()
    }

    /// Write the current settings to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let file = SettingsFile {
            settings: self.settings.clone(),
        };
        let content = match self.format {
            SettingsFormat::Toml => to_toml(&file)?,
            SettingsFormat::Json => to_json(&file)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply a change and persist it. Nothing changes if validation or saving fails.
    pub fn update<F>(&mut self, change: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut next = self.settings.clone();
        change(&mut next);
        next.validate()?;

        let previous = std::mem::replace(&mut self.settings, next);
        if let Err(e) = self.save() {
            self.settings = previous;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mlrs_store_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SettingsFormat::from_path(Path::new("a/MLRSDamage.toml")), SettingsFormat::Toml);
        assert_eq!(SettingsFormat::from_path(Path::new("a/MLRSDamage.TOML")), SettingsFormat::Toml);
        assert_eq!(SettingsFormat::from_path(Path::new("a/MLRSDamage.json")), SettingsFormat::Json);
        assert_eq!(SettingsFormat::from_path(Path::new("MLRSDamage")), SettingsFormat::Json);
    }

    #[test]
    fn test_open_missing_file_writes_defaults() {
        let path = temp_path("defaults.json");
        let _ = fs::remove_file(&path);

        let store = SettingsStore::open(&path).unwrap();
        assert_eq!(store.settings(), &Settings::default());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("MLRS Settings"));
        assert!(written.contains("Total Rockets for MLRS to fire"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_update_persists_immediately() {
        let path = temp_path("update.toml");
        let _ = fs::remove_file(&path);

        let mut store = SettingsStore::open(&path).unwrap();
        store.update(|s| s.rocket_capacity = 30).unwrap();

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.settings().rocket_capacity, 30);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_update_rejects_invalid_without_mutation() {
        let mut store = SettingsStore::in_memory(Settings::default());
        let result = store.update(|s| s.launch_interval_seconds = -0.5);

        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        assert!((store.settings().launch_interval_seconds - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_open_rejects_interval_out_of_range() {
        let path = temp_path("huge_interval.json");
        fs::write(&path, "{ \"MLRS Settings\": { \"Seconds between rocket launches\": 1e300 } }").unwrap();

        assert!(matches!(SettingsStore::open(&path), Err(ConfigError::ValidationError(_))));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_open_or_default_keeps_broken_file() {
        let path = temp_path("broken.json");
        fs::write(&path, "{ \"MLRS Settings\": { \"MLRS Damage Modifier\": \"lots\" } }").unwrap();

        let (store, error) = SettingsStore::open_or_default(&path);
        assert!(matches!(error, Some(ConfigError::JsonError(_))));
        assert_eq!(store.settings(), &Settings::default());

        let untouched = fs::read_to_string(&path).unwrap();
        assert!(untouched.contains("lots"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_reload_fills_new_keys() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "MLRS Settings": { "MLRS Damage Modifier": 3.0 } }"#).unwrap();

        let store = SettingsStore::open(&path).unwrap();
        assert!((store.settings().damage_modifier - 3.0).abs() < f64::EPSILON);

        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("Require Aiming Module"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let store = SettingsStore::in_memory(Settings::default());
        assert!(store.path().is_none());
        assert!(store.save().is_ok());
    }
}
