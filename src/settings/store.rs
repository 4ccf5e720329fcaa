//! Settings store for reading and writing the settings file

use super::types::{Settings, SettingsError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";
const APP_DIR: &str = "relaamo";

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        SettingsStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<config dir>/relaamo/settings.json`, or `./settings.json` when the
    /// platform has no config directory
    pub fn default_location() -> Self {
        let path = dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        Self::new(path)
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings, falling back to `defaults`
    ///
    /// - Missing file: defaults are written out and returned
    /// - Corrupt or unreadable file: defaults are returned, file left alone
    /// - Missing fields: filled in from `defaults`
    pub fn load(&self, defaults: &Settings) -> Settings {
        if !self.path.exists() {
            let settings = defaults.clone().normalized();
            if let Err(e) = self.save(&settings) {
                tracing::warn!("Failed to write default settings to {}: {}", self.path.display(), e);
            }
            return settings;
        }

        match self.try_load(defaults) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", self.path.display());
                settings
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load settings from {}: {}. Using defaults.",
                    self.path.display(),
                    e
                );
                defaults.clone().normalized()
            }
        }
    }

    /// Reads the file, overlaying its fields on `defaults`
    pub fn try_load(&self, defaults: &Settings) -> Result<Settings, SettingsError> {
        let json = fs::read_to_string(&self.path)?;
        let stored: Value = serde_json::from_str(&json)?;
        let Value::Object(stored) = stored else {
            return Err(SettingsError::NotAnObject);
        };

        let mut merged = serde_json::to_value(defaults)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(stored);
        }

        let settings: Settings = serde_json::from_value(merged)?;
        Ok(settings.normalized())
    }

    /// Writes settings as pretty-printed JSON, creating the directory if needed
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let settings = settings.clone().normalized();
        let json = serde_json::to_string_pretty(&settings)?;
        fs::write(&self.path, json)?;

        tracing::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("nested").join("settings.json"))
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let defaults = Settings::with_screen_size(1280, 720);

        let loaded = store.load(&defaults);

        assert_eq!(loaded, defaults);
        assert!(store.path().exists());
        assert_eq!(store.try_load(&Settings::default()).unwrap(), defaults);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        let loaded = store.load(&Settings::default());

        assert_eq!(loaded, Settings::default());
        assert!(loaded.fullscreen);
        // Corrupt file is left for the user to inspect
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_non_object_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        assert!(matches!(
            store.try_load(&Settings::default()),
            Err(SettingsError::NotAnObject)
        ));
        assert_eq!(store.load(&Settings::default()), Settings::default());
    }

    #[test]
    fn test_missing_fields_are_backfilled() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{ "language": "en", "music_volume": 0.2 }"#).unwrap();

        let loaded = store.load(&Settings::default());

        assert_eq!(loaded.language, "en");
        assert_eq!(loaded.music_volume, 0.2);
        assert_eq!(loaded.sfx_volume, 0.7);
        assert_eq!(loaded.screen_width, 1920);
    }

    #[test]
    fn test_fullscreen_forced_on_load_and_save() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut settings = Settings::default();
        settings.fullscreen = false;
        store.save(&settings).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["fullscreen"], Value::Bool(true));

        fs::write(store.path(), r#"{ "fullscreen": false }"#).unwrap();
        assert!(store.load(&Settings::default()).fullscreen);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let settings = Settings {
            language: "en".to_string(),
            music_volume: 0.3,
            sfx_volume: 1.0,
            ..Settings::default()
        };
        store.save(&settings).unwrap();

        assert_eq!(store.load(&Settings::default()), settings);
    }

    #[test]
    fn test_out_of_range_volume_is_clamped() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{ "music_volume": 3.0, "sfx_volume": -1.0 }"#).unwrap();

        let loaded = store.load(&Settings::default());
        assert_eq!(loaded.music_volume, 1.0);
        assert_eq!(loaded.sfx_volume, 0.0);
    }
}
