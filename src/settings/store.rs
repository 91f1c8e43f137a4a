//! Settings persistence
//!
//! Reads and writes the splitter settings as a JSON file, standing in for
//! the host's settings storage. Missing files yield defaults; persisted
//! values outside the field bounds are rejected on load.

use super::schema::{SplitterConfig, SplitterSettings};
use crate::utils::error::SplitterResult;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-file-backed settings storage
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file is absent
    pub fn load(&self) -> SplitterResult<SplitterSettings> {
        if !self.path.exists() {
            tracing::debug!("No settings file at {:?}, using defaults", self.path);
            return Ok(SplitterSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let settings: SplitterSettings = serde_json::from_str(&content)?;
        settings.fields()?;

        tracing::debug!("Loaded settings from {:?}", self.path);
        Ok(settings)
    }

    /// Load settings and convert them to a runtime configuration
    pub fn load_config(&self) -> SplitterResult<SplitterConfig> {
        Ok(self.load()?.config()?)
    }

    /// Write settings, creating parent directories as needed
    pub fn save(&self, settings: &SplitterSettings) -> SplitterResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;

        tracing::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        let settings = store.load().unwrap();
        assert_eq!(settings, SplitterSettings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));

        let settings = SplitterSettings {
            enabled: true,
            interval_s: 30,
            interval_m: 5,
            interval_h: 2,
        };
        store.save(&settings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, settings);

        let config = store.load_config().unwrap();
        assert!(config.enabled);
        assert_eq!(config.interval, Duration::from_secs(30 + 5 * 60 + 2 * 3600));
    }

    #[test]
    fn out_of_range_persisted_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"enabled":true,"intervalS":0,"intervalM":99,"intervalH":0}"#,
        )
        .unwrap();

        assert!(SettingsStore::new(&path).load().is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(SettingsStore::new(&path).load().is_err());
    }
}
