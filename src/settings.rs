/// Persisted viewer settings: the last descriptor file that loaded.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "ACCELVIEW_CONFIG";

const APP_DIR: &str = "accelview";
const FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Descriptor file loaded most recently.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_file_path: Option<PathBuf>,
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file yet");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing settings in {}", path.display()))
    }

    /// Like [`Settings::load_from`], but logs failures and falls back to the defaults.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            warn!("ignoring unreadable settings: {err:#}");
            Self::default()
        })
    }

    /// Write settings to `path`, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Remember `file` as the last loaded descriptor, saving only on change.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn remember(&mut self, file: &Path, settings_path: &Path) -> Result<()> {
        if self.last_file_path.as_deref() == Some(file) {
            return Ok(());
        }
        self.last_file_path = Some(file.to_path_buf());
        self.save_to(settings_path)
    }
}

/// Settings bound to the file they were read from.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    pub settings: Settings,
}

impl SettingsStore {
    /// Read the settings at `path`, falling back to the defaults.
    #[must_use]
    pub fn open(path: PathBuf) -> Self {
        let settings = Settings::load_or_default(&path);
        Self { path, settings }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn last_file(&self) -> Option<&Path> {
        self.settings.last_file_path.as_deref()
    }

    /// Persist `file` as the last descriptor. Failures are logged, not fatal.
    pub fn remember(&mut self, file: &Path) {
        let absolute = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
        if let Err(err) = self.settings.remember(&absolute, &self.path) {
            warn!("could not save last file path: {err:#}");
        }
    }

    /// Write the current settings again.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.settings.save_to(&self.path)
    }

    /// Forget the remembered descriptor and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn clear(&mut self) -> Result<()> {
        self.settings.last_file_path = None;
        self.save()
    }
}

/// Default settings file: `<config dir>/accelview/settings.json`.
///
/// Falls back to the working directory when the platform has no config dir.
#[must_use]
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            last_file_path: Some(PathBuf::from("/tmp/shortcuts.xml")),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load_from(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"last_file_path":"a.xml","theme":"dark"}"#).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.last_file_path, Some(PathBuf::from("a.xml")));
    }

    #[test]
    fn test_store_remember_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let file = dir.path().join("keys.xml");

        let mut store = SettingsStore::open(path.clone());
        assert!(store.last_file().is_none());
        store.remember(&file);

        let mut reopened = SettingsStore::open(path.clone());
        assert_eq!(reopened.last_file(), Some(file.as_path()));
        reopened.clear().unwrap();
        assert!(SettingsStore::open(path).last_file().is_none());
    }

    #[test]
    fn test_remember_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.remember(Path::new("a.xml"), &path).unwrap();
        assert!(path.exists());
        fs::remove_file(&path).unwrap();
        settings.remember(Path::new("a.xml"), &path).unwrap();
        assert!(!path.exists());
    }
}
