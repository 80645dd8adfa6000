//! gridcfg settings
//!
//! Provides persisted settings for the import tooling, including:
//! - Console server location
//! - Import defaults (package name, primitive types, built-in keys, cache generation)
//! - Remembered JDBC connection presets

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod preset_store;
mod presets;
mod settings_file;

pub use preset_store::*;
pub use presets::*;
pub use settings_file::*;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridcfgSettings {
    pub server: ServerSettings,
    pub import: ImportDefaults,
}

impl GridcfgSettings {
    /// Load settings from the default location, falling back to defaults when
    /// no settings file exists yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn settings_path() -> Result<PathBuf> {
        config_dir().map(|p| p.join("settings.json"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL of the configuration console
    pub url: String,
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Defaults for the options step of the import wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportDefaults {
    /// Package for generated classes. Empty means derive it from `user_email`.
    pub package_name: String,
    pub user_email: Option<String>,
    pub built_in_keys: bool,
    pub use_primitives: bool,
    pub generate_caches: bool,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            user_email: None,
            built_in_keys: true,
            use_primitives: true,
            generate_caches: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_settings_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = GridcfgSettings::load_from(&dir.path().join("settings.json")).unwrap();

        assert_eq!(settings, GridcfgSettings::default());
        assert!(settings.import.built_in_keys);
        assert!(settings.import.use_primitives);
        assert!(settings.import.generate_caches);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.json");

        let mut settings = GridcfgSettings::default();
        settings.server.url = "https://console.example.com".into();
        settings.import.package_name = "com.example.model".into();
        settings.import.use_primitives = false;
        settings.save_to(&path).unwrap();

        let loaded = GridcfgSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"import": {"packageName": "org.acme"}}"#).unwrap();

        let loaded = GridcfgSettings::load_from(&path).unwrap();
        assert_eq!(loaded.import.package_name, "org.acme");
        assert!(loaded.import.built_in_keys);
        assert_eq!(loaded.server, ServerSettings::default());
    }

    #[test]
    fn test_invalid_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(GridcfgSettings::load_from(&path).is_err());
    }
}
