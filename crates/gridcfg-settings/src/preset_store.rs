//! Persistent storage for remembered connection presets.
//!
//! Only the JDBC URL and user are remembered per driver class. Passwords are
//! never written. A missing or unreadable store behaves like an empty one.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::presets_file;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredPreset {
    pub jdbc_driver_class: String,
    pub jdbc_url: String,
    pub user: String,
}

/// Lookup and save-or-update of presets by driver class
pub trait PresetStore: Send + Sync {
    fn get(&self, jdbc_driver_class: &str) -> Option<StoredPreset>;

    fn put(&self, preset: StoredPreset) -> Result<()>;
}

fn upsert(entries: &mut Vec<StoredPreset>, preset: StoredPreset) {
    match entries
        .iter_mut()
        .find(|p| p.jdbc_driver_class == preset.jdbc_driver_class)
    {
        Some(existing) => *existing = preset,
        None => entries.push(preset),
    }
}

/// In-memory store, used for tests and when no data directory is available
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    entries: RwLock<Vec<StoredPreset>>,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl PresetStore for MemoryPresetStore {
    fn get(&self, jdbc_driver_class: &str) -> Option<StoredPreset> {
        self.entries
            .read()
            .iter()
            .find(|p| p.jdbc_driver_class == jdbc_driver_class)
            .cloned()
    }

    fn put(&self, preset: StoredPreset) -> Result<()> {
        upsert(&mut self.entries.write(), preset);
        Ok(())
    }
}

/// Presets stored as a JSON array in a single file
pub struct JsonPresetStore {
    path: PathBuf,
    /// Loaded lazily on first access
    cache: RwLock<Option<Vec<StoredPreset>>>,
}

impl JsonPresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Store at the default location in the user's data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(presets_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_disk(&self) -> Vec<StoredPreset> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "no preset file found, starting fresh");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read preset file {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse preset file, starting fresh: {}", e);
            Vec::new()
        })
    }

    fn entries(&self) -> Vec<StoredPreset> {
        if let Some(entries) = self.cache.read().as_ref() {
            return entries.clone();
        }

        let mut cache = self.cache.write();
        cache.get_or_insert_with(|| self.load_from_disk()).clone()
    }

    fn write_to_disk(&self, entries: &[StoredPreset]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write presets to {:?}", self.path))?;
        Ok(())
    }
}

impl PresetStore for JsonPresetStore {
    fn get(&self, jdbc_driver_class: &str) -> Option<StoredPreset> {
        self.entries()
            .into_iter()
            .find(|p| p.jdbc_driver_class == jdbc_driver_class)
    }

    fn put(&self, preset: StoredPreset) -> Result<()> {
        let mut entries = self.entries();
        upsert(&mut entries, preset);
        self.write_to_disk(&entries)?;
        *self.cache.write() = Some(entries);
        Ok(())
    }
}
