//! Mob list persistence and import/export (JSON format)

use crate::models::MobEntry;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub struct MobStorage {
    data_dir: PathBuf,
}

impl MobStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn mobs_path(&self) -> PathBuf {
        self.data_dir.join("mobs.json")
    }

    /// Strict load of the persisted list; missing file means empty.
    pub fn load(&self) -> Result<Vec<MobEntry>> {
        let path = self.mobs_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mobs: Vec<MobEntry> = serde_json::from_str(&content)?;
        Ok(mobs)
    }

    /// Load with the browser-storage fallback: a corrupt or unreadable blob
    /// is discarded for an empty list, logged but never surfaced as fatal.
    pub fn load_or_default(&self) -> Vec<MobEntry> {
        match self.load() {
            Ok(mobs) => mobs,
            Err(e) => {
                tracing::warn!("Discarding unreadable mob list: {}", e);
                Vec::new()
            }
        }
    }

    pub fn save(&self, mobs: &[MobEntry]) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        let content = serde_json::to_string_pretty(mobs)?;
        std::fs::write(self.mobs_path(), content)?;
        Ok(())
    }

    /// Remove persisted entry data (the clear-all operation).
    pub fn clear(&self) -> Result<()> {
        let path = self.mobs_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Read and strictly parse an exported file. Any failure maps to
    /// `ImportParse`; the caller's in-memory state is untouched either way.
    pub fn import_from(&self, path: &Path) -> Result<Vec<MobEntry>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ImportParse(format!("Cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::ImportParse(format!("Invalid camp timer file: {}", e)))
    }

    /// Write the list to `dir` as a dated export file and return its path.
    pub fn export_to(&self, dir: &Path, mobs: &[MobEntry], now: DateTime<Utc>) -> Result<PathBuf> {
        let path = dir.join(export_file_name(now));
        let content = serde_json::to_string_pretty(mobs)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("camp-timers-{}.json", now.format("%Y-%m-%d"))
}
