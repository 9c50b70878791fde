//! Settings storage operations

use crate::models::Settings;
use crate::Result;
use std::path::PathBuf;

pub struct SettingsStorage {
    data_dir: PathBuf,
}

impl SettingsStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    /// Load settings, creating and persisting defaults on first run. A
    /// corrupt file also falls back to defaults rather than failing startup.
    pub fn load(&self) -> Result<Settings> {
        let path = self.settings_path();

        if !path.exists() {
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        match serde_json::from_str(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!("Discarding unreadable settings: {}", e);
                let settings = Settings::default();
                self.save(&settings)?;
                Ok(settings)
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(self.settings_path(), content)?;
        Ok(())
    }
}
