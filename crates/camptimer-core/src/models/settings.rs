//! Process-wide alert settings

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sound_enabled: bool,
    pub notify_before_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            notify_before_minutes: 5,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.notify_before_minutes == 0 {
            return Err(Error::Validation(
                "Warning lead time must be greater than 0 minutes".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert_eq!(settings.notify_before_minutes, 5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_lead_time_invalid() {
        let settings = Settings {
            sound_enabled: true,
            notify_before_minutes: 0,
        };
        assert!(settings.validate().is_err());
    }
}
