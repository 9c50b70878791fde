//! Tracked mob/camp data model

use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One tracked mob/camp respawn timer.
///
/// Serialized with camelCase keys so export files stay compatible with the
/// original browser tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MobEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub camp: String,
    #[serde(default)]
    pub notes: String,
    pub respawn_minutes: u32,
    pub respawn_variance: u32,
    pub killed_at: DateTime<Utc>,
    pub respawn_at: DateTime<Utc>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub notify_enabled: bool,
    #[serde(default)]
    pub spawn_notified: bool,
    #[serde(default)]
    pub warning_notified: bool,
    /// Legacy field carried in the stored shape; display state is always
    /// derived from the timestamps, never from this string.
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub history: Vec<CycleRecord>,
}

fn default_status() -> String {
    "active".to_string()
}

/// A completed kill cycle, appended to history on reset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    pub killed_at: DateTime<Utc>,
    pub respawn_at: DateTime<Utc>,
}

/// Display state derived fresh from timestamps on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnState {
    Waiting,
    InWindow,
    Spawned,
}

impl SpawnState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnState::Waiting => "Waiting",
            SpawnState::InWindow => "In Window",
            SpawnState::Spawned => "Spawned",
        }
    }
}

/// Derived countdown view of an entry at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub struct MobStatus {
    pub remaining_ms: i64,
    pub label: String,
    pub state: SpawnState,
    pub progress_percent: f64,
}

impl MobEntry {
    /// Create a new tracked mob with `killed_at = now`.
    pub fn new(
        name: &str,
        camp: &str,
        respawn_minutes: u32,
        respawn_variance: u32,
        notes: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Mob name cannot be empty".to_string()));
        }
        if respawn_minutes == 0 {
            return Err(Error::Validation(
                "Respawn time must be greater than 0 minutes".to_string(),
            ));
        }

        let mut mob = Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            camp: camp.trim().to_string(),
            notes: notes.trim().to_string(),
            respawn_minutes,
            respawn_variance,
            killed_at: now,
            respawn_at: now,
            window_start: now,
            window_end: now,
            notify_enabled: true,
            spawn_notified: false,
            warning_notified: false,
            status: default_status(),
            history: Vec::new(),
        };
        mob.recompute_window(now);
        Ok(mob)
    }

    /// Start a new kill cycle: the current cycle is committed to history and
    /// the window is recomputed from `now`. Both notified flags are cleared
    /// unconditionally, even for long-overdue kills.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.history.push(CycleRecord {
            killed_at: self.killed_at,
            respawn_at: self.respawn_at,
        });
        self.recompute_window(now);
        self.spawn_notified = false;
        self.warning_notified = false;
    }

    fn recompute_window(&mut self, now: DateTime<Utc>) {
        let mean = self.respawn_minutes as i64;
        let variance = self.respawn_variance as i64;

        self.killed_at = now;
        self.respawn_at = now + Duration::minutes(mean);
        // Variance may exceed the mean, putting the window start in the past.
        self.window_start = now + Duration::minutes(mean - variance);
        self.window_end = now + Duration::minutes(mean + variance);
    }

    /// Milliseconds until the expected respawn, clamped at zero.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        self.respawn_at
            .signed_duration_since(now)
            .num_milliseconds()
            .max(0)
    }

    pub fn spawn_state(&self, now: DateTime<Utc>) -> SpawnState {
        if now >= self.respawn_at {
            SpawnState::Spawned
        } else if now >= self.window_start {
            SpawnState::InWindow
        } else {
            SpawnState::Waiting
        }
    }

    /// Derive the countdown status at `now`.
    pub fn status(&self, now: DateTime<Utc>) -> MobStatus {
        let remaining_ms = self.remaining_ms(now);

        let label = if remaining_ms == 0 {
            "SPAWNED".to_string()
        } else {
            let total_seconds = remaining_ms / 1000;
            format!("{}m {}s", total_seconds / 60, total_seconds % 60)
        };

        let cycle_ms = self
            .respawn_at
            .signed_duration_since(self.killed_at)
            .num_milliseconds();
        let progress_percent = if cycle_ms <= 0 {
            100.0
        } else {
            let elapsed_ms = now.signed_duration_since(self.killed_at).num_milliseconds();
            (100.0 * elapsed_ms as f64 / cycle_ms as f64).clamp(0.0, 100.0)
        };

        MobStatus {
            remaining_ms,
            label,
            state: self.spawn_state(now),
            progress_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_mob_window() {
        let mob = MobEntry::new("Wyrm", "North Ridge", 20, 2, "", t0()).unwrap();

        assert_eq!(mob.respawn_at, t0() + Duration::minutes(20));
        assert_eq!(mob.window_start, t0() + Duration::minutes(18));
        assert_eq!(mob.window_end, t0() + Duration::minutes(22));
        assert!(mob.notify_enabled);
        assert!(!mob.spawn_notified);
        assert!(!mob.warning_notified);
        assert!(mob.history.is_empty());
    }

    #[test]
    fn test_window_invariant() {
        let mob = MobEntry::new("Bandit", "", 30, 10, "", t0()).unwrap();
        assert!(mob.window_start <= mob.respawn_at);
        assert!(mob.respawn_at <= mob.window_end);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            MobEntry::new("   ", "", 20, 2, "", t0()),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_zero_respawn_rejected() {
        assert!(matches!(
            MobEntry::new("Wyrm", "", 0, 2, "", t0()),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_variance_larger_than_mean() {
        // Window start lands before the kill; that is allowed.
        let mob = MobEntry::new("Twitchy", "", 5, 10, "", t0()).unwrap();
        assert_eq!(mob.window_start, t0() - Duration::minutes(5));
        assert!(mob.window_start <= mob.respawn_at);
        assert!(mob.respawn_at <= mob.window_end);
    }

    #[test]
    fn test_reset_appends_history_and_clears_flags() {
        let mut mob = MobEntry::new("Wyrm", "", 20, 2, "", t0()).unwrap();
        let first_killed = mob.killed_at;
        let first_respawn = mob.respawn_at;
        mob.spawn_notified = true;
        mob.warning_notified = true;

        let later = t0() + Duration::minutes(25);
        mob.reset(later);

        assert_eq!(mob.history.len(), 1);
        assert_eq!(mob.history[0].killed_at, first_killed);
        assert_eq!(mob.history[0].respawn_at, first_respawn);
        assert_eq!(mob.killed_at, later);
        assert_eq!(mob.respawn_at, later + Duration::minutes(20));
        assert!(!mob.spawn_notified);
        assert!(!mob.warning_notified);
    }

    #[test]
    fn test_spawn_state_boundaries() {
        let mob = MobEntry::new("Wyrm", "", 20, 2, "", t0()).unwrap();

        let waiting = t0() + Duration::minutes(17) + Duration::seconds(59);
        assert_eq!(mob.spawn_state(waiting), SpawnState::Waiting);

        let in_window = t0() + Duration::minutes(18);
        assert_eq!(mob.spawn_state(in_window), SpawnState::InWindow);

        let spawned = t0() + Duration::minutes(20);
        assert_eq!(mob.spawn_state(spawned), SpawnState::Spawned);
        assert_eq!(mob.status(spawned).label, "SPAWNED");
    }

    #[test]
    fn test_status_label_truncates() {
        let mob = MobEntry::new("Wyrm", "", 20, 2, "", t0()).unwrap();
        let now = t0() + Duration::seconds(90) + Duration::milliseconds(900);
        // 18m 29.1s remaining truncates to whole units
        assert_eq!(mob.status(now).label, "18m 29s");
    }

    #[test]
    fn test_status_label_past_one_hour() {
        let mob = MobEntry::new("Dragon", "", 75, 0, "", t0()).unwrap();
        assert_eq!(mob.status(t0()).label, "75m 0s");
    }

    #[test]
    fn test_progress_percent() {
        let mob = MobEntry::new("Wyrm", "", 20, 2, "", t0()).unwrap();

        assert_eq!(mob.status(t0()).progress_percent, 0.0);
        let halfway = t0() + Duration::minutes(10);
        assert!((mob.status(halfway).progress_percent - 50.0).abs() < 1e-9);
        let late = t0() + Duration::minutes(40);
        assert_eq!(mob.status(late).progress_percent, 100.0);
    }

    #[test]
    fn test_serde_round_trip_camel_case() {
        let mob = MobEntry::new("Wyrm", "North Ridge", 20, 2, "rare drop", t0()).unwrap();
        let json = serde_json::to_string(&mob).unwrap();

        assert!(json.contains("\"respawnMinutes\""));
        assert!(json.contains("\"killedAt\""));
        assert!(json.contains("\"notifyEnabled\""));

        let back: MobEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mob);
    }

    #[test]
    fn test_deserialize_without_flags_defaults() {
        // Older exports carry no notified flags or history.
        let json = r#"{
            "id": "abc",
            "name": "Wyrm",
            "respawnMinutes": 20,
            "respawnVariance": 2,
            "killedAt": "2025-03-01T00:00:00Z",
            "respawnAt": "2025-03-01T00:20:00Z",
            "windowStart": "2025-03-01T00:18:00Z",
            "windowEnd": "2025-03-01T00:22:00Z",
            "notifyEnabled": true
        }"#;

        let mob: MobEntry = serde_json::from_str(json).unwrap();
        assert_eq!(mob.status, "active");
        assert!(!mob.spawn_notified);
        assert!(mob.history.is_empty());
        assert_eq!(mob.camp, "");
    }
}
