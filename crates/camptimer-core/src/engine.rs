//! Timer engine: owns the tracked mob list, evaluates ticks, and emits
//! alert events at most once per kill cycle.

use crate::models::{MobEntry, Settings};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Alert emitted by [`TimerEngine::tick`], consumed by the UI to raise
/// notifications and tones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub mob_id: String,
    pub mob_name: String,
    pub camp: String,
    pub respawn_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Warning,
    Spawn,
}

/// List projection filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFilter {
    Active,
    All,
}

/// The mob repository plus the process-wide settings. All mutation goes
/// through these operations; time-dependent ones take an explicit `now` so
/// tests can drive a synthetic clock.
pub struct TimerEngine {
    mobs: HashMap<String, MobEntry>,
    settings: Settings,
}

impl TimerEngine {
    pub fn new(settings: Settings) -> Self {
        Self {
            mobs: HashMap::new(),
            settings,
        }
    }

    pub fn with_mobs(mobs: Vec<MobEntry>, settings: Settings) -> Self {
        let mut engine = Self::new(settings);
        engine.replace_all(mobs);
        engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
    }

    pub fn set_notify_before_minutes(&mut self, minutes: u32) -> Result<()> {
        let candidate = Settings {
            notify_before_minutes: minutes,
            ..self.settings.clone()
        };
        candidate.validate()?;
        self.settings = candidate;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.mobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MobEntry> {
        self.mobs.get(id)
    }

    /// Track a new mob, killed at `now`. Validation failures create nothing.
    pub fn create(
        &mut self,
        name: &str,
        camp: &str,
        respawn_minutes: u32,
        respawn_variance: u32,
        notes: &str,
        now: DateTime<Utc>,
    ) -> Result<MobEntry> {
        let mob = MobEntry::new(name, camp, respawn_minutes, respawn_variance, notes, now)?;
        self.mobs.insert(mob.id.clone(), mob.clone());
        Ok(mob)
    }

    /// Record a fresh kill: commit the current cycle to history and restart
    /// the countdown from `now`.
    pub fn reset_cycle(&mut self, id: &str, now: DateTime<Utc>) -> Result<MobEntry> {
        let mob = self
            .mobs
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(format!("No tracked mob with id {}", id)))?;
        mob.reset(now);
        Ok(mob.clone())
    }

    /// Stop tracking a mob. Idempotent; unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        self.mobs.remove(id);
    }

    /// Flip per-mob alerting; returns the new value, or `None` for unknown
    /// ids (no-op). Timers and notified flags are untouched.
    pub fn toggle_notify(&mut self, id: &str) -> Option<bool> {
        let mob = self.mobs.get_mut(id)?;
        mob.notify_enabled = !mob.notify_enabled;
        Some(mob.notify_enabled)
    }

    /// Evaluate one clock tick. Emits nothing while global sound is off.
    /// Spawn and warning checks are independent and each latches its flag,
    /// so an alert fires exactly once per cycle no matter the tick cadence:
    /// crossing the boundary between two ticks still counts as crossed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<AlertEvent> {
        let mut events = Vec::new();
        if !self.settings.sound_enabled {
            return events;
        }

        let warn_threshold_ms = i64::from(self.settings.notify_before_minutes) * 60_000;

        for id in self.ordered_ids() {
            let Some(mob) = self.mobs.get_mut(&id) else {
                continue;
            };
            if !mob.notify_enabled {
                continue;
            }

            let until_spawn_ms = mob
                .respawn_at
                .signed_duration_since(now)
                .num_milliseconds();

            if until_spawn_ms <= 0 && !mob.spawn_notified {
                mob.spawn_notified = true;
                events.push(AlertEvent {
                    kind: AlertKind::Spawn,
                    mob_id: mob.id.clone(),
                    mob_name: mob.name.clone(),
                    camp: mob.camp.clone(),
                    respawn_at: mob.respawn_at,
                });
            }

            // Closed interval: remaining time at or below the lead fires.
            if until_spawn_ms <= warn_threshold_ms && !mob.warning_notified {
                mob.warning_notified = true;
                events.push(AlertEvent {
                    kind: AlertKind::Warning,
                    mob_id: mob.id.clone(),
                    mob_name: mob.name.clone(),
                    camp: mob.camp.clone(),
                    respawn_at: mob.respawn_at,
                });
            }
        }

        events
    }

    /// Pure projection of the list for display: optionally only entries
    /// still counting down, always sorted ascending by respawn time.
    pub fn list_view(&self, filter: ViewFilter, now: DateTime<Utc>) -> Vec<&MobEntry> {
        let mut mobs: Vec<&MobEntry> = self
            .mobs
            .values()
            .filter(|mob| match filter {
                ViewFilter::Active => mob.remaining_ms(now) > 0,
                ViewFilter::All => true,
            })
            .collect();
        mobs.sort_by(|a, b| a.respawn_at.cmp(&b.respawn_at).then(a.id.cmp(&b.id)));
        mobs
    }

    /// The full list in display order, cloned for persistence/export.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Vec<MobEntry> {
        self.list_view(ViewFilter::All, now)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn replace_all(&mut self, mobs: Vec<MobEntry>) {
        self.mobs = mobs.into_iter().map(|m| (m.id.clone(), m)).collect();
    }

    pub fn clear_all(&mut self) {
        self.mobs.clear();
    }

    fn ordered_ids(&self) -> Vec<String> {
        let mut ids: Vec<(DateTime<Utc>, String)> = self
            .mobs
            .values()
            .map(|m| (m.respawn_at, m.id.clone()))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    fn engine() -> TimerEngine {
        TimerEngine::new(Settings::default())
    }

    #[test]
    fn test_create_validation_creates_nothing() {
        let mut engine = engine();
        assert!(engine.create("", "camp", 20, 2, "", t0()).is_err());
        assert!(engine.create("Wyrm", "camp", 0, 2, "", t0()).is_err());
        assert!(engine.is_empty());
    }

    #[test]
    fn test_create_wyrm_example() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "North Ridge", 20, 2, "", t0()).unwrap();

        assert_eq!(mob.respawn_at, t0() + Duration::minutes(20));
        assert_eq!(mob.window_start, t0() + Duration::minutes(18));
        assert_eq!(mob.window_end, t0() + Duration::minutes(22));
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_reset_cycle_unknown_id() {
        let mut engine = engine();
        assert!(matches!(
            engine.reset_cycle("missing", t0()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_reset_cycle_history_grows_per_call() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();

        for n in 1..=3 {
            let now = t0() + Duration::minutes(25 * n);
            let updated = engine.reset_cycle(&mob.id, now).unwrap();
            assert_eq!(updated.history.len(), n as usize);
            assert_eq!(updated.killed_at, now);
        }

        let final_mob = engine.get(&mob.id).unwrap();
        assert_eq!(final_mob.history[0].killed_at, t0());
        assert_eq!(final_mob.history[0].respawn_at, t0() + Duration::minutes(20));
        assert_eq!(final_mob.name, "Wyrm");
        assert_eq!(final_mob.respawn_minutes, 20);
    }

    #[test]
    fn test_remove_idempotent() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();

        engine.remove(&mob.id);
        assert!(engine.is_empty());
        engine.remove(&mob.id);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_toggle_notify() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();

        assert_eq!(engine.toggle_notify(&mob.id), Some(false));
        assert_eq!(engine.toggle_notify(&mob.id), Some(true));
        assert_eq!(engine.toggle_notify("missing"), None);
    }

    #[test]
    fn test_warning_fires_once_at_threshold() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "North Ridge", 20, 2, "", t0()).unwrap();

        // Just before the 5-minute lead: nothing.
        let before = t0() + Duration::minutes(14) + Duration::seconds(59);
        assert!(engine.tick(before).is_empty());

        // First tick at the threshold fires the warning.
        let at = t0() + Duration::minutes(15);
        let events = engine.tick(at);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AlertKind::Warning);
        assert_eq!(events[0].mob_id, mob.id);

        // No duplicate on later ticks within the same cycle.
        assert!(engine.tick(at + Duration::seconds(1)).is_empty());
        assert!(engine.tick(t0() + Duration::minutes(19)).is_empty());
    }

    #[test]
    fn test_spawn_fires_once_even_past_boundary() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();
        let _ = engine.tick(t0() + Duration::minutes(15)); // consume warning

        // Tick cadence skipped the exact boundary; crossing still counts.
        let past = t0() + Duration::minutes(20) + Duration::seconds(3);
        let events = engine.tick(past);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AlertKind::Spawn);
        assert_eq!(events[0].mob_id, mob.id);

        for s in 4..10 {
            assert!(engine
                .tick(t0() + Duration::minutes(20) + Duration::seconds(s))
                .is_empty());
        }
    }

    #[test]
    fn test_spawn_and_warning_same_tick_for_short_mean() {
        // Mean below the warning lead: both checks trip on the first
        // overdue tick.
        let mut engine = engine();
        engine.create("Rat", "", 2, 0, "", t0()).unwrap();

        let events = engine.tick(t0() + Duration::minutes(2));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, AlertKind::Spawn);
        assert_eq!(events[1].kind, AlertKind::Warning);
    }

    #[test]
    fn test_reset_rearms_alerts() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();
        let _ = engine.tick(t0() + Duration::minutes(21));
        assert!(engine.tick(t0() + Duration::minutes(22)).is_empty());

        let reset_at = t0() + Duration::minutes(30);
        engine.reset_cycle(&mob.id, reset_at).unwrap();

        let events = engine.tick(reset_at + Duration::minutes(15));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AlertKind::Warning);
    }

    #[test]
    fn test_tick_silent_when_sound_disabled() {
        let mut engine = engine();
        engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();
        engine.set_sound_enabled(false);

        assert!(engine.tick(t0() + Duration::minutes(25)).is_empty());
    }

    #[test]
    fn test_tick_skips_muted_mobs() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();
        engine.toggle_notify(&mob.id);

        assert!(engine.tick(t0() + Duration::minutes(25)).is_empty());
    }

    #[test]
    fn test_tick_does_not_touch_history_or_kill_time() {
        let mut engine = engine();
        let mob = engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();
        let _ = engine.tick(t0() + Duration::minutes(25));

        let after = engine.get(&mob.id).unwrap();
        assert_eq!(after.killed_at, t0());
        assert!(after.history.is_empty());
    }

    #[test]
    fn test_list_view_sorted_and_filtered() {
        let mut engine = engine();
        let slow = engine.create("Slow", "", 60, 0, "", t0()).unwrap();
        let fast = engine.create("Fast", "", 10, 0, "", t0()).unwrap();
        let done = engine.create("Done", "", 5, 0, "", t0()).unwrap();

        let now = t0() + Duration::minutes(7);

        let all = engine.list_view(ViewFilter::All, now);
        let ids: Vec<&str> = all.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![done.id.as_str(), fast.id.as_str(), slow.id.as_str()]);

        let active = engine.list_view(ViewFilter::Active, now);
        let ids: Vec<&str> = active.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![fast.id.as_str(), slow.id.as_str()]);
    }

    #[test]
    fn test_replace_all_swaps_list() {
        let mut engine = engine();
        engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();

        let replacement = vec![
            MobEntry::new("Bandit", "South Pass", 30, 5, "", t0()).unwrap(),
            MobEntry::new("Rat", "Sewer", 5, 1, "", t0()).unwrap(),
        ];
        engine.replace_all(replacement.clone());

        assert_eq!(engine.len(), 2);
        let names: Vec<&str> = engine
            .list_view(ViewFilter::All, t0())
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rat", "Bandit"]);
    }

    #[test]
    fn test_clear_all() {
        let mut engine = engine();
        engine.create("Wyrm", "", 20, 2, "", t0()).unwrap();
        engine.clear_all();
        assert!(engine.is_empty());
    }

    #[test]
    fn test_set_notify_before_minutes_validated() {
        let mut engine = engine();
        assert!(engine.set_notify_before_minutes(0).is_err());
        assert_eq!(engine.settings().notify_before_minutes, 5);
        assert!(engine.set_notify_before_minutes(10).is_ok());
        assert_eq!(engine.settings().notify_before_minutes, 10);
    }
}
