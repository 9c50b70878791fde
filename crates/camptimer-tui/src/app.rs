//! Application state management

use camptimer_core::engine::{TimerEngine, ViewFilter};
use camptimer_core::models::MobEntry;
use camptimer_core::storage::{MobStorage, SettingsStorage};
use camptimer_core::Error;
use chrono::{DateTime, Utc};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Mobs,
    History,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    NewMob,
    ImportPath,
    ConfirmRemove,
    ConfirmClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    SoundEnabled,
    NotifyBeforeMinutes,
}

impl SettingsItem {
    pub const ALL: [Self; 2] = [Self::SoundEnabled, Self::NotifyBeforeMinutes];
}

/// Buffers for the add-mob modal form.
#[derive(Debug, Default)]
pub struct MobForm {
    pub name: String,
    pub camp: String,
    pub respawn_minutes: String,
    pub respawn_variance: String,
    pub notes: String,
    pub focused_field: usize,
}

impl MobForm {
    pub const FIELD_COUNT: usize = 5;
    pub const LABELS: [&'static str; Self::FIELD_COUNT] = [
        "Mob Name",
        "Camp Location",
        "Respawn Time (minutes)",
        "Variance (± minutes)",
        "Notes",
    ];

    pub fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.camp,
            2 => &self.respawn_minutes,
            3 => &self.respawn_variance,
            _ => &self.notes,
        }
    }

    fn field_mut(&mut self, index: usize) -> &mut String {
        match index {
            0 => &mut self.name,
            1 => &mut self.camp,
            2 => &mut self.respawn_minutes,
            3 => &mut self.respawn_variance,
            _ => &mut self.notes,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = (self.focused_field + 1) % Self::FIELD_COUNT;
    }

    pub fn prev_field(&mut self) {
        self.focused_field = (self.focused_field + Self::FIELD_COUNT - 1) % Self::FIELD_COUNT;
    }

    pub fn push_char(&mut self, c: char) {
        self.field_mut(self.focused_field).push(c);
    }

    pub fn pop_char(&mut self) {
        self.field_mut(self.focused_field).pop();
    }

    fn reset(&mut self) {
        *self = Self {
            respawn_minutes: "20".to_string(),
            respawn_variance: "2".to_string(),
            ..Self::default()
        };
    }
}

pub struct App {
    pub engine: TimerEngine,
    pub mob_storage: MobStorage,
    pub settings_storage: SettingsStorage,

    pub current_view: AppView,
    pub list_filter: ViewFilter,
    pub input_mode: InputMode,
    pub form: MobForm,
    pub import_path: String,

    pub selected_index: usize,
    pub selected_setting_index: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    pub fn new(engine: TimerEngine, mob_storage: MobStorage, settings_storage: SettingsStorage) -> Self {
        let mut form = MobForm::default();
        form.reset();
        Self {
            engine,
            mob_storage,
            settings_storage,
            current_view: AppView::Mobs,
            list_filter: ViewFilter::Active,
            input_mode: InputMode::Normal,
            form,
            import_path: String::new(),
            selected_index: 0,
            selected_setting_index: 0,
            show_help: false,
            should_quit: false,
            status_message: "Press [a] to track your first mob, [?] for help".to_string(),
        }
    }

    /// The mobs currently on screen, in display order.
    pub fn visible_mobs(&self, now: DateTime<Utc>) -> Vec<MobEntry> {
        self.engine
            .list_view(self.list_filter, now)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn selected_mob(&self, now: DateTime<Utc>) -> Option<MobEntry> {
        self.visible_mobs(now).into_iter().nth(self.selected_index)
    }

    pub fn select_next(&mut self, now: DateTime<Utc>) {
        let count = self.visible_mobs(now).len();
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn clamp_selection(&mut self, now: DateTime<Utc>) {
        let count = self.visible_mobs(now).len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    pub fn toggle_filter(&mut self, now: DateTime<Utc>) {
        self.list_filter = match self.list_filter {
            ViewFilter::Active => ViewFilter::All,
            ViewFilter::All => ViewFilter::Active,
        };
        self.clamp_selection(now);
        self.status_message = match self.list_filter {
            ViewFilter::Active => "Showing active timers".to_string(),
            ViewFilter::All => "Showing all mobs".to_string(),
        };
    }

    pub fn open_add_form(&mut self) {
        self.form.reset();
        self.input_mode = InputMode::NewMob;
        self.status_message = "Fill in the mob, [Tab] next field, [Enter] to add".to_string();
    }

    pub fn open_import_prompt(&mut self) {
        self.import_path.clear();
        self.input_mode = InputMode::ImportPath;
        self.status_message = "Enter the path of an exported camp timer file".to_string();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.status_message.clear();
    }

    /// Submit the add-mob form. Validation failures keep the form open so
    /// the user can fix the input; nothing is created.
    pub fn submit_form(&mut self, now: DateTime<Utc>) {
        let minutes: u32 = match self.form.respawn_minutes.trim().parse() {
            Ok(m) => m,
            Err(_) => {
                self.status_message = "Respawn time must be a whole number of minutes".to_string();
                return;
            }
        };
        let variance: u32 = if self.form.respawn_variance.trim().is_empty() {
            0
        } else {
            match self.form.respawn_variance.trim().parse() {
                Ok(v) => v,
                Err(_) => {
                    self.status_message = "Variance must be a whole number of minutes".to_string();
                    return;
                }
            }
        };

        match self.engine.create(
            &self.form.name,
            &self.form.camp,
            minutes,
            variance,
            &self.form.notes,
            now,
        ) {
            Ok(mob) => {
                self.status_message = format!("Tracking {} ({}m ±{}m)", mob.name, minutes, variance);
                self.input_mode = InputMode::Normal;
                self.form.reset();
                self.persist_mobs(now);
            }
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
    }

    /// Record a fresh kill for the selected mob.
    pub fn reset_selected(&mut self, now: DateTime<Utc>) {
        let Some(mob) = self.selected_mob(now) else {
            return;
        };
        match self.engine.reset_cycle(&mob.id, now) {
            Ok(updated) => {
                self.status_message = format!("{} killed, timer reset", updated.name);
                self.persist_mobs(now);
            }
            // The entry vanished between render and keypress; nothing to do.
            Err(Error::NotFound(_)) => {}
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
    }

    pub fn request_remove(&mut self, now: DateTime<Utc>) {
        if self.selected_mob(now).is_some() {
            self.input_mode = InputMode::ConfirmRemove;
        }
    }

    pub fn remove_selected(&mut self, now: DateTime<Utc>) {
        if let Some(mob) = self.selected_mob(now) {
            self.engine.remove(&mob.id);
            self.status_message = format!("Removed {}", mob.name);
            self.clamp_selection(now);
            self.persist_mobs(now);
        }
    }

    pub fn toggle_notify_selected(&mut self, now: DateTime<Utc>) {
        let Some(mob) = self.selected_mob(now) else {
            return;
        };
        if let Some(enabled) = self.engine.toggle_notify(&mob.id) {
            self.status_message = if enabled {
                format!("Alerts on for {}", mob.name)
            } else {
                format!("Alerts off for {}", mob.name)
            };
            self.persist_mobs(now);
        }
    }

    pub fn request_clear_all(&mut self) {
        if !self.engine.is_empty() {
            self.input_mode = InputMode::ConfirmClear;
        }
    }

    pub fn clear_all_confirmed(&mut self) {
        self.engine.clear_all();
        if let Err(e) = self.mob_storage.clear() {
            tracing::warn!("Failed to remove persisted mob list: {}", e);
        }
        self.selected_index = 0;
        self.status_message = "All camp timers cleared".to_string();
    }

    /// Import replaces the whole list on success; on failure the current
    /// list is untouched and the error is shown in the status line.
    pub fn submit_import(&mut self, now: DateTime<Utc>) {
        let path = self.import_path.trim().to_string();
        match self.mob_storage.import_from(Path::new(&path)) {
            Ok(mobs) => {
                let count = mobs.len();
                self.engine.replace_all(mobs);
                self.selected_index = 0;
                self.input_mode = InputMode::Normal;
                self.status_message = format!("Imported {} camp timers", count);
                self.persist_mobs(now);
            }
            Err(e) => {
                // Stay in the prompt so the path can be corrected.
                self.status_message = e.to_string();
            }
        }
    }

    pub fn export(&mut self, now: DateTime<Utc>) {
        let snapshot = self.engine.snapshot(now);
        let dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                self.status_message = format!("Export failed: {}", e);
                return;
            }
        };
        match self.mob_storage.export_to(&dir, &snapshot, now) {
            Ok(path) => {
                self.status_message = format!("Exported to {}", path.display());
            }
            Err(e) => {
                self.status_message = format!("Export failed: {}", e);
                tracing::warn!("Export failed: {}", e);
            }
        }
    }

    pub fn toggle_sound(&mut self) {
        let enabled = !self.engine.settings().sound_enabled;
        self.engine.set_sound_enabled(enabled);
        self.status_message = if enabled {
            "Sound alerts enabled".to_string()
        } else {
            "Sound alerts disabled".to_string()
        };
        self.persist_settings();
    }

    pub fn adjust_notify_before(&mut self, delta: i32) {
        let current = self.engine.settings().notify_before_minutes;
        let next = current.saturating_add_signed(delta);
        match self.engine.set_notify_before_minutes(next) {
            Ok(()) => {
                self.status_message = format!("Warning lead set to {} minutes", next);
                self.persist_settings();
            }
            Err(e) => {
                self.status_message = e.to_string();
            }
        }
    }

    /// Fire-and-forget persistence: a failed write is logged and dropped,
    /// matching browser local-storage semantics.
    pub fn persist_mobs(&mut self, now: DateTime<Utc>) {
        let snapshot = self.engine.snapshot(now);
        if let Err(e) = self.mob_storage.save(&snapshot) {
            tracing::warn!("Failed to persist mob list: {}", e);
        }
    }

    pub fn persist_settings(&mut self) {
        if let Err(e) = self.settings_storage.save(self.engine.settings()) {
            tracing::warn!("Failed to persist settings: {}", e);
        }
    }
}
