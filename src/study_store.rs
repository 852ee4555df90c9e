//! The data store: single owner of the in-memory [`AppState`].
//!
//! Construction performs the one load; from then on every mutation replaces
//! part of the snapshot and mirrors the whole snapshot back through
//! [`AppStorage`]. Consumers read through `&` accessors and route every
//! change through the operations here, so there is exactly one writer.
//!
//! Mutations are total: an update or delete whose id matches nothing is a
//! silent no-op, and only a changed snapshot is written back. Import is the
//! one operation that can refuse its input.

use std::path::Path;

use log::info;

use crate::error::StoreError;
use crate::storage::AppStorage;
use crate::study_model::{
    AppState, DisplayMode, LearningItem, StudyPlan, StudyRecord, Theme, User, UserUpdate,
};

pub struct StudyStore {
    storage: AppStorage,
    state: AppState,
}

impl StudyStore {
    /// Wraps a storage adapter and loads whatever it holds.
    ///
    /// An empty or unreadable backend yields `AppState::default()`, so this
    /// never fails even on a corrupt blob.
    pub fn new(storage: AppStorage) -> Self {
        let state = storage.load();
        Self { storage, state }
    }

    /// Store backed by an LMDB directory at `<path>.lmdb`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(AppStorage::open(path)?))
    }

    /// Store backed by process memory only. Used in tests and host setups
    /// that handle durability themselves.
    pub fn in_memory() -> Self {
        Self::new(AppStorage::in_memory())
    }

    /// The current snapshot. Read-only; all changes go through the
    /// operations below.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn user(&self) -> &User {
        &self.state.user
    }

    pub fn themes(&self) -> &[Theme] {
        &self.state.themes
    }

    pub fn items(&self) -> &[LearningItem] {
        &self.state.items
    }

    pub fn records(&self) -> &[StudyRecord] {
        &self.state.records
    }

    pub fn plans(&self) -> &[StudyPlan] {
        &self.state.plans
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.state.display_mode
    }

    pub fn background_color(&self) -> Option<&str> {
        self.state.background_color.as_deref()
    }

    fn persist(&mut self) {
        self.storage.save(&self.state);
    }

    /// Appends a theme. Append order is insertion order; views re-sort if
    /// they need another order.
    pub fn add_theme(&mut self, theme: Theme) {
        self.state.themes.push(theme);
        self.persist();
    }

    /// Replaces the theme with the same id, keeping its position. Returns
    /// whether a theme was replaced; an unknown id changes nothing.
    pub fn update_theme(&mut self, theme: Theme) -> bool {
        if let Some(slot) = self.state.themes.iter_mut().find(|t| t.id == theme.id) {
            *slot = theme;
            self.persist();
            true
        } else {
            false
        }
    }

    /// Removes a theme and every learning item pointing at it.
    ///
    /// The cascade stops there: records and plans keep their `theme_id` and
    /// dangle. Lookups treat a missing theme as a normal case, not an error.
    /// Returns whether anything was removed.
    pub fn delete_theme(&mut self, id: &str) -> bool {
        let themes_before = self.state.themes.len();
        let items_before = self.state.items.len();
        self.state.themes.retain(|t| t.id != id);
        self.state.items.retain(|i| i.theme_id != id);
        let removed = self.state.themes.len() != themes_before
            || self.state.items.len() != items_before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn add_item(&mut self, item: LearningItem) {
        self.state.items.push(item);
        self.persist();
    }

    pub fn update_item(&mut self, item: LearningItem) -> bool {
        if let Some(slot) = self.state.items.iter_mut().find(|i| i.id == item.id) {
            *slot = item;
            self.persist();
            true
        } else {
            false
        }
    }

    pub fn delete_item(&mut self, id: &str) -> bool {
        let before = self.state.items.len();
        self.state.items.retain(|i| i.id != id);
        let removed = self.state.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn add_record(&mut self, record: StudyRecord) {
        self.state.records.push(record);
        self.persist();
    }

    pub fn update_record(&mut self, record: StudyRecord) -> bool {
        if let Some(slot) = self.state.records.iter_mut().find(|r| r.id == record.id) {
            *slot = record;
            self.persist();
            true
        } else {
            false
        }
    }

    pub fn delete_record(&mut self, id: &str) -> bool {
        let before = self.state.records.len();
        self.state.records.retain(|r| r.id != id);
        let removed = self.state.records.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn add_plan(&mut self, plan: StudyPlan) {
        self.state.plans.push(plan);
        self.persist();
    }

    pub fn update_plan(&mut self, plan: StudyPlan) -> bool {
        if let Some(slot) = self.state.plans.iter_mut().find(|p| p.id == plan.id) {
            *slot = plan;
            self.persist();
            true
        } else {
            false
        }
    }

    pub fn delete_plan(&mut self, id: &str) -> bool {
        let before = self.state.plans.len();
        self.state.plans.retain(|p| p.id != id);
        let removed = self.state.plans.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Shallow-merges a partial profile update into the user.
    ///
    /// A `None` field is left untouched; `icon` and `message` carry a second
    /// `Option` layer so they can also be cleared. See [`UserUpdate`].
    pub fn update_user(&mut self, update: UserUpdate) {
        let UserUpdate {
            name,
            icon,
            message,
        } = update;
        let mut touched = false;
        if let Some(name) = name {
            self.state.user.name = name;
            touched = true;
        }
        if let Some(icon) = icon {
            self.state.user.icon = icon;
            touched = true;
        }
        if let Some(message) = message {
            self.state.user.message = message;
            touched = true;
        }
        if touched {
            self.persist();
        }
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.state.display_mode != mode {
            self.state.display_mode = mode;
            self.persist();
        }
    }

    /// Flips light/dark and returns the new mode.
    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.state.display_mode = self.state.display_mode.toggled();
        self.persist();
        self.state.display_mode
    }

    /// Replaces the background color; `None` clears it.
    pub fn set_background_color(&mut self, color: Option<String>) {
        if self.state.background_color != color {
            self.state.background_color = color;
            self.persist();
        }
    }

    /// Replaces the whole snapshot with a parsed backup.
    ///
    /// Validation is deliberately thin: the blob must parse as an
    /// [`AppState`] and carry a non-empty `appVersion`. Collections absent
    /// from the blob come back empty. On any failure the current snapshot is
    /// left untouched and the caller gets the reason; confirmation prompts
    /// before this destructive replace are the caller's job.
    pub fn import_data(&mut self, json: &str) -> Result<(), StoreError> {
        let parsed: AppState = serde_json::from_str(json)?;
        if parsed.app_version.is_empty() {
            return Err(StoreError::Validation(
                "backup has an empty appVersion".to_string(),
            ));
        }
        self.state = parsed;
        self.persist();
        info!("Imported backup with {} records", self.state.records.len());
        Ok(())
    }

    /// Clears the persisted blob and returns to first-run state.
    ///
    /// Destructive and unprompted; the caller confirms with the user first.
    pub fn reset_data(&mut self) {
        self.storage.clear();
        self.state = self.storage.load();
        self.persist();
        info!("Store reset to first-run state");
    }

    /// The raw stored bytes, for writing a backup file. This bypasses the
    /// in-memory snapshot, so it can lag a mutation whose save failed.
    pub fn export_raw(&self) -> String {
        self.storage.export_raw()
    }
}
