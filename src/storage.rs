//! Persistence adapter: the durable mirror of [`AppState`].
//!
//! One JSON blob under one fixed key, written whole on every save. The
//! adapter is the masking boundary of the crate: read and write failures are
//! logged and swallowed here, so callers above it never see a storage error.
//! The price is an explicitly best-effort durability contract: after a
//! failed save, memory and disk diverge until the next save lands.

use std::path::Path;

use chrono::NaiveDate;
use log::warn;

use crate::error::StoreError;
use crate::local_store::{KeyValueStore, LmdbStore, MemoryStore};
use crate::study_model::AppState;

/// The single key the whole application state lives under.
pub const STORAGE_KEY: &str = "studylog_data_v1";

/// Reads and writes the [`AppState`] blob through a [`KeyValueStore`].
pub struct AppStorage {
    backend: Box<dyn KeyValueStore>,
}

impl AppStorage {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Durable adapter over an LMDB directory at `<path>.lmdb`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(Box::new(LmdbStore::open(path)?)))
    }

    /// Ephemeral adapter; state lives only as long as the value.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Loads the stored state, or the default when nothing usable is stored.
    ///
    /// An absent blob, an unreadable backend and an unparseable blob all
    /// collapse to `AppState::default()`; the latter two leave a warning in
    /// the log. This never fails.
    pub fn load(&self) -> AppState {
        match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(state) => return state,
                Err(e) => warn!("Stored state is unreadable, starting from defaults: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to read stored state: {e}"),
        }
        AppState::default()
    }

    /// Serializes and writes the full state under [`STORAGE_KEY`].
    ///
    /// Best-effort: a failure is logged and dropped, and the in-memory state
    /// is not rolled back.
    pub fn save(&mut self, state: &AppState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize state, skipping save: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.set(STORAGE_KEY, &json) {
            warn!("Failed to persist state: {e}");
        }
    }

    /// Removes the stored blob entirely. The next [`load`](Self::load)
    /// returns the default state.
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.remove(STORAGE_KEY) {
            warn!("Failed to clear stored state: {e}");
        }
    }

    /// Raw serialized bytes currently stored, or the serialized default when
    /// nothing is stored.
    ///
    /// This reads the backend, not any in-memory snapshot, so the result can
    /// lag a mutation whose save failed or has not happened yet.
    pub fn export_raw(&self) -> String {
        match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => return raw,
            Ok(None) => {}
            Err(e) => warn!("Failed to read stored state for export: {e}"),
        }
        match serde_json::to_string(&AppState::default()) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize default state for export: {e}");
                String::from("{}")
            }
        }
    }
}

/// Conventional backup file name for a given date:
/// `studylog_backup_<YYYY-MM-DD>.studylog.json`.
///
/// Cosmetic only; import never inspects the name.
///
/// ```
/// use chrono::NaiveDate;
/// use studylog_core::storage::backup_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
/// assert_eq!(backup_file_name(date), "studylog_backup_2026-08-25.studylog.json");
/// ```
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("studylog_backup_{date}.studylog.json")
}
