//! # StudyLog Core
//!
//! The local data store of a personal study-tracking app: themes, learning
//! items, study records and study plans live in one [`AppState`] snapshot,
//! mirrored as a single JSON blob to an LMDB-backed key-value store and
//! exportable as a backup file. Designed to be embedded by a non-Rust UI
//! host through the C-ABI surface in [`ffi`].
//!
//! ## Features
//!
//! - **One snapshot, one key**: the whole state serializes under a single
//!   fixed storage key; every change rewrites the blob
//! - **Masked persistence**: storage failures are logged and absorbed at the
//!   adapter, so callers above it never handle a storage error
//! - **Total mutations**: update and delete on an unknown id are silent
//!   no-ops; only import can refuse its input
//! - **Backup round-trip**: export emits the stored bytes verbatim, import
//!   wholesale-replaces the snapshot after a version-tag check
//! - **Safe error handling**: no `unwrap()` calls outside tests
//!
//! ## Quick Start
//!
//! ```
//! use studylog_core::{StudyRecord, StudyStore, Theme};
//! use chrono::NaiveDate;
//!
//! let mut store = StudyStore::in_memory();
//!
//! let theme = Theme::new("English", "#ff0000");
//! let theme_id = theme.id.clone();
//! store.add_theme(theme);
//!
//! let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
//! store.add_record(StudyRecord::new(date, 90, theme_id.clone()));
//!
//! assert_eq!(store.state().total_minutes(), 90);
//! assert_eq!(store.state().theme(&theme_id).unwrap().title, "English");
//! ```
//!
//! Durable stores open the same way with [`StudyStore::open`], which puts
//! the LMDB environment in a `<path>.lmdb` directory.
//!
//! ## FFI Functions
//!
//! The [`ffi`] module exposes the store to C callers:
//!
//! - [`ffi::studylog_open`] / [`ffi::studylog_close`] - store lifecycle
//! - [`ffi::studylog_get_state`] - serialized snapshot
//! - [`ffi::studylog_add_theme`] and friends - per-collection mutations
//! - [`ffi::studylog_update_user`] - partial profile merge
//! - [`ffi::studylog_import`] / [`ffi::studylog_export`] - backup round-trip
//! - [`ffi::studylog_reset`] - back to first-run state
//! - [`ffi::studylog_free_string`] - release returned strings

pub mod error;
pub mod ffi;
pub mod local_store;
pub mod queries;
pub mod storage;
pub mod study_model;
pub mod study_store;

pub use crate::error::StoreError;
pub use crate::local_store::{KeyValueStore, LmdbStore, MemoryStore};
pub use crate::queries::{DayActivity, MonthGroup, ThemeShare};
pub use crate::storage::{backup_file_name, AppStorage, STORAGE_KEY};
pub use crate::study_model::{
    AppState, DisplayMode, LearningItem, StudyPlan, StudyRecord, Theme, User, UserUpdate,
    APP_VERSION,
};
pub use crate::study_store::StudyStore;
