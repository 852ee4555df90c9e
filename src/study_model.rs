//! Data model for the study tracker.
//!
//! This module defines the root [`AppState`] snapshot and the four entity
//! collections it holds: [`Theme`], [`LearningItem`], [`StudyRecord`] and
//! [`StudyPlan`], plus the [`User`] profile and display settings. All types
//! serialize with the camelCase field names of the JSON backup format
//! (`appVersion`, `themeId`, `durationMinutes`, ...), so a serialized
//! `AppState` *is* the backup file and the stored blob.
//!
//! Entities reference each other through plain string ids. `theme_id` on
//! items, records and plans is a **non-owning lookup key**: after a theme is
//! deleted, records and plans keep pointing at the vanished id, and every
//! reader must treat a failed lookup as a normal case (see
//! [`crate::queries`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Schema tag written into every fresh [`AppState`].
///
/// Import only requires the tag to be present and non-empty; the value is
/// not interpreted.
pub const APP_VERSION: &str = "1.0.0";

/// Profile of the (single, local) user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// URL or inline base64 image data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            icon: None,
            message: None,
        }
    }
}

/// Partial update for [`User`], applied as a shallow merge.
///
/// `name` is either replaced (`Some`) or kept (`None`). The two optional
/// profile fields use a second `Option` layer so a merge can distinguish
/// "leave untouched" (`None`) from "clear" (`Some(None)`) from "set"
/// (`Some(Some(value))`). A JSON partial expresses the same three cases by
/// omitting the key, sending `null`, or sending a value.
///
/// ```
/// use studylog_core::UserUpdate;
///
/// let update: UserUpdate = serde_json::from_str(r#"{"name":"Mika","icon":null}"#).unwrap();
/// assert_eq!(update.name, Some("Mika".to_string()));
/// assert_eq!(update.icon, Some(None));
/// assert_eq!(update.message, None);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub message: Option<Option<String>>,
}

/// Maps a present-but-null JSON value to `Some(None)` while `#[serde(default)]`
/// keeps an absent key as `None`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// A top-level study category, e.g. "English" or "Programming".
///
/// Themes are the anchor of the data model: items belong to exactly one
/// theme, and records and plans carry a theme id. Deleting a theme cascades
/// to its items only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub title: String,
    /// Hex color, e.g. `#4F46E5`. Stored verbatim.
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Theme {
    /// Builds a theme with a fresh UUID and the current time.
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            color: color.into(),
            created_at: Utc::now(),
        }
    }
}

/// A checklist entry belonging to one [`Theme`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningItem {
    pub id: String,
    pub theme_id: String,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl LearningItem {
    pub fn new(theme_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            theme_id: theme_id.into(),
            title: title.into(),
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}

/// A logged study session.
///
/// `duration_minutes` is stored exactly as supplied; range checks are the
/// caller's concern. `item_id` optionally points at a [`LearningItem`] and is
/// not validated against the item's owning theme.
///
/// ```
/// use chrono::NaiveDate;
/// use studylog_core::StudyRecord;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let record = StudyRecord::new(date, 90, "theme-id")
///     .with_memo("irregular verbs")
///     .with_reflection("better than last week");
/// assert_eq!(record.duration_minutes, 90);
/// assert!(record.item_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecord {
    pub id: String,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub theme_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StudyRecord {
    pub fn new(date: NaiveDate, duration_minutes: i64, theme_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            duration_minutes,
            theme_id: theme_id.into(),
            item_id: None,
            memo: None,
            reflection: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_reflection(mut self, reflection: impl Into<String>) -> Self {
        self.reflection = Some(reflection.into());
        self
    }
}

/// A scheduled intention to study a theme on a given date.
///
/// Plans live independently of records: completing a plan does not create a
/// record, and logging a record does not complete a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub id: String,
    pub date: NaiveDate,
    pub theme_id: String,
    pub content: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl StudyPlan {
    pub fn new(date: NaiveDate, theme_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            theme_id: theme_id.into(),
            content: content.into(),
            is_completed: false,
            created_at: Utc::now(),
        }
    }
}

/// Light/dark rendering preference, stored with the data so it survives a
/// backup round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(DisplayMode::Light),
            "dark" => Some(DisplayMode::Dark),
            _ => None,
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }
}

/// The root snapshot holding all entities and settings.
///
/// One `AppState` is the entire persisted world: it is the value stored
/// under the storage key, the shape of a backup file, and the thing a
/// [`crate::study_store::StudyStore`] owns in memory. It is replaced
/// wholesale by import and reset, never partially patched.
///
/// Everything except `app_version` defaults when absent from a parsed blob,
/// so a sparse backup that carries the version tag still imports; a blob
/// without the tag does not parse.
///
/// ```
/// use studylog_core::{AppState, APP_VERSION};
///
/// let state = AppState::default();
/// assert_eq!(state.app_version, APP_VERSION);
/// assert_eq!(state.user.name, "User");
/// assert!(state.themes.is_empty());
///
/// // The minimal valid backup.
/// let imported: AppState = serde_json::from_str(r#"{"appVersion":"1.0.0"}"#).unwrap();
/// assert!(imported.records.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub app_version: String,
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub items: Vec<LearningItem>,
    #[serde(default)]
    pub records: Vec<StudyRecord>,
    #[serde(default)]
    pub plans: Vec<StudyPlan>,
    #[serde(default)]
    pub display_mode: DisplayMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            app_version: APP_VERSION.to_string(),
            user: User::default(),
            themes: Vec::new(),
            items: Vec::new(),
            records: Vec::new(),
            plans: Vec::new(),
            display_mode: DisplayMode::default(),
            background_color: None,
        }
    }
}
