//! C-ABI surface so a non-Rust UI host can drive the store.
//!
//! Every function takes and returns C strings; results travel as a
//! JSON-serialized [`StoreResponse`] envelope, so the host always gets one
//! parseable answer and never a panic across the boundary. Strings returned
//! here are owned by the caller and must be released with
//! [`studylog_free_string`]; the store handle from [`studylog_open`] must be
//! released with [`studylog_close`].
//!
//! Update and delete keep the store's contract at this boundary too: an id
//! that matches nothing answers `Ok` with a "nothing changed" message, not
//! an error.

use std::ffi::{CStr, CString};
use std::fmt::{Display, Formatter};
use std::os::raw::c_char;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::study_model::{DisplayMode, LearningItem, StudyPlan, StudyRecord, Theme, UserUpdate};
use crate::study_store::StudyStore;

/// Envelope every FFI call answers with, JSON-serialized.
///
/// `Ok` carries the operation's payload (an entity echo, the serialized
/// state, or a plain message). The error variants mirror [`StoreError`] plus
/// `BadRequest` for boundary problems (null pointers, invalid UTF-8,
/// unknown enum values).
#[derive(Debug, Serialize, Deserialize)]
pub enum StoreResponse {
    StorageError(String),
    SerializationError(String),
    ValidationError(String),
    BadRequest(String),
    Ok(String),
}

impl Display for StoreResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreResponse::StorageError(msg) => write!(f, "Storage error: {}", msg),
            StoreResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            StoreResponse::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            StoreResponse::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            StoreResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl From<StoreError> for StoreResponse {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Storage(msg) => StoreResponse::StorageError(msg),
            StoreError::Serialization(msg) => StoreResponse::SerializationError(msg),
            StoreError::Validation(msg) => StoreResponse::ValidationError(msg),
        }
    }
}

/// Opens (or creates) a store backed by an LMDB directory at `<path>.lmdb`.
///
/// # Parameters
///
/// * `path` - Null-terminated C string with the store path, without the
///   `.lmdb` suffix
///
/// # Returns
///
/// A pointer to the [`StudyStore`] instance, or null on failure. The caller
/// owns the pointer and releases it with [`studylog_close`].
///
/// # Safety
///
/// `path` must be a valid null-terminated string. The returned pointer must
/// not be used after [`studylog_close`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use studylog_core::ffi::studylog_open;
///
/// let path = CString::new("studylog").unwrap();
/// let store = studylog_open(path.as_ptr());
/// assert!(!store.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_open(path: *const c_char) -> *mut StudyStore {
    if path.is_null() {
        warn!("Null path pointer passed to studylog_open");
        return std::ptr::null_mut();
    }

    let path_str = match unsafe { CStr::from_ptr(path).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in path parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match StudyStore::open(path_str) {
        Ok(store) => {
            info!("Store opened at {path_str}.lmdb");
            Box::into_raw(Box::new(store))
        }
        Err(e) => {
            warn!("Failed to open store at {path_str}: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Releases a store handle obtained from [`studylog_open`].
///
/// The LMDB environment is closed when the store drops. The pointer must not
/// be used afterwards; passing null answers `BadRequest`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_close(store: *mut StudyStore) -> *const c_char {
    if store.is_null() {
        let error =
            StoreResponse::BadRequest("Null store pointer passed to studylog_close".to_string());
        return respond(&error);
    }

    drop(unsafe { Box::from_raw(store) });
    respond(&StoreResponse::Ok("Store closed".to_string()))
}

/// Releases a string returned by any function in this module.
///
/// Tolerates null. Must be called exactly once per returned string.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_free_string(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr) });
}

/// Returns the current snapshot as `Ok` with the serialized `AppState`.
///
/// The payload has the same schema as a backup file.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_get_state(store: *mut StudyStore) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_get_state".to_string(),
        );
        return respond(&error);
    }

    let store = unsafe { &*store };

    match serde_json::to_string(store.state()) {
        Ok(json) => respond(&StoreResponse::Ok(json)),
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Failed to serialize state: {e}"));
            respond(&error)
        }
    }
}

/// Returns the raw stored bytes for writing a backup file.
///
/// Sourced from the backend, not the in-memory snapshot, so the payload can
/// lag a mutation whose save failed.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_export(store: *mut StudyStore) -> *const c_char {
    if store.is_null() {
        let error =
            StoreResponse::BadRequest("Null store pointer passed to studylog_export".to_string());
        return respond(&error);
    }

    let store = unsafe { &*store };
    respond(&StoreResponse::Ok(store.export_raw()))
}

/// Replaces the whole snapshot with a backup blob.
///
/// # Parameters
///
/// * `store` - Store handle
/// * `json_ptr` - Null-terminated C string with the backup JSON
///
/// # Returns
///
/// `Ok` on success. `SerializationError` when the blob does not parse as an
/// `AppState`, `ValidationError` when its `appVersion` is empty; in both
/// cases the current snapshot is untouched. Confirmation prompts belong to
/// the host, before the call.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_import(store: *mut StudyStore, json_ptr: *const c_char) -> *const c_char {
    if store.is_null() {
        let error =
            StoreResponse::BadRequest("Null store pointer passed to studylog_import".to_string());
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "backup JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let store = unsafe { &mut *store };

    match store.import_data(&json_str) {
        Ok(()) => respond(&StoreResponse::Ok("Backup imported".to_string())),
        Err(e) => respond(&StoreResponse::from(e)),
    }
}

/// Clears the persisted blob and returns the store to first-run state.
///
/// Destructive and unprompted, like the import it mirrors.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_reset(store: *mut StudyStore) -> *const c_char {
    if store.is_null() {
        let error =
            StoreResponse::BadRequest("Null store pointer passed to studylog_reset".to_string());
        return respond(&error);
    }

    let store = unsafe { &mut *store };
    store.reset_data();
    respond(&StoreResponse::Ok("Store reset to first-run state".to_string()))
}

/// Appends a theme parsed from JSON.
///
/// # Parameters
///
/// * `store` - Store handle
/// * `json_ptr` - Null-terminated C string with the theme JSON
///
/// # Returns
///
/// `Ok` echoing the stored theme, or `SerializationError` when the JSON
/// does not parse as a theme.
///
/// # JSON Format
///
/// ```json
/// {
///   "id": "uuid",
///   "title": "English",
///   "color": "#ff0000",
///   "createdAt": "2026-08-25T10:00:00Z"
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_add_theme(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_add_theme".to_string(),
        );
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "theme JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let theme: Theme = match serde_json::from_str(&json_str) {
        Ok(t) => t,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid theme JSON: {e}"));
            return respond(&error);
        }
    };

    let echo = match serde_json::to_string(&theme) {
        Ok(json) => json,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Failed to serialize theme: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    store.add_theme(theme);
    respond(&StoreResponse::Ok(echo))
}

/// Replaces the theme whose id matches the parsed JSON, keeping its
/// position. An unmatched id answers `Ok` with a "nothing changed" message.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_update_theme(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_update_theme".to_string(),
        );
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "theme JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let theme: Theme = match serde_json::from_str(&json_str) {
        Ok(t) => t,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid theme JSON: {e}"));
            return respond(&error);
        }
    };

    let echo = match serde_json::to_string(&theme) {
        Ok(json) => json,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Failed to serialize theme: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    if store.update_theme(theme) {
        respond(&StoreResponse::Ok(echo))
    } else {
        respond(&StoreResponse::Ok(
            "No theme matched the id; nothing changed".to_string(),
        ))
    }
}

/// Removes a theme and cascades to its learning items. Records and plans
/// keep their theme id and dangle. An unmatched id answers `Ok` with a
/// "nothing changed" message.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_delete_theme(
    store: *mut StudyStore,
    id_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_delete_theme".to_string(),
        );
        return respond(&error);
    }

    let id = match read_c_str(id_ptr, "id") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let store = unsafe { &mut *store };
    if store.delete_theme(&id) {
        respond(&StoreResponse::Ok("Theme deleted".to_string()))
    } else {
        respond(&StoreResponse::Ok(
            "No theme matched the id; nothing changed".to_string(),
        ))
    }
}

/// Appends a learning item. Same contract as [`studylog_add_theme`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_add_item(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error =
            StoreResponse::BadRequest("Null store pointer passed to studylog_add_item".to_string());
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "item JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let item: LearningItem = match serde_json::from_str(&json_str) {
        Ok(i) => i,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid item JSON: {e}"));
            return respond(&error);
        }
    };

    let echo = match serde_json::to_string(&item) {
        Ok(json) => json,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Failed to serialize item: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    store.add_item(item);
    respond(&StoreResponse::Ok(echo))
}

/// Replaces a learning item by id. Same contract as
/// [`studylog_update_theme`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_update_item(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_update_item".to_string(),
        );
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "item JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let item: LearningItem = match serde_json::from_str(&json_str) {
        Ok(i) => i,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid item JSON: {e}"));
            return respond(&error);
        }
    };

    let echo = match serde_json::to_string(&item) {
        Ok(json) => json,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Failed to serialize item: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    if store.update_item(item) {
        respond(&StoreResponse::Ok(echo))
    } else {
        respond(&StoreResponse::Ok(
            "No item matched the id; nothing changed".to_string(),
        ))
    }
}

/// Removes a learning item by id. No cascade. Same contract as
/// [`studylog_delete_theme`] otherwise.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_delete_item(
    store: *mut StudyStore,
    id_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_delete_item".to_string(),
        );
        return respond(&error);
    }

    let id = match read_c_str(id_ptr, "id") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let store = unsafe { &mut *store };
    if store.delete_item(&id) {
        respond(&StoreResponse::Ok("Item deleted".to_string()))
    } else {
        respond(&StoreResponse::Ok(
            "No item matched the id; nothing changed".to_string(),
        ))
    }
}

/// Appends a study record. Same contract as [`studylog_add_theme`].
///
/// # JSON Format
///
/// ```json
/// {
///   "id": "uuid",
///   "date": "2026-08-25",
///   "durationMinutes": 90,
///   "themeId": "uuid",
///   "createdAt": "2026-08-25T10:00:00Z"
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_add_record(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_add_record".to_string(),
        );
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "record JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let record: StudyRecord = match serde_json::from_str(&json_str) {
        Ok(r) => r,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid record JSON: {e}"));
            return respond(&error);
        }
    };

    let echo = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(e) => {
            let error =
                StoreResponse::SerializationError(format!("Failed to serialize record: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    store.add_record(record);
    respond(&StoreResponse::Ok(echo))
}

/// Replaces a study record by id. Same contract as
/// [`studylog_update_theme`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_update_record(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_update_record".to_string(),
        );
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "record JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let record: StudyRecord = match serde_json::from_str(&json_str) {
        Ok(r) => r,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid record JSON: {e}"));
            return respond(&error);
        }
    };

    let echo = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(e) => {
            let error =
                StoreResponse::SerializationError(format!("Failed to serialize record: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    if store.update_record(record) {
        respond(&StoreResponse::Ok(echo))
    } else {
        respond(&StoreResponse::Ok(
            "No record matched the id; nothing changed".to_string(),
        ))
    }
}

/// Removes a study record by id. Same contract as
/// [`studylog_delete_item`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_delete_record(
    store: *mut StudyStore,
    id_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_delete_record".to_string(),
        );
        return respond(&error);
    }

    let id = match read_c_str(id_ptr, "id") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let store = unsafe { &mut *store };
    if store.delete_record(&id) {
        respond(&StoreResponse::Ok("Record deleted".to_string()))
    } else {
        respond(&StoreResponse::Ok(
            "No record matched the id; nothing changed".to_string(),
        ))
    }
}

/// Appends a study plan. Same contract as [`studylog_add_theme`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_add_plan(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error =
            StoreResponse::BadRequest("Null store pointer passed to studylog_add_plan".to_string());
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "plan JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let plan: StudyPlan = match serde_json::from_str(&json_str) {
        Ok(p) => p,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid plan JSON: {e}"));
            return respond(&error);
        }
    };

    let echo = match serde_json::to_string(&plan) {
        Ok(json) => json,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Failed to serialize plan: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    store.add_plan(plan);
    respond(&StoreResponse::Ok(echo))
}

/// Replaces a study plan by id. Same contract as
/// [`studylog_update_theme`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_update_plan(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_update_plan".to_string(),
        );
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "plan JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let plan: StudyPlan = match serde_json::from_str(&json_str) {
        Ok(p) => p,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid plan JSON: {e}"));
            return respond(&error);
        }
    };

    let echo = match serde_json::to_string(&plan) {
        Ok(json) => json,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Failed to serialize plan: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    if store.update_plan(plan) {
        respond(&StoreResponse::Ok(echo))
    } else {
        respond(&StoreResponse::Ok(
            "No plan matched the id; nothing changed".to_string(),
        ))
    }
}

/// Removes a study plan by id. Same contract as [`studylog_delete_item`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_delete_plan(
    store: *mut StudyStore,
    id_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_delete_plan".to_string(),
        );
        return respond(&error);
    }

    let id = match read_c_str(id_ptr, "id") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let store = unsafe { &mut *store };
    if store.delete_plan(&id) {
        respond(&StoreResponse::Ok("Plan deleted".to_string()))
    } else {
        respond(&StoreResponse::Ok(
            "No plan matched the id; nothing changed".to_string(),
        ))
    }
}

/// Shallow-merges a partial profile update into the user.
///
/// # JSON Format
///
/// An absent key leaves the field untouched; `"icon"` and `"message"` may
/// be `null` to clear:
///
/// ```json
/// { "name": "Mika", "icon": null }
/// ```
///
/// # Returns
///
/// `Ok` echoing the merged user.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_update_user(
    store: *mut StudyStore,
    json_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_update_user".to_string(),
        );
        return respond(&error);
    }

    let json_str = match read_c_str(json_ptr, "user JSON") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let update: UserUpdate = match serde_json::from_str(&json_str) {
        Ok(u) => u,
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Invalid user JSON: {e}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    store.update_user(update);

    match serde_json::to_string(store.user()) {
        Ok(json) => respond(&StoreResponse::Ok(json)),
        Err(e) => {
            let error = StoreResponse::SerializationError(format!("Failed to serialize user: {e}"));
            respond(&error)
        }
    }
}

/// Sets the display mode to `"light"` or `"dark"`.
///
/// Any other value answers `BadRequest` and changes nothing.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_set_display_mode(
    store: *mut StudyStore,
    mode_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_set_display_mode".to_string(),
        );
        return respond(&error);
    }

    let mode_str = match read_c_str(mode_ptr, "mode") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    let mode = match DisplayMode::from_str(&mode_str) {
        Some(m) => m,
        None => {
            let error = StoreResponse::BadRequest(format!("Unknown display mode: {mode_str}"));
            return respond(&error);
        }
    };

    let store = unsafe { &mut *store };
    store.set_display_mode(mode);
    respond(&StoreResponse::Ok(mode.as_str().to_string()))
}

/// Flips light/dark and answers `Ok` with the new mode.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_toggle_display_mode(store: *mut StudyStore) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_toggle_display_mode".to_string(),
        );
        return respond(&error);
    }

    let store = unsafe { &mut *store };
    let mode = store.toggle_display_mode();
    respond(&StoreResponse::Ok(mode.as_str().to_string()))
}

/// Replaces the background color. A null `color_ptr` clears it.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn studylog_set_background_color(
    store: *mut StudyStore,
    color_ptr: *const c_char,
) -> *const c_char {
    if store.is_null() {
        let error = StoreResponse::BadRequest(
            "Null store pointer passed to studylog_set_background_color".to_string(),
        );
        return respond(&error);
    }

    let color = if color_ptr.is_null() {
        None
    } else {
        match read_c_str(color_ptr, "color") {
            Ok(s) => Some(s),
            Err(error_ptr) => return error_ptr,
        }
    };

    let store = unsafe { &mut *store };
    let message = match &color {
        Some(c) => format!("Background color set to {c}"),
        None => "Background color cleared".to_string(),
    };
    store.set_background_color(color);
    respond(&StoreResponse::Ok(message))
}

/// Serializes a [`StoreResponse`] and hands it to the caller as a C string.
///
/// Returns null if serialization or C string creation fails; both are
/// logged.
fn respond(response: &StoreResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Reads a C string parameter, answering a `BadRequest` envelope pointer on
/// null or invalid UTF-8.
fn read_c_str(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = StoreResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(respond(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = StoreResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(respond(&error))
        }
    }
}
