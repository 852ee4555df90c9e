use std::fmt::{Display, Formatter};

use lmdb::Error as LmdbError;
use serde_json::Error as SerdeError;

/// Error type for store and storage operations.
///
/// Most failures never reach callers: the persistence adapter logs and masks
/// them (see [`crate::storage::AppStorage`]). The places where a
/// `StoreError` does surface are backend construction
/// ([`crate::local_store::LmdbStore::open`]) and backup import
/// ([`crate::study_store::StudyStore::import_data`]).
#[derive(Debug)]
pub enum StoreError {
    /// The key-value backend failed (environment, transaction, or I/O).
    Storage(String),
    /// JSON could not be produced or parsed.
    Serialization(String),
    /// The payload parsed but violates the backup contract.
    Validation(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Storage(msg) => write!(f, "Storage error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StoreError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<LmdbError> for StoreError {
    fn from(err: LmdbError) -> Self {
        StoreError::Storage(format!("LMDB error: {}", err))
    }
}

impl From<SerdeError> for StoreError {
    fn from(err: SerdeError) -> Self {
        StoreError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(format!("IO error: {}", err))
    }
}
