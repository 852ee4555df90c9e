//! Key-value backends for the persistence layer.
//!
//! The adapter in [`crate::storage`] only needs the three primitives a
//! browser's `localStorage` offers: get, set and remove by string key.
//! [`KeyValueStore`] captures that seam; [`LmdbStore`] is the durable
//! implementation and [`MemoryStore`] the ephemeral one used by tests and
//! throwaway sessions.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::info;

use crate::error::StoreError;

/// The host key-value primitive: string keys, string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Durable backend over an LMDB environment.
///
/// `open("studylog")` appends `.lmdb` to the path, creates (or reopens)
/// that directory and keeps the whole store in its default database. Every
/// `set`/`remove` runs in its own write transaction, so a torn write cannot
/// corrupt the previous value.
pub struct LmdbStore {
    env: Environment,
    db: Database,
}

impl LmdbStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = lmdb_dir(path.as_ref());
        std::fs::create_dir_all(&dir)?;
        let env = Environment::new()
            .set_map_size(32 * 1024 * 1024)
            .open(&dir)?;
        let db = env.create_db(None, DatabaseFlags::empty())?;
        info!("Opened key-value store at {}", dir.display());
        Ok(Self { env, db })
    }
}

fn lmdb_dir(path: &Path) -> PathBuf {
    let mut dir = OsString::from(path.as_os_str());
    dir.push(".lmdb");
    PathBuf::from(dir)
}

impl KeyValueStore for LmdbStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let txn = self.env.begin_ro_txn()?;
        let value = match txn.get(self.db, &key) {
            Ok(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut txn = self.env.begin_rw_txn()?;
        match txn.del(self.db, &key, None) {
            Ok(()) | Err(lmdb::Error::NotFound) => {}
            Err(e) => return Err(e.into()),
        }
        txn.commit()?;
        Ok(())
    }
}

/// In-memory backend, mirroring [`LmdbStore`] without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
