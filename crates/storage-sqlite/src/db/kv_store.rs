use diesel::prelude::*;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use super::compaction::{compact_pool, CompactionWorker};
use super::{checkpoint, create_pool, get_connection, layout, run_migrations, DbPool, StoreOptions};
use crate::errors::StorageError;
use crate::schema::kv_entries;
use stonk_core::errors::{DatabaseError, Error, Result};
use stonk_core::maintenance::{CompactionOutcome, StoreMaintenanceTrait};

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = kv_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct KvEntryDB {
    key: String,
    value: Vec<u8>,
}

/// A raw stored entry: the key and its JSON-encoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl From<KvEntryDB> for KvEntry {
    fn from(row: KvEntryDB) -> Self {
        KvEntry {
            key: row.key,
            value: row.value,
        }
    }
}

/// Smallest string greater than every string starting with `prefix`.
///
/// SQLite compares TEXT byte-wise and UTF-8 preserves code point order, so
/// bumping the last code point bounds the prefix range.
fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        let next = (last as u32 + 1..=char::MAX as u32).find_map(char::from_u32);
        if let Some(next) = next {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

/// Ordered key-value store over a single SQLite table.
///
/// Values are JSON documents. Every operation checks the single pooled
/// connection out for its own duration, so calls must not be nested.
pub struct KeyValueStore {
    pool: RwLock<Option<Arc<DbPool>>>,
    compactor: Mutex<Option<CompactionWorker>>,
    options: StoreOptions,
}

impl KeyValueStore {
    /// Opens (or creates) the store in `options.data_dir`.
    ///
    /// Fails with `StoreUnavailable` when another handle holds the directory.
    pub fn open(options: StoreOptions) -> Result<Self> {
        let pool = create_pool(&options)?;
        run_migrations(&pool)?;

        let store = KeyValueStore {
            pool: RwLock::new(Some(pool.clone())),
            compactor: Mutex::new(None),
            options,
        };
        layout::upgrade(&store)?;

        if let Some(interval) = store.options.compaction_interval {
            let worker =
                CompactionWorker::spawn(pool, interval, store.options.reclaim_threshold)?;
            *store.lock_compactor() = Some(worker);
        }

        info!("Journal store opened at {}", store.path().display());
        Ok(store)
    }

    /// Opens a store in `dir` with default tuning.
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open(StoreOptions::new(dir))
    }

    pub fn path(&self) -> &Path {
        &self.options.data_dir
    }

    fn lock_compactor(&self) -> std::sync::MutexGuard<'_, Option<CompactionWorker>> {
        self.compactor
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn pool(&self) -> Result<Arc<DbPool>> {
        let guard = self
            .pool
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone().ok_or_else(|| {
            Error::Database(DatabaseError::StoreUnavailable(
                "store is closed".to_string(),
            ))
        })
    }

    /// Serialises `value` and upserts it under `key`.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value).map_err(StorageError::from)?;
        self.put_raw(key, bytes)
    }

    /// Upserts already-encoded bytes under `key`.
    pub fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let pool = self.pool()?;
        let mut conn = get_connection(&pool)?;
        diesel::replace_into(kv_entries::table)
            .values(&KvEntryDB {
                key: key.to_string(),
                value,
            })
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Reads and decodes the value under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let bytes = self.get_raw(key)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            Error::Database(DatabaseError::Serialization(format!("{}: {}", key, e)))
        })
    }

    pub fn get_raw(&self, key: &str) -> Result<Vec<u8>> {
        let pool = self.pool()?;
        let mut conn = get_connection(&pool)?;
        kv_entries::table
            .find(key)
            .select(kv_entries::value)
            .first::<Vec<u8>>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(key.to_string())))
    }

    /// Removes `key`. Removing an absent key succeeds.
    pub fn delete(&self, key: &str) -> Result<()> {
        let pool = self.pool()?;
        let mut conn = get_connection(&pool)?;
        diesel::delete(kv_entries::table.find(key))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Every entry whose key starts with `prefix`, in key order.
    pub fn scan_prefix(&self, prefix: &str) -> Result<Vec<KvEntry>> {
        let pool = self.pool()?;
        let mut conn = get_connection(&pool)?;

        // One SELECT reads one consistent snapshot.
        let mut query = kv_entries::table
            .select(KvEntryDB::as_select())
            .filter(kv_entries::key.ge(prefix.to_string()))
            .into_boxed();
        if let Some(upper) = prefix_upper_bound(prefix) {
            query = query.filter(kv_entries::key.lt(upper));
        }
        let rows = query
            .order(kv_entries::key.asc())
            .load::<KvEntryDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .filter(|row| row.key.starts_with(prefix))
            .map(KvEntry::from)
            .collect())
    }

    /// Keys starting with `prefix`, in key order.
    pub fn scan_prefix_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let pool = self.pool()?;
        let mut conn = get_connection(&pool)?;

        let mut query = kv_entries::table
            .select(kv_entries::key)
            .filter(kv_entries::key.ge(prefix.to_string()))
            .into_boxed();
        if let Some(upper) = prefix_upper_bound(prefix) {
            query = query.filter(kv_entries::key.lt(upper));
        }
        let keys = query
            .order(kv_entries::key.asc())
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(keys.into_iter().filter(|k| k.starts_with(prefix)).collect())
    }

    /// Runs one compaction pass now.
    pub fn compact(&self) -> Result<CompactionOutcome> {
        let pool = self.pool()?;
        compact_pool(&pool, self.options.reclaim_threshold)
    }

    /// Stops background compaction, checkpoints the log and releases the file.
    ///
    /// Later calls on this handle fail with `StoreUnavailable`. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        if let Some(worker) = self.lock_compactor().take() {
            worker.stop();
        }

        let pool = {
            let mut guard = self
                .pool
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            guard.take()
        };
        let Some(pool) = pool else {
            return Ok(());
        };

        let mut conn = get_connection(&pool)?;
        checkpoint(&mut conn)?;
        drop(conn);
        drop(pool);
        info!("Journal store at {} closed", self.path().display());
        Ok(())
    }
}

impl Drop for KeyValueStore {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!("Failed to close journal store cleanly: {}", e);
        }
    }
}

impl StoreMaintenanceTrait for KeyValueStore {
    fn compact(&self) -> Result<CompactionOutcome> {
        KeyValueStore::compact(self)
    }
}
