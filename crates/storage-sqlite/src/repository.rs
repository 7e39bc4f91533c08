//! Generic JSON-document repository over the key-value store.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{KeyValueStore, KvEntry};
use stonk_core::errors::Result;
use stonk_core::records::{RecordSet, SkippedRecord};

/// A record stored as one JSON value under `<PREFIX><id>`.
pub trait StoredEntity: Serialize + DeserializeOwned {
    const PREFIX: &'static str;
    /// Human-readable name used in log lines.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    fn key(&self) -> String {
        format!("{}{}", Self::PREFIX, self.id())
    }
}

/// Decodes scanned entries, leaving out the ones that do not parse.
pub(crate) fn decode_entries<T: StoredEntity>(entries: Vec<KvEntry>) -> RecordSet<T> {
    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for entry in entries {
        match serde_json::from_slice::<T>(&entry.value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping unreadable {} {}: {}", T::KIND, entry.key, e);
                skipped.push(SkippedRecord {
                    key: entry.key,
                    reason: e.to_string(),
                });
            }
        }
    }
    RecordSet::new(records, skipped)
}

pub(crate) fn assign_id_if_empty<T: StoredEntity>(entity: &mut T) {
    if entity.id().is_empty() {
        entity.set_id(Uuid::new_v4().to_string());
    }
}

pub struct EntityRepository<T> {
    store: Arc<KeyValueStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: StoredEntity> EntityRepository<T> {
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// Upserts `entity`, assigning a fresh id when it has none. Last write wins.
    pub fn save(&self, mut entity: T) -> Result<T> {
        assign_id_if_empty(&mut entity);
        self.store.put(&entity.key(), &entity)?;
        Ok(entity)
    }

    pub fn get(&self, id: &str) -> Result<T> {
        self.store.get(&format!("{}{}", T::PREFIX, id))
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(&format!("{}{}", T::PREFIX, id))
    }

    /// Every readable record in key order, plus the skipped ones.
    pub fn list(&self) -> Result<RecordSet<T>> {
        Ok(decode_entries(self.store.scan_prefix(T::PREFIX)?))
    }
}
