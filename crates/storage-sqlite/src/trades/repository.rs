use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

use crate::db::KeyValueStore;
use crate::repository::{EntityRepository, StoredEntity};
use stonk_core::errors::{DatabaseError, Error, Result};
use stonk_core::records::{DeleteOutcome, FailedKey, RecordSet};
use stonk_core::trades::{Trade, TradeRepositoryTrait};
use stonk_core::utils::time_utils::to_rfc3339_nanos;

pub const TRADE_PREFIX: &str = "trade:";

/// `trade:<id>_<expiration>`. Fixed-width nanosecond timestamps keep the legs
/// of one trade in expiration order.
pub fn trade_key(id: &str, expiration: &DateTime<Utc>) -> String {
    format!("{}{}_{}", TRADE_PREFIX, id, to_rfc3339_nanos(expiration))
}

fn legs_prefix(id: &str) -> String {
    format!("{}{}_", TRADE_PREFIX, id)
}

/// Timestamps never contain `_`, so this excludes legs of ids that merely
/// extend `id` (e.g. `abc_def` under the `abc` prefix).
fn is_leg_of(key: &str, prefix: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|suffix| !suffix.contains('_'))
}

impl StoredEntity for Trade {
    const PREFIX: &'static str = TRADE_PREFIX;
    const KIND: &'static str = "trade";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn key(&self) -> String {
        trade_key(&self.id, &self.expiration_date)
    }
}

pub struct TradeRepository {
    entities: EntityRepository<Trade>,
}

impl TradeRepository {
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        TradeRepository {
            entities: EntityRepository::new(store),
        }
    }

    fn store(&self) -> &KeyValueStore {
        self.entities.store()
    }

    /// Deletes every leg of `id` whose key passes `remove`, continuing past
    /// individual failures.
    fn delete_legs(&self, id: &str, remove: impl Fn(&str) -> bool) -> Result<DeleteOutcome> {
        let mut outcome = DeleteOutcome::default();
        let prefix = legs_prefix(id);
        for key in self.store().scan_prefix_keys(&prefix)? {
            if !is_leg_of(&key, &prefix) || !remove(&key) {
                continue;
            }
            match self.store().delete(&key) {
                Ok(()) => outcome.deleted_keys.push(key),
                Err(e) => outcome.failed_keys.push(FailedKey {
                    key,
                    error: e.to_string(),
                }),
            }
        }
        Ok(outcome)
    }
}

impl TradeRepositoryTrait for TradeRepository {
    fn save(&self, trade: Trade) -> Result<Trade> {
        self.entities.save(trade)
    }

    fn get(&self, id: &str) -> Result<Vec<Trade>> {
        let prefix = legs_prefix(id);
        let entries: Vec<_> = self
            .store()
            .scan_prefix(&prefix)?
            .into_iter()
            .filter(|entry| is_leg_of(&entry.key, &prefix))
            .collect();
        if entries.is_empty() {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "{}{}",
                TRADE_PREFIX, id
            ))));
        }
        entries
            .into_iter()
            .map(|entry| {
                serde_json::from_slice::<Trade>(&entry.value).map_err(|e| {
                    Error::Database(DatabaseError::Serialization(format!(
                        "{}: {}",
                        entry.key, e
                    )))
                })
            })
            .collect()
    }

    fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        let outcome = self.delete_legs(id, |_| true)?;
        debug!(
            "Trade {}: deleted {} leg(s), {} failed",
            id,
            outcome.deleted_keys.len(),
            outcome.failed_keys.len()
        );
        Ok(outcome)
    }

    fn prune_legs(&self, id: &str, keep: &[DateTime<Utc>]) -> Result<DeleteOutcome> {
        let kept: HashSet<String> = keep.iter().map(|exp| trade_key(id, exp)).collect();
        let outcome = self.delete_legs(id, |key| !kept.contains(key))?;
        if !outcome.deleted_keys.is_empty() {
            debug!("Trade {}: pruned {:?}", id, outcome.deleted_keys);
        }
        Ok(outcome)
    }

    fn get_all(&self) -> Result<RecordSet<Trade>> {
        let mut set = self.entities.list()?;
        set.records.sort_by(|a, b| {
            b.entry_date
                .cmp(&a.entry_date)
                .then(a.leg_number.cmp(&b.leg_number))
        });
        Ok(set)
    }
}
