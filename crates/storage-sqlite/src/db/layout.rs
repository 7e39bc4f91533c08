//! Key layout versioning.
//!
//! Version 1 stored each trade under `trade:<id>`. Version 2 stores one entry
//! per leg under `trade:<id>_<expiration>`.

use log::{info, warn};

use super::KeyValueStore;
use crate::trades::{trade_key, TRADE_PREFIX};
use stonk_core::constants::KEY_LAYOUT_VERSION;
use stonk_core::errors::{DatabaseError, Error, Result};
use stonk_core::trades::Trade;

pub(crate) const LAYOUT_VERSION_KEY: &str = "meta:layout_version";

/// Version marker of the store, or `None` for stores written before versioning.
pub(crate) fn stored_version(store: &KeyValueStore) -> Result<Option<u32>> {
    match store.get::<u32>(LAYOUT_VERSION_KEY) {
        Ok(version) => Ok(Some(version)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Brings the key layout up to the current version.
///
/// Each step is idempotent, so an interrupted upgrade is finished on the next open.
pub(crate) fn upgrade(store: &KeyValueStore) -> Result<()> {
    let version = stored_version(store)?;
    match version {
        Some(v) if v == KEY_LAYOUT_VERSION => return Ok(()),
        Some(v) if v > KEY_LAYOUT_VERSION => {
            return Err(Error::Database(DatabaseError::StoreUnavailable(format!(
                "store uses key layout {} but this build only knows up to {}",
                v, KEY_LAYOUT_VERSION
            ))));
        }
        _ => {}
    }

    let moved = rekey_single_key_trades(store)?;
    store.put(LAYOUT_VERSION_KEY, &KEY_LAYOUT_VERSION)?;
    info!(
        "Key layout upgraded from {} to {} ({} trade(s) re-keyed)",
        version.map_or_else(|| "unversioned".to_string(), |v| v.to_string()),
        KEY_LAYOUT_VERSION,
        moved
    );
    Ok(())
}

fn rekey_single_key_trades(store: &KeyValueStore) -> Result<usize> {
    let mut moved = 0;
    for entry in store.scan_prefix(TRADE_PREFIX)? {
        let id = &entry.key[TRADE_PREFIX.len()..];
        if id.contains('_') {
            continue;
        }

        let mut trade: Trade = match serde_json::from_slice(&entry.value) {
            Ok(trade) => trade,
            Err(e) => {
                warn!("Leaving undecodable trade {} in place: {}", entry.key, e);
                continue;
            }
        };
        if trade.id.is_empty() {
            trade.id = id.to_string();
        }

        store.put(&trade_key(&trade.id, &trade.expiration_date), &trade)?;
        store.delete(&entry.key)?;
        moved += 1;
    }
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreOptions;
    use tempfile::tempdir;

    fn open(dir: &std::path::Path) -> KeyValueStore {
        KeyValueStore::open(StoreOptions::new(dir).without_compaction()).unwrap()
    }

    const LEGACY_TRADE: &str = r#"{
        "id": "abc",
        "symbol": "TSLA",
        "sector": "Consumer Discretionary",
        "strategy": "Vertical Spreads",
        "type": "Bear Put Spread",
        "entryDate": "2024-02-01T15:00:00Z",
        "expirationDate": "2024-03-15T20:00:00Z"
    }"#;

    #[test]
    fn fresh_store_is_stamped_with_current_version() {
        let dir = tempdir().unwrap();
        let store = open(dir.path());
        assert_eq!(stored_version(&store).unwrap(), Some(KEY_LAYOUT_VERSION));
    }

    #[test]
    fn single_key_trades_are_rekeyed_on_open() {
        let dir = tempdir().unwrap();
        {
            let store = open(dir.path());
            store.put_raw("trade:abc", LEGACY_TRADE.as_bytes().to_vec()).unwrap();
            store.put_raw("trade:junk", b"not json".to_vec()).unwrap();
            store.delete(LAYOUT_VERSION_KEY).unwrap();
        }

        let store = open(dir.path());
        let keys = store.scan_prefix_keys(TRADE_PREFIX).unwrap();
        assert_eq!(
            keys,
            vec![
                "trade:abc_2024-03-15T20:00:00.000000000Z".to_string(),
                "trade:junk".to_string(),
            ]
        );
        assert_eq!(stored_version(&store).unwrap(), Some(KEY_LAYOUT_VERSION));
    }

    #[test]
    fn newer_layout_is_refused() {
        let dir = tempdir().unwrap();
        {
            let store = open(dir.path());
            store.put(LAYOUT_VERSION_KEY, &(KEY_LAYOUT_VERSION + 1)).unwrap();
        }
        let result = KeyValueStore::open(StoreOptions::new(dir.path()).without_compaction());
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::StoreUnavailable(_)))
        ));
    }
}
