//! Connection management for the journal store.
//!
//! The store is one SQLite file opened through a single-connection r2d2 pool.
//! That connection runs in exclusive locking mode and holds the file lock for
//! its whole life, which keeps other processes out of the journal.

use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::{Connection, SimpleConnection};
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::{IntoCore, StorageError};
use stonk_core::constants::DATA_DIR_NAME;
use stonk_core::errors::{DatabaseError, Error, Result};

mod compaction;
mod kv_store;
mod layout;

pub use compaction::compact_pool;
pub use kv_store::{KeyValueStore, KvEntry};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// File name of the database inside the store directory.
pub const DB_FILE_NAME: &str = "journal.db";

/// Environment variable overriding the store directory.
pub const DATA_DIR_ENV: &str = "STONK_DATA_DIR";
/// Environment variable overriding the background compaction interval, in seconds.
/// `0` disables background compaction.
pub const COMPACTION_INTERVAL_ENV: &str = "STONK_COMPACTION_INTERVAL_SECS";

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Tunables for opening a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreOptions {
    pub data_dir: PathBuf,
    /// `None` disables the background compaction thread.
    pub compaction_interval: Option<Duration>,
    /// Fraction of free pages at which a compaction rewrites the file.
    pub reclaim_threshold: f64,
    /// Upper bound for the write-ahead log kept on disk, in bytes.
    pub journal_size_limit: u64,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR_NAME),
            compaction_interval: Some(Duration::from_secs(30 * 60)),
            reclaim_threshold: 0.5,
            journal_size_limit: 10 * 1024 * 1024,
        }
    }
}

impl StoreOptions {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Applies `STONK_DATA_DIR` and `STONK_COMPACTION_INTERVAL_SECS` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(raw) = std::env::var(COMPACTION_INTERVAL_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(0) => self.compaction_interval = None,
                Ok(secs) => self.compaction_interval = Some(Duration::from_secs(secs)),
                Err(e) => error!("Ignoring {}={:?}: {}", COMPACTION_INTERVAL_ENV, raw, e),
            }
        }
        self
    }

    pub fn without_compaction(mut self) -> Self {
        self.compaction_interval = None;
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

fn path_str(path: &Path) -> Result<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        Error::Database(DatabaseError::StoreUnavailable(format!(
            "store path is not valid UTF-8: {}",
            path.display()
        )))
    })
}

/// Pragmas applied to every connection before it is handed out.
fn connection_pragmas(journal_size_limit: u64) -> String {
    format!(
        "PRAGMA locking_mode = EXCLUSIVE;
         PRAGMA busy_timeout = 0;
         PRAGMA journal_mode = WAL;
         PRAGMA journal_size_limit = {};
         PRAGMA synchronous = NORMAL;",
        journal_size_limit
    )
}

/// Takes the file lock. In exclusive locking mode it is kept until the
/// connection closes.
const TAKE_LOCK: &str = "BEGIN EXCLUSIVE; COMMIT;";

#[derive(Debug)]
struct ConnectionCustomizer {
    journal_size_limit: u64,
}

impl r2d2::CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&connection_pragmas(self.journal_size_limit))
            .and_then(|_| conn.batch_execute(TAKE_LOCK))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Fails fast when another handle already holds the store.
///
/// The pool would otherwise keep retrying until its connection timeout.
fn probe_lock(db_path: &str, journal_size_limit: u64) -> Result<()> {
    let mut conn = SqliteConnection::establish(db_path).map_err(StorageError::from)?;
    conn.batch_execute(&connection_pragmas(journal_size_limit))
        .and_then(|_| conn.batch_execute(TAKE_LOCK))
        .map_err(|e| {
            error!("Journal store at {} is locked: {}", db_path, e);
            Error::Database(DatabaseError::StoreUnavailable(format!(
                "{} ({})",
                e, db_path
            )))
        })
}

/// Creates the store directory and a single-connection pool over the database.
pub fn create_pool(options: &StoreOptions) -> Result<Arc<DbPool>> {
    std::fs::create_dir_all(&options.data_dir).map_err(StorageError::from)?;
    let db_path = path_str(&options.db_path())?;

    probe_lock(&db_path, options.journal_size_limit)?;

    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(1)
        .min_idle(Some(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer {
            journal_size_limit: options.journal_size_limit,
        }))
        .build(manager)
        .map_err(|e| StorageError::Unavailable(e.to_string()))?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut connection = get_connection(pool)?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| {
            error!("Database migration failed: {}", e);
            StorageError::MigrationFailed(e.to_string())
        })?;

    for migration_version in &applied {
        info!("Applied migration {}", migration_version);
    }
    Ok(())
}

/// Gets the store's connection from the pool, waiting while another caller holds it.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get().into_core()
}

/// Flushes the write-ahead log into the database file and truncates it.
pub fn checkpoint(conn: &mut SqliteConnection) -> Result<()> {
    conn.batch_execute("PRAGMA wal_checkpoint(TRUNCATE);").into_core()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_tuning() {
        let options = StoreOptions::default();
        assert_eq!(options.compaction_interval, Some(Duration::from_secs(1800)));
        assert_eq!(options.reclaim_threshold, 0.5);
        assert_eq!(options.journal_size_limit, 10_485_760);
    }

    #[test]
    fn db_file_lives_inside_data_dir() {
        let options = StoreOptions::new("/tmp/journal-dir").without_compaction();
        assert_eq!(options.db_path(), PathBuf::from("/tmp/journal-dir/journal.db"));
        assert!(options.compaction_interval.is_none());
    }
}
