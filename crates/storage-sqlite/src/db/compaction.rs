//! Space reclamation and the background compaction task.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use log::{debug, error, info};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::runtime::{self, Handle, Runtime};
use tokio::sync::oneshot;
use tokio::task::{self, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};

use super::{checkpoint, get_connection, DbPool};
use crate::errors::StorageError;
use stonk_core::errors::{DatabaseError, Error, Result};
use stonk_core::maintenance::CompactionOutcome;

#[derive(QueryableByName)]
struct PageCount {
    #[diesel(sql_type = BigInt)]
    page_count: i64,
}

#[derive(QueryableByName)]
struct FreelistCount {
    #[diesel(sql_type = BigInt)]
    freelist_count: i64,
}

/// Rewrites the database file when at least `threshold` of its pages are free.
pub fn compact_pool(pool: &DbPool, threshold: f64) -> Result<CompactionOutcome> {
    let mut conn = get_connection(pool)?;

    let pages = diesel::sql_query("PRAGMA page_count")
        .get_result::<PageCount>(&mut *conn)
        .map_err(StorageError::from)?
        .page_count;
    let free = diesel::sql_query("PRAGMA freelist_count")
        .get_result::<FreelistCount>(&mut *conn)
        .map_err(StorageError::from)?
        .freelist_count;

    if pages == 0 || (free as f64) < (pages as f64) * threshold {
        debug!("Compaction skipped: {} of {} pages free", free, pages);
        return Ok(CompactionOutcome::NothingToReclaim);
    }

    conn.batch_execute("VACUUM;").map_err(|e| {
        Error::Database(DatabaseError::CompactionFailed(e.to_string()))
    })?;
    checkpoint(&mut conn)?;
    info!("Compaction reclaimed {} of {} pages", free, pages);
    Ok(CompactionOutcome::Reclaimed)
}

/// Handle to the task that compacts the store on a fixed interval.
///
/// The task runs on a small runtime owned by the worker, so the store works
/// the same with or without an ambient tokio runtime.
pub(crate) struct CompactionWorker {
    runtime: Runtime,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl CompactionWorker {
    pub(crate) fn spawn(pool: Arc<DbPool>, interval: Duration, threshold: f64) -> Result<Self> {
        let runtime = runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(1)
            .thread_name("stonk-compaction")
            .enable_time()
            .build()
            .map_err(StorageError::from)?;

        // interval_at rejects a zero period.
        let period = interval.max(Duration::from_millis(1));
        let (stop, mut stopped) = oneshot::channel::<()>();
        let handle = runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        let pool = Arc::clone(&pool);
                        match task::spawn_blocking(move || compact_pool(&pool, threshold)).await {
                            Ok(Ok(CompactionOutcome::NothingToReclaim)) => {
                                debug!("Background compaction: nothing to reclaim")
                            }
                            Ok(Ok(CompactionOutcome::Reclaimed)) => {
                                info!("Background compaction reclaimed space")
                            }
                            Ok(Err(e)) => error!("Background compaction failed: {}", e),
                            Err(e) => error!("Background compaction task failed: {}", e),
                        }
                    }
                }
            }
        });
        debug!("Background compaction every {:?}", period);
        Ok(Self {
            runtime,
            stop,
            handle,
        })
    }

    /// Signals the task and waits for an in-flight pass to finish.
    pub(crate) fn stop(self) {
        let CompactionWorker {
            runtime,
            stop,
            handle,
        } = self;
        let _ = stop.send(());

        let finish = move || {
            if let Err(e) = runtime.block_on(handle) {
                error!("Compaction task ended abnormally: {}", e);
            }
        };
        // block_on is not allowed on a runtime thread, so wait from a plain one.
        if Handle::try_current().is_ok() {
            if thread::spawn(finish).join().is_err() {
                error!("Compaction shutdown panicked");
            }
        } else {
            finish();
        }
    }
}
