use super::maintenance_model::{CompactionOutcome, CompactionStatus};
use crate::errors::Result;

/// Implemented by stores that can reclaim space from superseded values.
pub trait StoreMaintenanceTrait: Send + Sync {
    fn compact(&self) -> Result<CompactionOutcome>;
}

pub trait MaintenanceServiceTrait: Send + Sync {
    /// Runs one compaction pass. Failures are folded into the status.
    fn run_compaction(&self) -> CompactionStatus;
}
