use log::{error, info};
use std::sync::Arc;

use super::maintenance_model::CompactionStatus;
use super::maintenance_traits::{MaintenanceServiceTrait, StoreMaintenanceTrait};

pub struct MaintenanceService {
    store: Arc<dyn StoreMaintenanceTrait>,
}

impl MaintenanceService {
    pub fn new(store: Arc<dyn StoreMaintenanceTrait>) -> Self {
        MaintenanceService { store }
    }
}

impl MaintenanceServiceTrait for MaintenanceService {
    fn run_compaction(&self) -> CompactionStatus {
        match self.store.compact() {
            Ok(outcome) => {
                let status = CompactionStatus::from(outcome);
                info!("Manual compaction: {}", status.message());
                status
            }
            Err(e) => {
                error!("Manual compaction failed: {}", e);
                CompactionStatus::Failed(e.to_string())
            }
        }
    }
}
