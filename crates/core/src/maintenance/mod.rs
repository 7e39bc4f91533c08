//! Store maintenance (space reclamation).

mod maintenance_model;
mod maintenance_service;
mod maintenance_traits;

pub use maintenance_model::{CompactionOutcome, CompactionStatus};
pub use maintenance_service::MaintenanceService;
pub use maintenance_traits::{MaintenanceServiceTrait, StoreMaintenanceTrait};
