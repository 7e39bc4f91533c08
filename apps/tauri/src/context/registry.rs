use std::sync::{Arc, OnceLock};

use stonk_core::errors::{Error, Result};
use stonk_core::{export, maintenance, position, risk, stocks, trades};
use stonk_storage_sqlite::KeyValueStore;

pub struct ServiceContext {
    pub store: Arc<KeyValueStore>,

    // Services
    pub risk_service: Arc<dyn risk::RiskAssessmentServiceTrait>,
    pub stock_service: Arc<dyn stocks::StockRatingServiceTrait>,
    pub trade_service: Arc<dyn trades::TradeServiceTrait>,
    pub position_settings_service: Arc<dyn position::PositionSettingsServiceTrait>,
    pub maintenance_service: Arc<dyn maintenance::MaintenanceServiceTrait>,
    pub export_service: Arc<dyn export::ExportServiceTrait>,
}

impl ServiceContext {
    pub fn risk_service(&self) -> Arc<dyn risk::RiskAssessmentServiceTrait> {
        Arc::clone(&self.risk_service)
    }

    pub fn stock_service(&self) -> Arc<dyn stocks::StockRatingServiceTrait> {
        Arc::clone(&self.stock_service)
    }

    pub fn trade_service(&self) -> Arc<dyn trades::TradeServiceTrait> {
        Arc::clone(&self.trade_service)
    }

    pub fn position_settings_service(&self) -> Arc<dyn position::PositionSettingsServiceTrait> {
        Arc::clone(&self.position_settings_service)
    }

    pub fn maintenance_service(&self) -> Arc<dyn maintenance::MaintenanceServiceTrait> {
        Arc::clone(&self.maintenance_service)
    }

    pub fn export_service(&self) -> Arc<dyn export::ExportServiceTrait> {
        Arc::clone(&self.export_service)
    }

    /// Stops background work and releases the journal file.
    pub fn shutdown(&self) -> Result<()> {
        self.store.close()
    }
}

/// Tauri-managed holder for the context.
///
/// Managed empty before setup runs and filled once setup has opened the store,
/// so commands that arrive earlier get `Error::NotInitialized`.
#[derive(Default)]
pub struct ContextSlot(OnceLock<Arc<ServiceContext>>);

impl ContextSlot {
    /// Fills the slot. Returns the context back if the slot was already filled.
    pub fn set(&self, context: Arc<ServiceContext>) -> std::result::Result<(), Arc<ServiceContext>> {
        self.0.set(context)
    }

    pub fn get(&self) -> Result<Arc<ServiceContext>> {
        self.0.get().cloned().ok_or(Error::NotInitialized)
    }
}
