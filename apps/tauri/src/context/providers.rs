use anyhow::Context;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

use super::registry::ServiceContext;
use stonk_core::{
    constants::{DATA_DIR_NAME, LEGACY_DATA_DIR_NAME},
    export::ExportService,
    maintenance::MaintenanceService,
    position::PositionSettingsService,
    risk::RiskAssessmentService,
    stocks::StockRatingService,
    trades::TradeService,
};
use stonk_storage_sqlite::{
    KeyValueStore, PositionSettingsRepository, RiskAssessmentRepository, StockRatingRepository,
    StoreOptions, TradeRepository,
};

/// Store options for a user's home directory, with environment overrides applied.
pub fn store_options(home_dir: &Path) -> StoreOptions {
    StoreOptions::new(home_dir.join(DATA_DIR_NAME)).with_env_overrides()
}

/// The pre-SQLite journal directory uses an incompatible on-disk format and is never read.
pub fn warn_about_legacy_store(home_dir: &Path) {
    let legacy = home_dir.join(LEGACY_DATA_DIR_NAME);
    if legacy.is_dir() {
        warn!(
            "Found a journal from an older release at {}. Its format cannot be read by this \
             version; export it with the old release and import the file here.",
            legacy.display()
        );
    }
}

pub fn initialize_context(options: StoreOptions) -> anyhow::Result<ServiceContext> {
    let data_dir = options.data_dir.clone();
    let store = Arc::new(
        KeyValueStore::open(options)
            .with_context(|| format!("failed to open journal store at {}", data_dir.display()))?,
    );

    // Instantiate Repositories
    let risk_repository = Arc::new(RiskAssessmentRepository::new(store.clone()));
    let stock_repository = Arc::new(StockRatingRepository::new(store.clone()));
    let trade_repository = Arc::new(TradeRepository::new(store.clone()));
    let settings_repository = Arc::new(PositionSettingsRepository::new(store.clone()));

    // Instantiate Services
    let risk_service = Arc::new(RiskAssessmentService::new(risk_repository.clone()));
    let stock_service = Arc::new(StockRatingService::new(stock_repository.clone()));
    let trade_service = Arc::new(TradeService::new(trade_repository.clone()));
    let position_settings_service =
        Arc::new(PositionSettingsService::new(settings_repository.clone()));
    let maintenance_service = Arc::new(MaintenanceService::new(store.clone()));
    let export_service = Arc::new(ExportService::new(
        risk_repository,
        stock_repository,
        trade_repository,
        settings_repository,
    ));

    info!("Service context ready (store at {})", data_dir.display());

    Ok(ServiceContext {
        store,
        risk_service,
        stock_service,
        trade_service,
        position_settings_service,
        maintenance_service,
        export_service,
    })
}
