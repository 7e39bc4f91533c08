use log::debug;
use std::sync::Arc;

use crate::db::KeyValueStore;
use stonk_core::errors::Result;
use stonk_core::position::{PositionSettings, PositionSettingsRepositoryTrait};

pub const POSITION_SETTINGS_KEY: &str = "position_settings";

/// Singleton record. Never deleted.
pub struct PositionSettingsRepository {
    store: Arc<KeyValueStore>,
}

impl PositionSettingsRepository {
    pub fn new(store: Arc<KeyValueStore>) -> Self {
        PositionSettingsRepository { store }
    }
}

impl PositionSettingsRepositoryTrait for PositionSettingsRepository {
    fn get_settings(&self) -> Result<PositionSettings> {
        match self.store.get(POSITION_SETTINGS_KEY) {
            Err(e) if e.is_not_found() => {
                debug!("No position settings stored yet, using defaults");
                Ok(PositionSettings::default())
            }
            other => other,
        }
    }

    fn save_settings(&self, settings: &PositionSettings) -> Result<()> {
        self.store.put(POSITION_SETTINGS_KEY, settings)
    }
}
