mod repository;

pub use repository::{PositionSettingsRepository, POSITION_SETTINGS_KEY};
