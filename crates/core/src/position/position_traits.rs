use super::position_model::PositionSettings;
use crate::errors::Result;

/// Trait for the position settings singleton store.
pub trait PositionSettingsRepositoryTrait: Send + Sync {
    /// Stored settings, or the defaults when nothing has been saved yet.
    fn get_settings(&self) -> Result<PositionSettings>;
    /// Replaces the stored settings wholesale.
    fn save_settings(&self, settings: &PositionSettings) -> Result<()>;
}

pub trait PositionSettingsServiceTrait: Send + Sync {
    fn get_position_settings(&self) -> Result<PositionSettings>;
    fn save_position_settings(&self, settings: PositionSettings) -> Result<PositionSettings>;
}
