//! Position sizing settings module.

mod position_model;
mod position_service;
mod position_traits;

pub use position_model::PositionSettings;
pub use position_service::PositionSettingsService;
pub use position_traits::{PositionSettingsRepositoryTrait, PositionSettingsServiceTrait};
