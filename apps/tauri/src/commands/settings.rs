use tauri::State;

use super::context;
use crate::context::ContextSlot;
use stonk_core::position::PositionSettings;

#[tauri::command]
pub async fn get_position_settings(
    state: State<'_, ContextSlot>,
) -> Result<PositionSettings, String> {
    context(&state)?
        .position_settings_service()
        .get_position_settings()
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_position_settings(
    settings: PositionSettings,
    state: State<'_, ContextSlot>,
) -> Result<PositionSettings, String> {
    context(&state)?
        .position_settings_service()
        .save_position_settings(settings)
        .map_err(|e| e.to_string())
}
