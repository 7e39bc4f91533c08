use std::path::PathBuf;

use log::info;
use tauri::State;

use super::context;
use crate::context::ContextSlot;
use stonk_core::export::ImportSummary;

/// Writes the whole journal to `path` and returns where it landed.
#[tauri::command]
pub async fn export_data(path: String, state: State<'_, ContextSlot>) -> Result<String, String> {
    info!("Exporting journal to {}", path);
    let written = context(&state)?
        .export_service()
        .export_data(&PathBuf::from(path))
        .map_err(|e| e.to_string())?;
    Ok(written.to_string_lossy().into_owned())
}

/// Parses and validates an export file without touching the store.
#[tauri::command]
pub async fn import_data(
    path: String,
    state: State<'_, ContextSlot>,
) -> Result<ImportSummary, String> {
    info!("Checking import file {}", path);
    context(&state)?
        .export_service()
        .import_data(&PathBuf::from(path))
        .map_err(|e| e.to_string())
}
