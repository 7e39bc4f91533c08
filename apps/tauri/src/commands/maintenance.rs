use log::info;
use tauri::State;

use super::context;
use crate::context::ContextSlot;

/// Runs one compaction pass and describes what happened.
#[tauri::command]
pub async fn run_garbage_collection(state: State<'_, ContextSlot>) -> Result<String, String> {
    info!("Garbage collection requested");
    let status = context(&state)?.maintenance_service().run_compaction();
    Ok(status.message())
}
