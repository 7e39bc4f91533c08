pub mod data;
pub mod files;
pub mod maintenance;
pub mod platform;
pub mod risk;
pub mod settings;
pub mod stocks;
pub mod trades;

use std::sync::Arc;
use tauri::State;

use crate::context::{ContextSlot, ServiceContext};

/// Resolves the managed context, failing while startup is still running.
pub(crate) fn context(slot: &State<'_, ContextSlot>) -> Result<Arc<ServiceContext>, String> {
    slot.get().map_err(|e| e.to_string())
}
