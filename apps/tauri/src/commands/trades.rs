use log::debug;
use tauri::State;

use super::context;
use crate::context::ContextSlot;
use stonk_core::trades::Trade;
use stonk_core::{DeleteOutcome, RecordSet};

#[tauri::command]
pub async fn get_trades(state: State<'_, ContextSlot>) -> Result<RecordSet<Trade>, String> {
    debug!("Fetching trades...");
    context(&state)?
        .trade_service()
        .get_trades()
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_trade_legs(id: String, state: State<'_, ContextSlot>) -> Result<Vec<Trade>, String> {
    context(&state)?
        .trade_service()
        .get_trade_legs(&id)
        .map_err(|e| e.to_string())
}

/// Upserts one leg. `entryDate` and `expirationDate` are required in the payload.
#[tauri::command]
pub async fn save_trade(trade: Trade, state: State<'_, ContextSlot>) -> Result<Trade, String> {
    debug!("Saving {} trade leg {}", trade.symbol, trade.leg_number);
    context(&state)?
        .trade_service()
        .save_trade(trade)
        .map_err(|e| e.to_string())
}

/// Saves all legs of one trade; every leg needs `entryDate` and `expirationDate`.
#[tauri::command]
pub async fn save_trade_legs(
    legs: Vec<Trade>,
    state: State<'_, ContextSlot>,
) -> Result<Vec<Trade>, String> {
    debug!("Saving trade with {} leg(s)", legs.len());
    context(&state)?
        .trade_service()
        .save_trade_legs(legs)
        .map_err(|e| e.to_string())
}

/// Removes every leg of the trade.
#[tauri::command]
pub async fn delete_trade(
    id: String,
    state: State<'_, ContextSlot>,
) -> Result<DeleteOutcome, String> {
    debug!("Deleting trade {}", id);
    context(&state)?
        .trade_service()
        .delete_trade(&id)
        .map_err(|e| e.to_string())
}
