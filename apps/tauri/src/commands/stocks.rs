use chrono::{DateTime, Utc};
use log::debug;
use tauri::State;

use super::context;
use crate::context::ContextSlot;
use stonk_core::stocks::StockRating;
use stonk_core::RecordSet;

#[tauri::command]
pub async fn get_stock_ratings(
    state: State<'_, ContextSlot>,
) -> Result<RecordSet<StockRating>, String> {
    debug!("Fetching stock ratings...");
    context(&state)?
        .stock_service()
        .get_stock_ratings()
        .map_err(|e| e.to_string())
}

/// Ratings made on the calendar day of `date`, whatever its time.
#[tauri::command]
pub async fn get_stock_ratings_by_date(
    date: DateTime<Utc>,
    state: State<'_, ContextSlot>,
) -> Result<RecordSet<StockRating>, String> {
    context(&state)?
        .stock_service()
        .get_stock_ratings_by_date(date)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_stock_ratings_by_symbol(
    symbol: String,
    state: State<'_, ContextSlot>,
) -> Result<RecordSet<StockRating>, String> {
    context(&state)?
        .stock_service()
        .get_stock_ratings_by_symbol(&symbol)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_stock_ratings_by_sector(
    sector: String,
    state: State<'_, ContextSlot>,
) -> Result<RecordSet<StockRating>, String> {
    context(&state)?
        .stock_service()
        .get_stock_ratings_by_sector(&sector)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_stock_rating(
    rating: StockRating,
    state: State<'_, ContextSlot>,
) -> Result<StockRating, String> {
    debug!("Saving stock rating for {}", rating.symbol);
    context(&state)?
        .stock_service()
        .save_stock_rating(rating)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_stock_rating(id: String, state: State<'_, ContextSlot>) -> Result<(), String> {
    debug!("Deleting stock rating {}", id);
    context(&state)?
        .stock_service()
        .delete_stock_rating(&id)
        .map_err(|e| e.to_string())
}
