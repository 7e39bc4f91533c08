mod commands;
mod context;

#[cfg(desktop)]
mod menu;

use std::sync::Arc;

use dotenvy::dotenv;
use log::{error, info};
use tauri::{AppHandle, Manager, RunEvent};

use context::ContextSlot;

// ─────────────────────────────────────────────────────────────────────────────
// Desktop-only setup
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(desktop)]
mod desktop {
    use super::*;

    /// Sets up the application menu and its event handler.
    pub fn setup_menu(handle: &AppHandle) {
        match menu::create_menu(handle) {
            Ok(menu) => {
                if let Err(e) = handle.set_menu(menu) {
                    error!("Failed to set menu: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to create menu: {}", e);
            }
        }

        handle.on_menu_event(move |app, event| {
            menu::handle_menu_event(app, event.id().as_ref());
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Opens the journal store and fills the managed context slot.
fn setup_context(handle: &AppHandle) -> Result<(), Box<dyn std::error::Error>> {
    let home_dir = handle.path().home_dir()?;
    context::warn_about_legacy_store(&home_dir);

    let options = context::store_options(&home_dir);
    info!("Opening journal store in {}", options.data_dir.display());
    let context = Arc::new(context::initialize_context(options)?);

    if handle.state::<ContextSlot>().set(context).is_err() {
        return Err("service context was already initialized".into());
    }
    Ok(())
}

fn shutdown(handle: &AppHandle) {
    let Ok(context) = handle.state::<ContextSlot>().get() else {
        return;
    };
    match context.shutdown() {
        Ok(()) => info!("Journal store closed"),
        Err(e) => error!("Failed to close journal store: {}", e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application entry point
// ─────────────────────────────────────────────────────────────────────────────

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    dotenv().ok();

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(if cfg!(debug_assertions) {
                    log::LevelFilter::Debug
                } else {
                    log::LevelFilter::Info
                })
                .build(),
        )
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .manage(ContextSlot::default())
        .setup(|app| {
            let handle = app.handle().clone();

            setup_context(&handle).map_err(|e| {
                error!("Failed to initialize journal: {}", e);
                e
            })?;

            #[cfg(desktop)]
            desktop::setup_menu(&handle);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Risk assessment commands
            commands::risk::get_risk_assessments,
            commands::risk::get_risk_assessments_by_date_range,
            commands::risk::save_risk_assessment,
            commands::risk::delete_risk_assessment,
            // Stock rating commands
            commands::stocks::get_stock_ratings,
            commands::stocks::get_stock_ratings_by_date,
            commands::stocks::get_stock_ratings_by_symbol,
            commands::stocks::get_stock_ratings_by_sector,
            commands::stocks::save_stock_rating,
            commands::stocks::delete_stock_rating,
            // Trade commands
            commands::trades::get_trades,
            commands::trades::get_trade_legs,
            commands::trades::save_trade,
            commands::trades::save_trade_legs,
            commands::trades::delete_trade,
            // Position settings commands
            commands::settings::get_position_settings,
            commands::settings::save_position_settings,
            // Maintenance commands
            commands::maintenance::run_garbage_collection,
            // Import/export commands
            commands::data::export_data,
            commands::data::import_data,
            // File system commands
            commands::files::get_current_directory,
            commands::files::get_user_directory,
            commands::files::show_save_dialog,
            commands::files::show_open_dialog,
            // Platform commands
            commands::platform::get_platform,
        ])
        .build(tauri::generate_context!())
        .expect("Failed to build Stonk application")
        .run(|handle, event| {
            if let RunEvent::Exit = event {
                shutdown(handle);
            }
        });
}
