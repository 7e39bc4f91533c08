use log::debug;
use tauri::menu::{Menu, MenuBuilder, MenuItemBuilder, PredefinedMenuItem, SubmenuBuilder};
use tauri::{AppHandle, Emitter, Runtime};

pub const IMPORT_DATA_ID: &str = "import_data";
pub const EXPORT_DATA_ID: &str = "export_data";
pub const PREFERENCES_ID: &str = "preferences";
pub const DOCUMENTATION_ID: &str = "documentation";

pub const IMPORT_DATA_EVENT: &str = "menu:import-data";
pub const EXPORT_DATA_EVENT: &str = "menu:export-data";
pub const PREFERENCES_EVENT: &str = "menu:preferences";
pub const DOCUMENTATION_EVENT: &str = "menu:documentation";

pub fn create_menu<R: Runtime>(app: &AppHandle<R>) -> Result<Menu<R>, tauri::Error> {
    let file_menu = SubmenuBuilder::new(app, "File")
        .item(
            &MenuItemBuilder::with_id(IMPORT_DATA_ID, "Import Data...")
                .accelerator("CmdOrCtrl+I")
                .build(app)?,
        )
        .item(
            &MenuItemBuilder::with_id(EXPORT_DATA_ID, "Export Data...")
                .accelerator("CmdOrCtrl+E")
                .build(app)?,
        )
        .separator()
        .item(&PredefinedMenuItem::quit(app, None)?)
        .build()?;

    let edit_menu = SubmenuBuilder::new(app, "Edit")
        .item(&PredefinedMenuItem::undo(app, None)?)
        .item(&PredefinedMenuItem::redo(app, None)?)
        .separator()
        .item(&PredefinedMenuItem::cut(app, None)?)
        .item(&PredefinedMenuItem::copy(app, None)?)
        .item(&PredefinedMenuItem::paste(app, None)?)
        .item(&PredefinedMenuItem::select_all(app, None)?)
        .separator()
        .item(
            &MenuItemBuilder::with_id(PREFERENCES_ID, "Preferences...")
                .accelerator("CmdOrCtrl+P")
                .build(app)?,
        )
        .build()?;

    let help_menu = SubmenuBuilder::new(app, "Help")
        .item(&PredefinedMenuItem::about(app, None, None)?)
        .item(
            &MenuItemBuilder::with_id(DOCUMENTATION_ID, "Documentation")
                .accelerator("CmdOrCtrl+H")
                .build(app)?,
        )
        .build()?;

    MenuBuilder::new(app)
        .item(&file_menu)
        .item(&edit_menu)
        .item(&help_menu)
        .build()
}

/// Frontend event for a custom menu item. Predefined items have none.
fn event_for(id: &str) -> Option<&'static str> {
    match id {
        IMPORT_DATA_ID => Some(IMPORT_DATA_EVENT),
        EXPORT_DATA_ID => Some(EXPORT_DATA_EVENT),
        PREFERENCES_ID => Some(PREFERENCES_EVENT),
        DOCUMENTATION_ID => Some(DOCUMENTATION_EVENT),
        _ => None,
    }
}

/// The frontend owns the dialogs, so menu items only forward an event.
pub fn handle_menu_event<R: Runtime>(app: &AppHandle<R>, id: &str) {
    let Some(event) = event_for(id) else {
        return;
    };
    debug!("Menu item {} selected", id);
    if let Err(e) = app.emit(event, ()) {
        log::error!("Failed to emit {}: {}", event, e);
    }
}
