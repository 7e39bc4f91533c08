use serde::Deserialize;
use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, FilePath};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DialogOptions {
    pub title: Option<String>,
    pub default_filename: Option<String>,
    pub filters: Vec<FileFilter>,
}

fn path_string(path: FilePath) -> Result<String, String> {
    path.into_path()
        .map(|p| p.to_string_lossy().into_owned())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_current_directory() -> Result<String, String> {
    std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_user_directory(app: AppHandle) -> Result<String, String> {
    app.path()
        .home_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .map_err(|e| e.to_string())
}

/// Returns `None` when the user cancels.
#[tauri::command]
pub async fn show_save_dialog(
    app: AppHandle,
    options: DialogOptions,
) -> Result<Option<String>, String> {
    let mut builder = app.dialog().file();
    if let Some(title) = options.title {
        builder = builder.set_title(title);
    }
    if let Some(name) = options.default_filename {
        builder = builder.set_file_name(name);
    }
    for filter in &options.filters {
        let extensions: Vec<&str> = filter.extensions.iter().map(String::as_str).collect();
        builder = builder.add_filter(filter.name.clone(), &extensions);
    }
    builder.blocking_save_file().map(path_string).transpose()
}

/// Returns `None` when the user cancels.
#[tauri::command]
pub async fn show_open_dialog(
    app: AppHandle,
    options: DialogOptions,
) -> Result<Option<String>, String> {
    let mut builder = app.dialog().file();
    if let Some(title) = options.title {
        builder = builder.set_title(title);
    }
    for filter in &options.filters {
        let extensions: Vec<&str> = filter.extensions.iter().map(String::as_str).collect();
        builder = builder.add_filter(filter.name.clone(), &extensions);
    }
    builder.blocking_pick_file().map(path_string).transpose()
}
