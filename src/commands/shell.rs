use crate::core::asset_fs;
use crate::core::registry::{with_catalog, AppRegistry};
use crate::models::error::WError;
use crate::utils::process;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;
use tracing::instrument;

#[tauri::command]
#[specta::specta]
#[instrument(skip(app))]
pub async fn select_directory(app: AppHandle) -> Result<Option<String>, WError> {
    let dialog = app.dialog().clone();
    tauri::async_runtime::spawn_blocking(move || {
        Ok(dialog
            .file()
            .set_title("Select Mods Folder")
            .blocking_pick_folder()
            .map(|p| p.to_string()))
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(app))]
pub async fn select_executable(app: AppHandle) -> Result<Option<String>, WError> {
    let dialog = app.dialog().clone();
    tauri::async_runtime::spawn_blocking(move || {
        Ok(dialog
            .file()
            .set_title("Select Quick Launch Executable")
            .add_filter("Executable", &["exe", "bat", "cmd", "sh", "app"])
            .add_filter("All Files", &["*"])
            .blocking_pick_file()
            .map(|p| p.to_string()))
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(app))]
pub async fn select_archive_file(app: AppHandle) -> Result<Option<String>, WError> {
    let dialog = app.dialog().clone();
    tauri::async_runtime::spawn_blocking(move || {
        Ok(dialog
            .file()
            .set_title("Select Mod Archive")
            .add_filter("Archives", &["zip"])
            .add_filter("All Files", &["*"])
            .blocking_pick_file()
            .map(|p| p.to_string()))
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn launch_quick_app(state: State<'_, AppRegistry>) -> Result<(), WError> {
    let exe = state
        .settings
        .lock()
        .quick_launch_path
        .clone()
        .ok_or_else(|| WError::Config("quick launch executable not set".to_string()))?;

    tauri::async_runtime::spawn_blocking(move || process::launch_detached(&exe))
        .await
        .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(app, state))]
pub fn open_mods_folder(app: AppHandle, state: State<'_, AppRegistry>) -> Result<(), WError> {
    let root = state
        .settings
        .lock()
        .mods_root
        .clone()
        .ok_or(WError::NotConfigured)?;
    if !root.is_dir() {
        return Err(WError::NotFound(format!("mods folder: {root}")));
    }
    app.opener()
        .open_path(root.as_str(), None::<&str>)
        .map_err(|e| WError::ModOperation(format!("failed to open mods folder: {e}")))
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(app, state))]
pub fn open_asset_folder(
    app: AppHandle,
    state: State<'_, AppRegistry>,
    asset_id: i64,
) -> Result<(), WError> {
    let path = with_catalog(&state.catalog, |catalog| {
        let record = catalog.asset(asset_id)?;
        // DtoBuilder::asset_by_id would also probe, but we only need the path.
        asset_fs::probe(&catalog.mods_root, &record.folder_name)
            .map(|s| s.path)
            .ok_or_else(|| {
                WError::NotFound(format!("mod folder for '{}' on disk", record.name))
            })
    })?;
    app.opener()
        .open_path(path.as_str(), None::<&str>)
        .map_err(|e| WError::ModOperation(format!("failed to open folder: {e}")))
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(app, state))]
pub fn open_custom_url(app: AppHandle, state: State<'_, AppRegistry>) -> Result<(), WError> {
    let url = state
        .settings
        .lock()
        .custom_url
        .clone()
        .ok_or_else(|| WError::Config("custom URL not set".to_string()))?;
    app.opener()
        .open_url(&url, None::<&str>)
        .map_err(|e| WError::ModOperation(format!("failed to open URL: {e}")))
}
