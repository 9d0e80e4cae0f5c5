use crate::core::presets;
use crate::core::registry::{with_catalog, AppRegistry};
use crate::models::error::WError;
use crate::models::preset::Preset;
use crate::models::report::ApplyReport;
use crate::models::task::TaskStatus;
use crate::utils::context::TaskContext;
use tauri::ipc::Channel;
use tauri::State;
use tracing::{info, instrument};

/// How many favorites the sidebar shows.
const FAVORITE_LIMIT: usize = 3;

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn create_preset(
    state: State<'_, AppRegistry>,
    name: String,
) -> Result<Preset, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| presets::create(catalog, &name))
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
pub fn get_presets(state: State<'_, AppRegistry>) -> Result<Vec<Preset>, WError> {
    with_catalog(&state.catalog, |catalog| {
        let mut presets: Vec<Preset> = catalog.presets().map(|p| p.to_dto()).collect();
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(presets)
    })
}

#[tauri::command]
#[specta::specta]
pub fn get_favorite_presets(state: State<'_, AppRegistry>) -> Result<Vec<Preset>, WError> {
    with_catalog(&state.catalog, |catalog| {
        let mut presets: Vec<Preset> = catalog
            .presets()
            .filter(|p| p.is_favorite)
            .map(|p| p.to_dto())
            .collect();
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        presets.truncate(FAVORITE_LIMIT);
        Ok(presets)
    })
}

/// Tracked operation: renames every asset toward the preset's recorded
/// state. Per-item failures are tallied in the report, not fatal.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state, channel))]
pub async fn apply_preset(
    state: State<'_, AppRegistry>,
    preset_id: i64,
    channel: Channel<TaskStatus>,
) -> Result<ApplyReport, WError> {
    info!(preset_id, "starting preset apply task");
    let catalog_handle = state.catalog.clone();

    TaskContext::provide(channel, move || {
        let result =
            with_catalog(&catalog_handle, |catalog| presets::apply(catalog, preset_id));
        match &result {
            Ok(report) if report.errors.is_empty() => {
                TaskContext::emit_lossy(TaskStatus::Completed {
                    summary: report.describe(),
                })
            }
            Ok(report) => TaskContext::emit_lossy(TaskStatus::Failed {
                message: report.describe(),
            }),
            Err(e) => TaskContext::emit_lossy(TaskStatus::Failed {
                message: e.to_string(),
            }),
        }
        result
    })
    .await?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn toggle_preset_favorite(
    state: State<'_, AppRegistry>,
    preset_id: i64,
    is_favorite: bool,
) -> Result<(), WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            presets::set_favorite(catalog, preset_id, is_favorite)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

/// Re-snapshots the current on-disk state into an existing preset.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn overwrite_preset(
    state: State<'_, AppRegistry>,
    preset_id: i64,
) -> Result<(), WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            presets::overwrite(catalog, preset_id)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn delete_preset(state: State<'_, AppRegistry>, preset_id: i64) -> Result<(), WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            presets::delete(catalog, preset_id)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn add_asset_to_presets(
    state: State<'_, AppRegistry>,
    asset_id: i64,
    preset_ids: Vec<i64>,
    enabled: bool,
) -> Result<(), WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            presets::add_asset(catalog, asset_id, &preset_ids, enabled)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}
