use crate::core::dto_builder::DtoBuilder;
use crate::core::importer;
use crate::core::registry::{with_catalog, AppRegistry};
use crate::models::archive::{ArchiveAnalysis, FolderImportRequest, ImportRequest};
use crate::models::asset::Asset;
use crate::models::error::WError;
use crate::models::task::TaskStatus;
use crate::utils::context::TaskContext;
use crate::utils::icon;
use camino::Utf8PathBuf;
use tauri::ipc::Channel;
use tauri::State;
use tracing::{info, instrument};

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn analyze_archive(
    state: State<'_, AppRegistry>,
    archive_path: String,
) -> Result<ArchiveAnalysis, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            importer::analyze(&Utf8PathBuf::from(&archive_path), catalog)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

/// An image inside the archive as a data URI, for the import dialog preview.
#[tauri::command]
#[specta::specta]
#[instrument]
pub async fn read_archive_preview(
    archive_path: String,
    internal_path: String,
) -> Result<String, WError> {
    tauri::async_runtime::spawn_blocking(move || {
        let bytes = importer::read_entry(&Utf8PathBuf::from(&archive_path), &internal_path)?;
        icon::data_uri_from_bytes(&internal_path, &bytes).ok_or_else(|| {
            WError::InvalidInput(format!("'{internal_path}' is not a supported image"))
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

/// Tracked operation: extracts the selected archive root into the target
/// entity's folder, registers the asset and returns its canonical DTO.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state, channel, request), fields(archive = %request.archive_path))]
pub async fn import_archive(
    state: State<'_, AppRegistry>,
    request: ImportRequest,
    channel: Channel<TaskStatus>,
) -> Result<Asset, WError> {
    info!("starting archive import task");
    let catalog_handle = state.catalog.clone();

    TaskContext::provide(channel, move || {
        let result = with_catalog(&catalog_handle, |catalog| {
            let id = importer::import_archive(catalog, &request)?;
            DtoBuilder::asset_by_id(catalog, id)
        });
        match &result {
            Ok(asset) => TaskContext::emit_lossy(TaskStatus::Completed {
                summary: format!("Imported '{}'.", asset.name),
            }),
            Err(e) => TaskContext::emit_lossy(TaskStatus::Failed {
                message: e.to_string(),
            }),
        }
        result
    })
    .await?
}

/// Imports an already unpacked mod folder by recursive copy.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state, request), fields(source = %request.source_dir))]
pub async fn import_folder(
    state: State<'_, AppRegistry>,
    request: FolderImportRequest,
) -> Result<Asset, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            let id = importer::import_folder(catalog, &request)?;
            DtoBuilder::asset_by_id(catalog, id)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}
