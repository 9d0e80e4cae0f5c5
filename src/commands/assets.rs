use crate::core::asset_fs;
use crate::core::dto_builder::DtoBuilder;
use crate::core::listing::{self, AssetQuery};
use crate::core::registry::{with_catalog, AppRegistry};
use crate::models::asset::{Asset, AssetPatch};
use crate::models::error::WError;
use crate::models::report::BulkToggleReport;
use crate::utils::icon;
use camino::Utf8Path;
use tauri::State;
use tracing::{info, instrument, warn};

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn get_assets_for_entity(
    state: State<'_, AppRegistry>,
    entity_slug: String,
    query: Option<AssetQuery>,
) -> Result<Vec<Asset>, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            if catalog.defs.entity(&entity_slug).is_none() {
                return Err(WError::NotFound(format!("entity '{entity_slug}'")));
            }
            let assets = DtoBuilder::assets_for_entity(catalog, &entity_slug);
            Ok(listing::apply_asset_query(assets, &query.unwrap_or_default()))
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

/// Flips the on-disk state and returns the canonical refreshed DTO, read
/// back from the disk rather than patched in memory.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn toggle_asset_enabled(
    state: State<'_, AppRegistry>,
    asset_id: i64,
) -> Result<Asset, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            let folder_name = catalog.asset(asset_id)?.folder_name.clone();
            let current = asset_fs::probe(&catalog.mods_root, &folder_name)
                .ok_or_else(|| {
                    WError::NotFound(format!(
                        "mod folder for '{folder_name}' not found on disk; did it get moved or deleted?"
                    ))
                })?;
            let next = asset_fs::set_enabled(
                &catalog.mods_root,
                &folder_name,
                !current.is_enabled,
            )?;
            info!(asset_id, enabled = next.is_enabled, "toggled asset");
            DtoBuilder::asset_by_id(catalog, asset_id)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

/// Bulk enable/disable. Attempts every asset and tallies failures instead of
/// aborting on the first one.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state), fields(count = asset_ids.len()))]
pub async fn set_assets_enabled(
    state: State<'_, AppRegistry>,
    asset_ids: Vec<i64>,
    enabled: bool,
) -> Result<BulkToggleReport, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            let mut report = BulkToggleReport {
                requested: asset_ids.len() as u32,
                ..Default::default()
            };
            for asset_id in asset_ids {
                let outcome = catalog.asset(asset_id).map(|r| r.folder_name.clone()).and_then(
                    |folder_name| {
                        asset_fs::set_enabled(&catalog.mods_root, &folder_name, enabled)
                    },
                );
                match outcome {
                    Ok(_) => report.succeeded += 1,
                    Err(e) => {
                        warn!(asset_id, error = %e, "bulk toggle item failed");
                        report.failed += 1;
                        report.errors.push(format!("asset {asset_id}: {e}"));
                    }
                }
            }
            Ok(report)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state, patch))]
pub async fn update_asset_info(
    state: State<'_, AppRegistry>,
    asset_id: i64,
    patch: AssetPatch,
    new_preview_path: Option<String>,
) -> Result<Asset, WError> {
    if patch.name.trim().is_empty() {
        return Err(WError::InvalidInput("mod name cannot be empty".to_string()));
    }

    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            let folder_name = catalog.asset(asset_id)?.folder_name.clone();
            let state_on_disk = asset_fs::probe(&catalog.mods_root, &folder_name)
                .ok_or_else(|| {
                    WError::NotFound(format!(
                        "mod folder '{folder_name}' is not on disk; rescan to repair the catalog"
                    ))
                })?;

            // Install the new preview before touching the record, so a copy
            // failure leaves the metadata unchanged.
            let mut image_filename = None;
            if let Some(source) = new_preview_path {
                let source = Utf8Path::new(&source);
                if !source.is_file() {
                    return Err(WError::NotFound(format!("preview image: {source}")));
                }
                std::fs::copy(
                    source,
                    state_on_disk.path.join(asset_fs::TARGET_PREVIEW_FILENAME),
                )?;
                image_filename = Some(asset_fs::TARGET_PREVIEW_FILENAME.to_string());
            }

            {
                let record = catalog.asset_mut(asset_id)?;
                record.name = patch.name.trim().to_string();
                record.description = patch.description.clone();
                record.author = patch.author.clone();
                record.category_tag = patch.category_tag.clone();
                if image_filename.is_some() {
                    record.image_filename = image_filename;
                }
            }
            catalog.persist()?;
            info!(asset_id, "asset metadata updated");
            DtoBuilder::asset_by_id(catalog, asset_id)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

/// Re-files an asset under a different entity. The folder stays where it is;
/// only the catalog record moves.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn relocate_asset(
    state: State<'_, AppRegistry>,
    asset_id: i64,
    new_entity_slug: String,
) -> Result<Asset, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            if catalog.defs.entity(&new_entity_slug).is_none() {
                return Err(WError::NotFound(format!("entity '{new_entity_slug}'")));
            }
            catalog.asset_mut(asset_id)?.entity_slug = new_entity_slug.clone();
            catalog.persist()?;
            info!(asset_id, entity = %new_entity_slug, "asset relocated");
            DtoBuilder::asset_by_id(catalog, asset_id)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

/// Deletes the mod folder (in whichever state it is) and the record; the
/// asset is also dropped from every preset.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn delete_asset(state: State<'_, AppRegistry>, asset_id: i64) -> Result<(), WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            let folder_name = catalog.asset(asset_id)?.folder_name.clone();
            if !asset_fs::delete_from_disk(&catalog.mods_root, &folder_name)? {
                warn!(asset_id, folder = %folder_name, "folder already gone, removing record only");
            }
            catalog.remove_asset(asset_id)?;
            catalog.persist()?;
            info!(asset_id, "asset deleted");
            Ok(())
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

/// Preview image as a data URI, or None when the asset has no usable image.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn get_asset_preview(
    state: State<'_, AppRegistry>,
    asset_id: i64,
) -> Result<Option<String>, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            let record = catalog.asset(asset_id)?;
            let Some(image) = record.image_filename.clone() else {
                return Ok(None);
            };
            let Some(state_on_disk) = asset_fs::probe(&catalog.mods_root, &record.folder_name)
            else {
                return Ok(None);
            };
            Ok(icon::load_as_data_uri(&state_on_disk.path.join(image)))
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}
