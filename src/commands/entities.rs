use crate::core::dto_builder::DtoBuilder;
use crate::core::listing::{self, EntityQuery};
use crate::core::registry::{with_catalog, AppRegistry};
use crate::models::entity::{Category, Entity};
use crate::models::error::WError;
use crate::models::report::DashboardStats;
use tauri::State;
use tracing::instrument;

#[tauri::command]
#[specta::specta]
pub fn get_categories(state: State<'_, AppRegistry>) -> Result<Vec<Category>, WError> {
    with_catalog(&state.catalog, |catalog| Ok(catalog.defs.categories.clone()))
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn get_entities_by_category(
    state: State<'_, AppRegistry>,
    category_slug: String,
    query: Option<EntityQuery>,
) -> Result<Vec<Entity>, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            if catalog.defs.category(&category_slug).is_none() {
                return Err(WError::NotFound(format!("category '{category_slug}'")));
            }
            let entities = DtoBuilder::entities_in_category(catalog, &category_slug);
            Ok(listing::apply_entity_query(
                entities,
                &query.unwrap_or_default(),
            ))
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn get_entity_details(
    state: State<'_, AppRegistry>,
    entity_slug: String,
) -> Result<Entity, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            DtoBuilder::entity_by_slug(catalog, &entity_slug)
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
pub fn get_total_asset_count(state: State<'_, AppRegistry>) -> Result<u32, WError> {
    with_catalog(&state.catalog, |catalog| Ok(catalog.asset_count()))
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn get_dashboard_stats(
    state: State<'_, AppRegistry>,
) -> Result<DashboardStats, WError> {
    let catalog_handle = state.catalog.clone();
    tauri::async_runtime::spawn_blocking(move || {
        with_catalog(&catalog_handle, |catalog| {
            Ok(DtoBuilder::dashboard_stats(catalog))
        })
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}
