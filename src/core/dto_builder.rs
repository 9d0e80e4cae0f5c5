use crate::core::asset_fs;
use crate::core::catalog::Catalog;
use crate::core::definitions::DefinedEntity;
use crate::models::asset::{Asset, AssetRecord};
use crate::models::entity::Entity;
use crate::models::error::WError;
use crate::models::report::DashboardStats;
use tracing::warn;

/// Builds the frontend DTOs: stored records plus disk state in, wire shapes
/// out. Counts are always recomputed here, never cached.
pub struct DtoBuilder;

impl DtoBuilder {
    /// Converts a stored record into the wire DTO by probing the disk.
    /// Returns None when the folder has vanished; such assets are hidden
    /// from listings until a scan prunes them.
    pub fn asset(catalog: &Catalog, record: &AssetRecord) -> Option<Asset> {
        let state = asset_fs::probe(&catalog.mods_root, &record.folder_name)?;
        Some(Asset {
            id: record.id,
            entity_slug: record.entity_slug.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            author: record.author.clone(),
            category_tag: record.category_tag.clone(),
            folder_name: state.folder_name,
            image_filename: record.image_filename.clone(),
            is_enabled: state.is_enabled,
        })
    }

    pub fn asset_by_id(catalog: &Catalog, id: i64) -> Result<Asset, WError> {
        let record = catalog.asset(id)?;
        Self::asset(catalog, record).ok_or_else(|| {
            warn!(id, folder = %record.folder_name, "asset folder missing on disk");
            WError::NotFound(format!(
                "mod folder for '{}' not found on disk; rescan to repair the catalog",
                record.name
            ))
        })
    }

    pub fn assets_for_entity(catalog: &Catalog, entity_slug: &str) -> Vec<Asset> {
        catalog
            .assets_for_entity(entity_slug)
            .filter_map(|record| Self::asset(catalog, record))
            .collect()
    }

    pub fn entity(catalog: &Catalog, def: &DefinedEntity) -> Entity {
        let mut total = 0u32;
        let mut enabled = 0u32;
        for record in catalog.assets_for_entity(&def.slug) {
            if let Some(state) = asset_fs::probe(&catalog.mods_root, &record.folder_name) {
                total += 1;
                if state.is_enabled {
                    enabled += 1;
                }
            }
        }
        Entity {
            slug: def.slug.clone(),
            category_slug: def.category_slug.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            details: def.details.clone(),
            base_image: def.base_image.clone(),
            total_mods: total,
            enabled_mods: enabled,
        }
    }

    pub fn entity_by_slug(catalog: &Catalog, slug: &str) -> Result<Entity, WError> {
        let def = catalog
            .defs
            .entity(slug)
            .ok_or_else(|| WError::NotFound(format!("entity '{slug}'")))?;
        Ok(Self::entity(catalog, def))
    }

    pub fn entities_in_category(catalog: &Catalog, category_slug: &str) -> Vec<Entity> {
        catalog
            .defs
            .entities_in(category_slug)
            .map(|def| Self::entity(catalog, def))
            .collect()
    }

    pub fn dashboard_stats(catalog: &Catalog) -> DashboardStats {
        let mut stats = DashboardStats::default();
        for record in catalog.assets() {
            let Some(state) = asset_fs::probe(&catalog.mods_root, &record.folder_name) else {
                continue;
            };
            stats.total_mods += 1;
            if state.is_enabled {
                stats.enabled_mods += 1;
            } else {
                stats.disabled_mods += 1;
            }

            let Some(def) = catalog.defs.entity(&record.entity_slug) else {
                continue;
            };
            if def.is_other {
                stats.uncategorized_mods += 1;
            }
            if let Some(category) = catalog.defs.category(&def.category_slug) {
                *stats.category_counts.entry(category.name.clone()).or_default() += 1;
            }
        }
        stats
    }
}
