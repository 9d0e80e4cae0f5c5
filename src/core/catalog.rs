use crate::core::definitions::Definitions;
use crate::models::asset::AssetRecord;
use crate::models::error::WError;
use crate::models::paths::StatePaths;
use crate::models::preset::PresetRecord;
use crate::utils::toml::Toml;
use camino::{Utf8Path, Utf8PathBuf};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Manifest format version. The major component gates loading: bump it when
/// the on-disk shape changes incompatibly.
const CATALOG_FORMAT: &str = "1.0.0";

#[derive(Serialize, Deserialize, Debug)]
struct CatalogManifest {
    format: String,
    id: String,
    next_asset_id: i64,
    assets: Vec<AssetRecord>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct PresetManifest {
    next_preset_id: i64,
    presets: Vec<PresetRecord>,
}

/// The durable mod catalog for one mods root: asset and preset records plus
/// the embedded entity definitions. All mutations go through this type and
/// are written back with an explicit [`Catalog::persist`].
#[derive(Debug)]
pub struct Catalog {
    pub id: String,
    pub mods_root: Utf8PathBuf,
    pub defs: Definitions,
    pub paths: StatePaths,
    assets: BTreeMap<i64, AssetRecord>,
    presets: BTreeMap<i64, PresetRecord>,
    next_asset_id: i64,
    next_preset_id: i64,
    is_dirty: bool,
}

impl Catalog {
    /// Opens the catalog under `mods_root`, creating a fresh state directory
    /// on first use.
    pub fn open(mods_root: &Utf8Path) -> Result<Self, WError> {
        if !mods_root.is_dir() {
            return Err(WError::Config(format!(
                "mods folder is not a directory: {mods_root}"
            )));
        }

        let defs = Definitions::load_embedded()?;
        let paths = StatePaths::new(mods_root);

        if paths.catalog.is_file() {
            let manifest: CatalogManifest = Toml::read(&paths.catalog)?;
            Self::check_format(&manifest.format)?;
            let presets: PresetManifest = if paths.presets.is_file() {
                Toml::read(&paths.presets)?
            } else {
                PresetManifest::default()
            };

            info!(
                assets = manifest.assets.len(),
                presets = presets.presets.len(),
                root = %mods_root,
                "catalog loaded"
            );
            Ok(Self {
                id: manifest.id,
                mods_root: mods_root.to_owned(),
                defs,
                paths,
                assets: manifest.assets.into_iter().map(|a| (a.id, a)).collect(),
                presets: presets.presets.into_iter().map(|p| (p.id, p)).collect(),
                next_asset_id: manifest.next_asset_id,
                next_preset_id: presets.next_preset_id,
                is_dirty: false,
            })
        } else {
            std::fs::create_dir_all(&paths.dir)?;
            let catalog = Self {
                id: uuid::Uuid::new_v4().to_string(),
                mods_root: mods_root.to_owned(),
                defs,
                paths,
                assets: BTreeMap::new(),
                presets: BTreeMap::new(),
                next_asset_id: 1,
                next_preset_id: 1,
                is_dirty: false,
            };
            catalog.persist()?;
            info!(root = %mods_root, "new catalog created");
            Ok(catalog)
        }
    }

    fn check_format(stored: &str) -> Result<(), WError> {
        let stored_version = Version::parse(stored)
            .map_err(|e| WError::Parse(format!("bad catalog format version '{stored}': {e}")))?;
        let current = Version::parse(CATALOG_FORMAT).expect("static version");
        if stored_version.major != current.major {
            return Err(WError::Config(format!(
                "catalog format {stored} is incompatible with {CATALOG_FORMAT}; \
                 delete the .wardrobe directory and rescan"
            )));
        }
        Ok(())
    }

    /// Persists the catalog and preset manifests to the state directory.
    pub fn persist(&self) -> Result<(), WError> {
        std::fs::create_dir_all(&self.paths.dir)?;
        Toml::write(
            &self.paths.catalog,
            &CatalogManifest {
                format: CATALOG_FORMAT.to_string(),
                id: self.id.clone(),
                next_asset_id: self.next_asset_id,
                assets: self.assets.values().cloned().collect(),
            },
        )?;
        Toml::write(
            &self.paths.presets,
            &PresetManifest {
                next_preset_id: self.next_preset_id,
                presets: self.presets.values().cloned().collect(),
            },
        )?;
        Ok(())
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    // === assets ===

    pub fn assets(&self) -> impl Iterator<Item = &AssetRecord> {
        self.assets.values()
    }

    pub fn asset_count(&self) -> u32 {
        self.assets.len() as u32
    }

    pub fn asset(&self, id: i64) -> Result<&AssetRecord, WError> {
        self.assets
            .get(&id)
            .ok_or_else(|| WError::NotFound(format!("asset {id}")))
    }

    pub fn asset_mut(&mut self, id: i64) -> Result<&mut AssetRecord, WError> {
        self.is_dirty = true;
        self.assets
            .get_mut(&id)
            .ok_or_else(|| WError::NotFound(format!("asset {id}")))
    }

    pub fn assets_for_entity<'a>(
        &'a self,
        entity_slug: &'a str,
    ) -> impl Iterator<Item = &'a AssetRecord> {
        self.assets
            .values()
            .filter(move |a| a.entity_slug == entity_slug)
    }

    pub fn find_asset_by_path(&self, clean_rel: &str) -> Option<&AssetRecord> {
        self.assets.values().find(|a| a.folder_name == clean_rel)
    }

    /// Registers a new asset and returns its allocated id. `folder_name`
    /// must already be the clean relative path.
    pub fn insert_asset(&mut self, mut record: AssetRecord) -> Result<i64, WError> {
        if self.defs.entity(&record.entity_slug).is_none() {
            return Err(WError::NotFound(format!(
                "entity '{}'",
                record.entity_slug
            )));
        }
        if self.find_asset_by_path(&record.folder_name).is_some() {
            return Err(WError::ModOperation(format!(
                "an asset is already registered for '{}'",
                record.folder_name
            )));
        }

        let id = self.next_asset_id;
        self.next_asset_id += 1;
        record.id = id;
        self.assets.insert(id, record);
        self.is_dirty = true;
        Ok(id)
    }

    /// Removes an asset record and drops it from every preset.
    pub fn remove_asset(&mut self, id: i64) -> Result<AssetRecord, WError> {
        let record = self
            .assets
            .remove(&id)
            .ok_or_else(|| WError::NotFound(format!("asset {id}")))?;
        for preset in self.presets.values_mut() {
            preset.entries.retain(|e| e.asset_id != id);
        }
        self.is_dirty = true;
        Ok(record)
    }

    // === presets ===

    pub fn presets(&self) -> impl Iterator<Item = &PresetRecord> {
        self.presets.values()
    }

    pub fn preset(&self, id: i64) -> Result<&PresetRecord, WError> {
        self.presets
            .get(&id)
            .ok_or_else(|| WError::NotFound(format!("preset {id}")))
    }

    pub fn preset_mut(&mut self, id: i64) -> Result<&mut PresetRecord, WError> {
        self.is_dirty = true;
        self.presets
            .get_mut(&id)
            .ok_or_else(|| WError::NotFound(format!("preset {id}")))
    }

    pub fn preset_name_taken(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.presets
            .values()
            .any(|p| p.name.to_lowercase() == needle)
    }

    pub fn insert_preset(&mut self, mut record: PresetRecord) -> i64 {
        let id = self.next_preset_id;
        self.next_preset_id += 1;
        record.id = id;
        self.presets.insert(id, record);
        self.is_dirty = true;
        id
    }

    pub fn remove_preset(&mut self, id: i64) -> Result<PresetRecord, WError> {
        let record = self
            .presets
            .remove(&id)
            .ok_or_else(|| WError::NotFound(format!("preset {id}")))?;
        self.is_dirty = true;
        Ok(record)
    }
}
