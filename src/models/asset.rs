use serde::{Deserialize, Serialize};
use specta::Type;

/// Asset as sent to the frontend: `folder_name` is the name currently on
/// disk (it carries the `DISABLED_` prefix when disabled) and `is_enabled`
/// is derived from the disk on every read.
#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct Asset {
    pub id: i64,
    pub entity_slug: String,
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    /// Comma-separated free-text tags.
    pub category_tag: Option<String>,
    pub folder_name: String,
    pub image_filename: Option<String>,
    pub is_enabled: bool,
}

/// Stored catalog record. `folder_name` is always the clean relative path in
/// its enabled form, with forward slashes; the on-disk state is probed when
/// building the [`Asset`] DTO.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AssetRecord {
    pub id: i64,
    pub entity_slug: String,
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category_tag: Option<String>,
    pub folder_name: String,
    pub image_filename: Option<String>,
}

/// Metadata edit payload for `update_asset_info`.
#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct AssetPatch {
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category_tag: Option<String>,
}
