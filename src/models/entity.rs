use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

/// Entity as sent to the frontend. Mod counts are computed at read time from
/// the catalog and the disk, never stored.
#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct Entity {
    pub slug: String,
    pub category_slug: String,
    pub name: String,
    pub description: Option<String>,
    /// Free-form JSON blob with game-specific fields (element, rarity, ...).
    pub details: Option<String>,
    pub base_image: Option<String>,
    pub total_mods: u32,
    pub enabled_mods: u32,
}
