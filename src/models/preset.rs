use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct Preset {
    pub id: i64,
    pub name: String,
    pub is_favorite: bool,
}

/// Stored preset: the desired enabled state of every asset that existed when
/// the snapshot was taken. Entries for deleted assets are dropped with the
/// asset.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PresetRecord {
    pub id: i64,
    pub name: String,
    pub is_favorite: bool,
    pub entries: Vec<PresetEntry>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct PresetEntry {
    pub asset_id: i64,
    pub enabled: bool,
}

impl PresetRecord {
    pub fn to_dto(&self) -> Preset {
        Preset {
            id: self.id,
            name: self.name.clone(),
            is_favorite: self.is_favorite,
        }
    }
}
