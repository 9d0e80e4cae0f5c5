use serde::{Deserialize, Serialize};
use specta::Type;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Type, Clone, Debug, Default)]
pub struct ScanSummary {
    /// Mod folders identified and processed.
    pub scanned: u32,
    pub added: u32,
    /// Records whose folder vanished from disk.
    pub pruned: u32,
    pub errors: u32,
}

/// Outcome of a bulk enable/disable. The batch never aborts on first
/// failure; every item is attempted and failures are tallied.
#[derive(Serialize, Deserialize, Type, Clone, Debug, Default)]
pub struct BulkToggleReport {
    pub requested: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub errors: Vec<String>,
}

#[derive(Serialize, Deserialize, Type, Clone, Debug, Default)]
pub struct ApplyReport {
    pub total: u32,
    /// Assets actually renamed toward the preset state.
    pub changed: u32,
    /// Assets whose folder was not found on disk.
    pub skipped_missing: u32,
    pub errors: Vec<String>,
}

#[derive(Serialize, Deserialize, Type, Clone, Debug, Default)]
pub struct DashboardStats {
    pub total_mods: u32,
    pub enabled_mods: u32,
    pub disabled_mods: u32,
    /// Mods filed under a "-other" entity.
    pub uncategorized_mods: u32,
    /// Category name -> mod count.
    pub category_counts: BTreeMap<String, u32>,
}
