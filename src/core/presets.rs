use crate::core::asset_fs;
use crate::core::catalog::Catalog;
use crate::models::error::WError;
use crate::models::preset::{Preset, PresetEntry, PresetRecord};
use crate::models::report::ApplyReport;
use crate::models::task::TaskStatus;
use crate::utils::context::TaskContext;
use tracing::{info, warn};

/// Captures the current on-disk enabled state of every asset. Assets whose
/// folder is missing are left out of the snapshot.
fn snapshot_entries(catalog: &Catalog) -> Vec<PresetEntry> {
    catalog
        .assets()
        .filter_map(|record| {
            let state = asset_fs::probe(&catalog.mods_root, &record.folder_name);
            if state.is_none() {
                warn!(id = record.id, folder = %record.folder_name, "asset missing on disk, excluded from snapshot");
            }
            state.map(|s| PresetEntry {
                asset_id: record.id,
                enabled: s.is_enabled,
            })
        })
        .collect()
}

/// Creates a preset from the current state of the mods folder.
pub fn create(catalog: &mut Catalog, name: &str) -> Result<Preset, WError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WError::InvalidInput("preset name cannot be empty".to_string()));
    }
    if catalog.preset_name_taken(name) {
        return Err(WError::InvalidInput(format!(
            "preset name '{name}' already exists"
        )));
    }

    let entries = snapshot_entries(catalog);
    let id = catalog.insert_preset(PresetRecord {
        id: 0,
        name: name.to_string(),
        is_favorite: false,
        entries,
    });
    catalog.persist()?;

    info!(id, name, "preset created");
    Ok(catalog.preset(id)?.to_dto())
}

/// Replaces a preset's entries with a fresh snapshot, keeping name and
/// favorite flag.
pub fn overwrite(catalog: &mut Catalog, preset_id: i64) -> Result<(), WError> {
    let entries = snapshot_entries(catalog);
    let preset = catalog.preset_mut(preset_id)?;
    preset.entries = entries;
    catalog.persist()?;
    info!(preset_id, "preset overwritten with current state");
    Ok(())
}

pub fn set_favorite(catalog: &mut Catalog, preset_id: i64, is_favorite: bool) -> Result<(), WError> {
    catalog.preset_mut(preset_id)?.is_favorite = is_favorite;
    catalog.persist()?;
    Ok(())
}

pub fn delete(catalog: &mut Catalog, preset_id: i64) -> Result<(), WError> {
    catalog.remove_preset(preset_id)?;
    catalog.persist()?;
    info!(preset_id, "preset deleted");
    Ok(())
}

/// Records the desired state of one asset in the given presets, creating or
/// updating its entry in each.
pub fn add_asset(
    catalog: &mut Catalog,
    asset_id: i64,
    preset_ids: &[i64],
    enabled: bool,
) -> Result<(), WError> {
    catalog.asset(asset_id)?;
    for &preset_id in preset_ids {
        let preset = catalog.preset_mut(preset_id)?;
        match preset.entries.iter_mut().find(|e| e.asset_id == asset_id) {
            Some(entry) => entry.enabled = enabled,
            None => preset.entries.push(PresetEntry { asset_id, enabled }),
        }
    }
    catalog.persist()?;
    Ok(())
}

/// Renames every asset in the preset toward its recorded state. Per-item
/// failures are tallied, never fatal: the loop always runs to the end
/// (spec'd batch behavior). Emits the `TaskStatus` sequence on the current
/// task context.
pub fn apply(catalog: &Catalog, preset_id: i64) -> Result<ApplyReport, WError> {
    let preset = catalog.preset(preset_id)?;
    let total = preset.entries.len() as u32;
    info!(preset_id, total, "applying preset");

    TaskContext::emit_lossy(TaskStatus::Started { total });

    let mut report = ApplyReport {
        total,
        ..Default::default()
    };

    for (index, entry) in preset.entries.iter().enumerate() {
        let Ok(record) = catalog.asset(entry.asset_id) else {
            // Entry survived an asset deletion somehow; count and move on.
            report
                .errors
                .push(format!("asset {} no longer exists", entry.asset_id));
            continue;
        };

        TaskContext::emit_lossy(TaskStatus::Progress {
            processed: (index + 1) as u32,
            total,
            message: format!("Processing: {} ({}/{})", record.name, index + 1, total),
            current_path: Some(record.folder_name.clone()),
        });

        match asset_fs::probe(&catalog.mods_root, &record.folder_name) {
            None => {
                warn!(id = record.id, folder = %record.folder_name, "folder missing, skipped");
                report.skipped_missing += 1;
            }
            Some(state) if state.is_enabled == entry.enabled => {}
            Some(_) => {
                match asset_fs::set_enabled(&catalog.mods_root, &record.folder_name, entry.enabled)
                {
                    Ok(_) => report.changed += 1,
                    Err(e) => {
                        warn!(id = record.id, error = %e, "failed to apply preset entry");
                        report.errors.push(format!("{}: {e}", record.name));
                    }
                }
            }
        }
    }

    info!(preset_id, changed = report.changed, errors = report.errors.len(), "preset applied");
    Ok(report)
}

impl ApplyReport {
    pub fn describe(&self) -> String {
        if self.errors.is_empty() {
            format!(
                "Applied preset: {} of {} mods changed, {} missing on disk.",
                self.changed, self.total, self.skipped_missing
            )
        } else {
            format!(
                "Applied preset with {} error(s): {} of {} mods changed.",
                self.errors.len(),
                self.changed,
                self.total
            )
        }
    }
}
