use crate::core::asset_fs;
use crate::core::catalog::Catalog;
use crate::core::deduce;
use crate::models::asset::AssetRecord;
use crate::models::error::WError;
use crate::models::paths::StatePaths;
use crate::models::report::ScanSummary;
use crate::models::task::TaskStatus;
use crate::utils::context::TaskContext;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Category whose "-other" bucket collects undeducible mods.
const FALLBACK_CATEGORY: &str = "characters";

fn utf8_entry_path(entry: &walkdir::DirEntry) -> Option<Utf8PathBuf> {
    Utf8Path::from_path(entry.path()).map(Utf8Path::to_path_buf)
}

/// Clean relative path (enabled form, forward slashes) for a mod folder
/// found on disk.
fn clean_relative(base: &Utf8Path, dir: &Utf8Path) -> Result<String, WError> {
    let rel = dir
        .strip_prefix(base)
        .map_err(|_| WError::ModOperation(format!("'{dir}' is outside the mods root")))?;
    Ok(asset_fs::enabled_form(&asset_fs::normalize(rel.as_str())))
}

/// Walks the mods root, registers every mod folder not yet in the catalog
/// and prunes records whose folders vanished. A mod folder is any directory
/// directly containing a .ini file; the walk does not descend into one.
///
/// Emits the full `TaskStatus` sequence on the current task context and
/// persists the catalog before returning.
pub fn scan(catalog: &mut Catalog) -> Result<ScanSummary, WError> {
    let base = catalog.mods_root.clone();
    info!(root = %base, "starting mods directory scan");

    // Counting pass, so progress has a stable total.
    let state_dir = StatePaths::default().dir;
    let mod_folders: Vec<Utf8PathBuf> = {
        let mut found = Vec::new();
        let mut walker = WalkDir::new(&base).min_depth(1).into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(path) = utf8_entry_path(&entry) else {
                warn!(path = ?entry.path(), "skipping non-UTF-8 path");
                walker.skip_current_dir();
                continue;
            };
            if path.file_name() == Some(state_dir.as_str()) {
                walker.skip_current_dir();
                continue;
            }
            if asset_fs::has_ini_file(&path) {
                found.push(path);
                walker.skip_current_dir();
            }
        }
        found
    };

    let total = mod_folders.len() as u32;
    TaskContext::emit_lossy(TaskStatus::Started { total });

    let mut summary = ScanSummary::default();

    for (index, dir) in mod_folders.iter().enumerate() {
        let folder_label = dir.file_name().unwrap_or_default().to_string();
        summary.scanned += 1;
        TaskContext::emit_lossy(TaskStatus::Progress {
            processed: (index + 1) as u32,
            total,
            message: format!("Processing: {folder_label}"),
            current_path: Some(dir.to_string()),
        });

        let clean_rel = match clean_relative(&base, dir) {
            Ok(rel) => rel,
            Err(e) => {
                warn!(dir = %dir, error = %e, "failed to derive relative path");
                summary.errors += 1;
                continue;
            }
        };

        if catalog.find_asset_by_path(&clean_rel).is_some() {
            continue;
        }

        let deduced = deduce::deduce_folder(dir, &catalog.defs, FALLBACK_CATEGORY);
        let record = AssetRecord {
            id: 0,
            entity_slug: deduced.entity_slug,
            name: deduced.name,
            description: deduced.description,
            author: deduced.author,
            category_tag: deduced.type_tag,
            folder_name: clean_rel.clone(),
            image_filename: deduced.image_filename,
        };
        match catalog.insert_asset(record) {
            Ok(id) => {
                info!(id, folder = %clean_rel, "registered new mod");
                summary.added += 1;
            }
            Err(e) => {
                warn!(folder = %clean_rel, error = %e, "failed to register mod");
                summary.errors += 1;
            }
        }
    }

    // Prune records whose folder no longer exists in either state.
    let stale: Vec<i64> = catalog
        .assets()
        .filter(|a| asset_fs::probe(&base, &a.folder_name).is_none())
        .map(|a| a.id)
        .collect();
    for id in stale {
        if let Ok(record) = catalog.remove_asset(id) {
            info!(id, folder = %record.folder_name, "pruned vanished mod");
            summary.pruned += 1;
        }
    }

    catalog.persist()?;
    catalog.mark_clean();

    info!(?summary, "scan finished");
    Ok(summary)
}

impl ScanSummary {
    pub fn describe(&self) -> String {
        format!(
            "Scan complete. Processed {} mod folders: {} added, {} pruned, {} errors.",
            self.scanned, self.added, self.pruned, self.errors
        )
    }
}
