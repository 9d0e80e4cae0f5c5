use crate::core::asset_fs;
use crate::core::catalog::Catalog;
use crate::core::deduce;
use crate::models::archive::{
    ArchiveAnalysis, ArchiveEntry, FolderImportRequest, ImportRequest, PreviewSource,
};
use crate::models::asset::AssetRecord;
use crate::models::error::WError;
use crate::models::task::TaskStatus;
use crate::utils::context::TaskContext;
use crate::utils::file::FileUtils;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use tracing::{debug, info, warn};
use zip::ZipArchive;

fn open_archive(path: &Utf8Path) -> Result<ZipArchive<File>, WError> {
    if !path.is_file() {
        return Err(WError::NotFound(format!("archive file: {path}")));
    }
    Ok(ZipArchive::new(File::open(path)?)?)
}

fn root_prefix(root: &str) -> String {
    let root = asset_fs::normalize(root);
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        String::new()
    } else {
        format!("{root}/")
    }
}

/// Lists the archive, marks directories directly containing a mod ini as
/// likely roots, and deduces metadata from the first such root.
pub fn analyze(archive_path: &Utf8Path, catalog: &Catalog) -> Result<ArchiveAnalysis, WError> {
    let mut archive = open_archive(archive_path)?;

    let mut entries: Vec<ArchiveEntry> = Vec::new();
    let mut ini_contents: HashMap<String, String> = HashMap::new();

    for i in 0..archive.len() {
        let mut file = match archive.by_index(i) {
            Ok(f) => f,
            Err(e) => {
                warn!(index = i, error = %e, "unreadable archive entry");
                continue;
            }
        };
        let Some(path) = file.enclosed_name() else {
            warn!(index = i, "archive entry with unsafe path skipped");
            continue;
        };
        let path = asset_fs::normalize(&path.to_string_lossy());
        let is_dir = file.is_dir();

        let file_name = path.rsplit('/').next().unwrap_or(&path);
        if !is_dir
            && path.to_lowercase().ends_with(".ini")
            && !deduce::is_excluded_ini(file_name)
        {
            let mut content = String::new();
            if file.read_to_string(&mut content).is_ok() {
                ini_contents.insert(path.clone(), content);
            }
        }

        entries.push(ArchiveEntry {
            path,
            is_dir,
            is_likely_mod_root: false,
        });
    }

    // A likely root is a directory entry that directly contains one of the
    // metadata inis.
    let mut root_indices: Vec<usize> = Vec::new();
    for ini_path in ini_contents.keys() {
        let Some((parent, _)) = ini_path.rsplit_once('/') else {
            continue; // ini at archive top level has no directory entry
        };
        if let Some(index) = entries.iter().position(|e| {
            e.is_dir && e.path.trim_end_matches('/') == parent
        }) {
            if !root_indices.contains(&index) {
                root_indices.push(index);
            }
        }
    }
    root_indices.sort_unstable();
    for &index in &root_indices {
        entries[index].is_likely_mod_root = true;
    }

    // Deduce from the first root's ini, if any.
    let mut deduced_name = None;
    let mut deduced_author = None;
    let mut deduced_entity_slug = None;
    let mut raw_ini_type = None;
    let mut raw_ini_target = None;
    let mut detected_preview_path = None;

    if let Some(&index) = root_indices.first() {
        let prefix = root_prefix(&entries[index].path);
        let root_ini = ini_contents
            .iter()
            .find(|(path, _)| {
                path.starts_with(&prefix) && !path[prefix.len()..].contains('/')
            })
            .map(|(_, content)| content);

        if let Some(content) = root_ini {
            let meta = deduce::read_ini_metadata(content);
            deduced_name = meta.name.as_deref().map(deduce::clean_display_name);
            deduced_author = meta.author;
            raw_ini_target = meta.target;
            raw_ini_type = meta.type_tag;
            deduced_entity_slug = raw_ini_target
                .as_deref()
                .and_then(|t| catalog.defs.match_entity(t))
                .map(|e| e.slug.clone());
        }

        detected_preview_path = asset_fs::preview_candidates_under(&prefix)
            .into_iter()
            .find(|candidate| {
                entries
                    .iter()
                    .any(|e| !e.is_dir && e.path.eq_ignore_ascii_case(candidate))
            });
    }

    if deduced_name.as_deref().map_or(true, str::is_empty) {
        deduced_name = archive_path
            .file_stem()
            .map(deduce::clean_display_name);
    }

    debug!(
        ?deduced_name,
        ?deduced_entity_slug,
        roots = root_indices.len(),
        "archive analyzed"
    );

    Ok(ArchiveAnalysis {
        archive_path: archive_path.to_string(),
        entries,
        deduced_name,
        deduced_author,
        deduced_entity_slug,
        raw_ini_type,
        raw_ini_target,
        detected_preview_path,
    })
}

/// Reads one file out of the archive, for preview display in the import
/// dialog.
pub fn read_entry(archive_path: &Utf8Path, internal_path: &str) -> Result<Vec<u8>, WError> {
    let mut archive = open_archive(archive_path)?;
    let normalized = asset_fs::normalize(internal_path);
    let mut file = archive
        .by_name(&normalized)
        .map_err(|_| WError::NotFound(format!("'{normalized}' in archive")))?;
    let mut buffer = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Folder name derived from the user-visible mod name.
fn folder_name_for(name: &str) -> Result<String, WError> {
    let cleaned = name.trim().replace([' ', '.'], "_");
    if cleaned.is_empty() {
        return Err(WError::InvalidInput(
            "mod name results in an empty folder name".to_string(),
        ));
    }
    Ok(cleaned)
}

struct ImportTarget {
    dest: Utf8PathBuf,
    clean_rel: String,
}

/// Resolves and creates `<mods root>/<category>/<entity>/<folder>` for a new
/// import, rejecting duplicates before anything touches the disk.
fn prepare_target(
    catalog: &Catalog,
    entity_slug: &str,
    mod_name: &str,
) -> Result<ImportTarget, WError> {
    if mod_name.trim().is_empty() {
        return Err(WError::InvalidInput("mod name cannot be empty".to_string()));
    }
    let entity = catalog
        .defs
        .entity(entity_slug)
        .ok_or_else(|| WError::NotFound(format!("entity '{entity_slug}'")))?;

    let folder = folder_name_for(mod_name)?;
    let clean_rel = format!("{}/{}/{}", entity.category_slug, entity.slug, folder);

    if catalog.find_asset_by_path(&clean_rel).is_some() {
        return Err(WError::ModOperation(format!(
            "a mod is already registered at '{clean_rel}'"
        )));
    }
    if asset_fs::probe(&catalog.mods_root, &clean_rel).is_some() {
        return Err(WError::ModOperation(format!(
            "a folder already exists at '{clean_rel}'"
        )));
    }

    let dest = catalog.mods_root.join(&clean_rel);
    std::fs::create_dir_all(&dest)?;
    Ok(ImportTarget { dest, clean_rel })
}

/// Installs the preview into the destination folder and returns the file
/// name to record, preferring in order: the explicit preview source, then a
/// conventional image already present in the folder.
fn install_preview(
    archive_path: Option<&Utf8Path>,
    preview: Option<&PreviewSource>,
    dest: &Utf8Path,
) -> Result<Option<String>, WError> {
    match preview {
        Some(PreviewSource::External(path)) => {
            let source = Utf8Path::new(path);
            if !source.is_file() {
                return Err(WError::NotFound(format!("preview image: {source}")));
            }
            std::fs::copy(source, dest.join(asset_fs::TARGET_PREVIEW_FILENAME))?;
            Ok(Some(asset_fs::TARGET_PREVIEW_FILENAME.to_string()))
        }
        Some(PreviewSource::Internal(internal)) => {
            let archive_path = archive_path.ok_or_else(|| {
                WError::InvalidInput("internal preview without an archive".to_string())
            })?;
            let bytes = read_entry(archive_path, internal)?;
            std::fs::write(dest.join(asset_fs::TARGET_PREVIEW_FILENAME), bytes)?;
            Ok(Some(asset_fs::TARGET_PREVIEW_FILENAME.to_string()))
        }
        None => Ok(asset_fs::find_preview_image(dest)),
    }
}

fn register_import(
    catalog: &mut Catalog,
    entity_slug: &str,
    clean_rel: &str,
    name: &str,
    description: Option<String>,
    author: Option<String>,
    category_tag: Option<String>,
    image_filename: Option<String>,
) -> Result<i64, WError> {
    let record = AssetRecord {
        id: 0,
        entity_slug: entity_slug.to_string(),
        name: name.trim().to_string(),
        description,
        author,
        category_tag,
        folder_name: clean_rel.to_string(),
        image_filename,
    };
    let id = catalog.insert_asset(record)?;
    catalog.persist()?;
    Ok(id)
}

/// Extracts the selected internal root of the archive into the entity's mod
/// directory and registers the asset. Emits the full `TaskStatus` sequence
/// on the current task context. On failure the partially created destination
/// folder is removed.
pub fn import_archive(catalog: &mut Catalog, request: &ImportRequest) -> Result<i64, WError> {
    let archive_path = Utf8PathBuf::from(&request.archive_path);
    let target = prepare_target(catalog, &request.target_entity_slug, &request.name)?;

    let result = extract_and_register(catalog, request, &archive_path, &target);
    if result.is_err() {
        // Leave no half-extracted folder behind.
        let _ = std::fs::remove_dir_all(&target.dest);
    }
    result
}

fn extract_and_register(
    catalog: &mut Catalog,
    request: &ImportRequest,
    archive_path: &Utf8Path,
    target: &ImportTarget,
) -> Result<i64, WError> {
    let mut archive = open_archive(archive_path)?;
    let prefix = root_prefix(&request.internal_root);

    let selected: Vec<usize> = (0..archive.len())
        .filter(|&i| {
            archive.by_index(i).is_ok_and(|f| {
                f.enclosed_name()
                    .map(|p| asset_fs::normalize(&p.to_string_lossy()))
                    .is_some_and(|p| prefix.is_empty() || p.starts_with(&prefix))
            })
        })
        .collect();

    let total = selected.len() as u32;
    if total == 0 {
        return Err(WError::Archive(format!(
            "nothing to extract under '{}'",
            request.internal_root
        )));
    }
    TaskContext::emit_lossy(TaskStatus::Started { total });

    let mut extracted_files = 0u32;
    for (processed, &index) in selected.iter().enumerate() {
        let mut file = archive.by_index(index)?;
        // enclosed_name() already rejected zip-slip paths during selection.
        let internal = asset_fs::normalize(
            &file
                .enclosed_name()
                .ok_or_else(|| WError::Archive("unsafe path in archive".to_string()))?
                .to_string_lossy(),
        );
        let rel = internal.strip_prefix(&prefix).unwrap_or(&internal);
        if rel.is_empty() {
            continue;
        }
        let out_path = target.dest.join(rel);

        if file.is_dir() {
            std::fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let mut out = File::create(&out_path)?;
            std::io::copy(&mut file, &mut out)?;
            extracted_files += 1;
        }

        // Preserve executable bits on unix, important for bundled tools.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                let _ = std::fs::set_permissions(
                    &out_path,
                    std::fs::Permissions::from_mode(mode),
                );
            }
        }

        TaskContext::emit_lossy(TaskStatus::Progress {
            processed: (processed + 1) as u32,
            total,
            message: format!("Extracting: {rel}"),
            current_path: Some(internal.clone()),
        });
    }

    if extracted_files == 0 {
        return Err(WError::Archive(format!(
            "no files extracted from '{}' under '{}'",
            archive_path, request.internal_root
        )));
    }

    let image_filename =
        install_preview(Some(archive_path), request.preview.as_ref(), &target.dest)?;

    let id = register_import(
        catalog,
        &request.target_entity_slug,
        &target.clean_rel,
        &request.name,
        request.description.clone(),
        request.author.clone(),
        request.category_tag.clone(),
        image_filename,
    )?;
    info!(id, files = extracted_files, dest = %target.dest, "archive imported");
    Ok(id)
}

/// Imports an already unpacked mod folder by recursive copy.
pub fn import_folder(catalog: &mut Catalog, request: &FolderImportRequest) -> Result<i64, WError> {
    let source = Utf8PathBuf::from(&request.source_dir);
    if !source.is_dir() {
        return Err(WError::NotFound(format!("source folder: {source}")));
    }

    let target = prepare_target(catalog, &request.target_entity_slug, &request.name)?;
    let result = (|| {
        let copied = FileUtils::copy_recursive(&source, &target.dest)?;
        if copied == 0 {
            return Err(WError::ModOperation(format!(
                "source folder '{source}' contains no files"
            )));
        }

        let preview = request
            .preview_path
            .clone()
            .map(PreviewSource::External);
        let image_filename = install_preview(None, preview.as_ref(), &target.dest)?;

        let id = register_import(
            catalog,
            &request.target_entity_slug,
            &target.clean_rel,
            &request.name,
            request.description.clone(),
            request.author.clone(),
            request.category_tag.clone(),
            image_filename,
        )?;
        info!(id, files = copied, dest = %target.dest, "folder imported");
        Ok(id)
    })();

    if result.is_err() {
        let _ = std::fs::remove_dir_all(&target.dest);
    }
    result
}
