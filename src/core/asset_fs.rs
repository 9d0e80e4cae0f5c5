use crate::models::error::WError;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Literal prefix on the final path segment of a disabled mod folder.
pub const DISABLED_PREFIX: &str = "DISABLED_";

const PREVIEW_CANDIDATES: [&str; 6] = [
    "preview.png",
    "preview.jpg",
    "icon.png",
    "icon.jpg",
    "thumbnail.png",
    "thumbnail.jpg",
];

/// Canonical preview file name installed by imports and metadata edits.
pub const TARGET_PREVIEW_FILENAME: &str = "preview.png";

/// Normalizes a relative folder path to forward slashes.
pub fn normalize(rel: &str) -> String {
    rel.replace('\\', "/")
}

fn split_last_segment(rel: &str) -> (&str, &str) {
    match rel.rfind('/') {
        Some(i) => (&rel[..i + 1], &rel[i + 1..]),
        None => ("", rel),
    }
}

/// Marks a clean relative path as disabled by prefixing its final segment.
/// Parent segments are preserved: "Outfits/MyMod" -> "Outfits/DISABLED_MyMod".
pub fn disabled_form(clean_rel: &str) -> String {
    let (parent, name) = split_last_segment(clean_rel);
    format!("{parent}{DISABLED_PREFIX}{name}")
}

/// Strips the disabled prefix from the final segment, if present. The
/// inverse of [`disabled_form`].
pub fn enabled_form(rel: &str) -> String {
    let (parent, name) = split_last_segment(rel);
    format!("{parent}{}", name.trim_start_matches(DISABLED_PREFIX))
}

pub fn is_disabled_form(rel: &str) -> bool {
    split_last_segment(rel).1.starts_with(DISABLED_PREFIX)
}

/// Where an asset folder currently sits on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskState {
    pub path: Utf8PathBuf,
    /// Relative folder name as it appears on disk, forward slashes.
    pub folder_name: String,
    pub is_enabled: bool,
}

/// Probes the disk for an asset stored under `clean_rel`, checking the
/// enabled form first, then the disabled form. Returns None when neither
/// directory exists (moved or deleted outside the app).
pub fn probe(base: &Utf8Path, clean_rel: &str) -> Option<DiskState> {
    let enabled_path = base.join(clean_rel);
    if enabled_path.is_dir() {
        return Some(DiskState {
            path: enabled_path,
            folder_name: clean_rel.to_string(),
            is_enabled: true,
        });
    }

    let disabled_rel = disabled_form(clean_rel);
    let disabled_path = base.join(&disabled_rel);
    if disabled_path.is_dir() {
        return Some(DiskState {
            path: disabled_path,
            folder_name: disabled_rel,
            is_enabled: false,
        });
    }

    None
}

/// Renames the asset folder into the desired state. A no-op when the folder
/// is already in that state. Errors when the folder is missing entirely.
pub fn set_enabled(base: &Utf8Path, clean_rel: &str, desired: bool) -> Result<DiskState, WError> {
    let current = probe(base, clean_rel).ok_or_else(|| {
        WError::NotFound(format!(
            "mod folder not found on disk for '{clean_rel}' (checked enabled and disabled forms)"
        ))
    })?;

    if current.is_enabled == desired {
        return Ok(current);
    }

    let target_rel = if desired {
        clean_rel.to_string()
    } else {
        disabled_form(clean_rel)
    };
    let target_path = base.join(&target_rel);
    std::fs::rename(&current.path, &target_path).map_err(|e| {
        WError::ModOperation(format!(
            "failed to rename '{}' to '{}': {e}",
            current.path, target_path
        ))
    })?;

    Ok(DiskState {
        path: target_path,
        folder_name: target_rel,
        is_enabled: desired,
    })
}

/// Deletes the asset folder in whichever state it currently is. Returns
/// false when nothing was on disk to begin with.
pub fn delete_from_disk(base: &Utf8Path, clean_rel: &str) -> Result<bool, WError> {
    match probe(base, clean_rel) {
        Some(state) => {
            std::fs::remove_dir_all(&state.path)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// True when the directory directly contains a .ini file, which is how the
/// loader recognizes a mod folder.
pub fn has_ini_file(dir: &Utf8Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    WalkDir::new(dir)
        .max_depth(1)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .any(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"))
        })
}

/// Looks for a conventional preview image directly inside the folder.
pub fn find_preview_image(dir: &Utf8Path) -> Option<String> {
    if !dir.is_dir() {
        return None;
    }
    WalkDir::new(dir)
        .max_depth(1)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .find(|name| PREVIEW_CANDIDATES.contains(&name.to_lowercase().as_str()))
}

/// Archive-internal preview candidates for a given root prefix.
pub fn preview_candidates_under(root_prefix: &str) -> Vec<String> {
    PREVIEW_CANDIDATES
        .iter()
        .map(|c| format!("{root_prefix}{c}"))
        .collect()
}
