use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct ArchiveEntry {
    /// Forward-slash path inside the archive.
    pub path: String,
    pub is_dir: bool,
    /// Directory that directly contains a mod ini, i.e. a plausible root to
    /// extract.
    pub is_likely_mod_root: bool,
}

/// Result of `analyze_archive`: the entry listing plus whatever could be
/// deduced from the first plausible root's ini.
#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct ArchiveAnalysis {
    pub archive_path: String,
    pub entries: Vec<ArchiveEntry>,
    pub deduced_name: Option<String>,
    pub deduced_author: Option<String>,
    pub deduced_entity_slug: Option<String>,
    /// Raw `Type =` value from the ini, e.g. "Character".
    pub raw_ini_type: Option<String>,
    /// Raw `Target =` value from the ini, e.g. "Raiden Shogun".
    pub raw_ini_target: Option<String>,
    pub detected_preview_path: Option<String>,
}

/// Where the preview image for an import comes from.
#[derive(Serialize, Deserialize, Type, Clone, Debug)]
#[serde(tag = "kind", content = "path", rename_all = "camelCase")]
pub enum PreviewSource {
    /// Absolute path on disk, picked by the user.
    External(String),
    /// Path inside the archive being imported.
    Internal(String),
}

#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct ImportRequest {
    pub archive_path: String,
    pub target_entity_slug: String,
    /// Archive-internal directory to extract; empty string means the whole
    /// archive.
    pub internal_root: String,
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category_tag: Option<String>,
    pub preview: Option<PreviewSource>,
}

#[derive(Serialize, Deserialize, Type, Clone, Debug)]
pub struct FolderImportRequest {
    pub source_dir: String,
    pub target_entity_slug: String,
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category_tag: Option<String>,
    /// Absolute path of a preview image to install as preview.png.
    pub preview_path: Option<String>,
}
