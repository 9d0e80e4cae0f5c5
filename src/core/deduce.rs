use crate::core::asset_fs;
use crate::core::definitions::{other_slug, Definitions};
use camino::Utf8Path;
use ini::Ini;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;
use walkdir::WalkDir;

/// Loader-internal ini files that never describe the mod itself.
const EXCLUDED_INI_FILENAMES: [&str; 8] = [
    "orfix.ini",
    "region.ini",
    "offset.ini",
    "water.ini",
    "fixdash.ini",
    "deltatime.ini",
    "object.ini",
    "timer.ini",
];

/// Ini sections worth searching for mod metadata, in priority order.
const METADATA_SECTIONS: [&str; 4] = ["Mod", "Settings", "Info", "General"];

fn name_cleanup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(_v\d+(\.\d+)*|\(disabled\)|_DISABLED|^DISABLED_)")
            .expect("static regex")
    })
}

/// Strips versioning and state noise from a raw mod name. Falls back to the
/// input when cleanup would leave nothing.
pub fn clean_display_name(raw: &str) -> String {
    let cleaned = name_cleanup_regex().replace_all(raw, "");
    let cleaned = cleaned.trim().trim_matches(['_', '-']).trim();
    if cleaned.is_empty() {
        raw.trim().to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn is_excluded_ini(file_name: &str) -> bool {
    EXCLUDED_INI_FILENAMES.contains(&file_name.to_lowercase().as_str())
}

/// Metadata pulled out of one mod ini.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IniMetadata {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    /// Raw `Target =` / `Entity =` / `Character =` value.
    pub target: Option<String>,
    /// Raw `Type =` / `Category =` value.
    pub type_tag: Option<String>,
}

impl IniMetadata {
    pub fn is_empty(&self) -> bool {
        self == &IniMetadata::default()
    }
}

/// Parses mod metadata from ini text. Later sections do not overwrite values
/// found in earlier (higher-priority) sections.
pub fn read_ini_metadata(content: &str) -> IniMetadata {
    let mut meta = IniMetadata::default();
    let Ok(ini) = Ini::load_from_str(content) else {
        return meta;
    };

    for section_name in METADATA_SECTIONS {
        let Some(section) = ini.section(Some(section_name)) else {
            continue;
        };
        let pick = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| section.get(*k))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        meta.name = meta.name.or_else(|| pick(&["Name", "ModName"]));
        meta.author = meta.author.or_else(|| pick(&["Author"]));
        meta.description = meta.description.or_else(|| pick(&["Description"]));
        meta.target = meta
            .target
            .or_else(|| pick(&["Target", "Entity", "Character"]));
        meta.type_tag = meta.type_tag.or_else(|| pick(&["Type", "Category"]));
    }

    meta
}

/// Everything the scanner could work out about one mod folder.
#[derive(Clone, Debug)]
pub struct DeducedInfo {
    /// Always resolves to a known entity; undeducible mods land in the
    /// fallback category's "-other" bucket.
    pub entity_slug: String,
    pub name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub type_tag: Option<String>,
    pub image_filename: Option<String>,
}

fn first_metadata_ini(dir: &Utf8Path) -> Option<String> {
    WalkDir::new(dir)
        .max_depth(1)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ini"))
        })
        .filter(|e| {
            e.file_name()
                .to_str()
                .map_or(true, |name| !is_excluded_ini(name))
        })
        .find_map(|e| std::fs::read_to_string(e.path()).ok())
}

/// Deduces target entity, display name, author and preview for a mod folder.
/// Priority: ini `Target` value, then entity names embedded in the folder
/// name, then the fallback category's "-other" bucket.
pub fn deduce_folder(dir: &Utf8Path, defs: &Definitions, fallback_category: &str) -> DeducedInfo {
    let folder_name = dir.file_name().unwrap_or_default().to_string();

    let meta = first_metadata_ini(dir)
        .map(|content| read_ini_metadata(&content))
        .unwrap_or_default();

    let entity_slug = meta
        .target
        .as_deref()
        .and_then(|target| defs.match_entity(target))
        .or_else(|| defs.match_in_folder_name(&folder_name))
        .map(|e| e.slug.clone())
        .unwrap_or_else(|| {
            debug!(folder = %folder_name, "no entity deduced, assigning to fallback bucket");
            other_slug(fallback_category)
        });

    let name = clean_display_name(meta.name.as_deref().unwrap_or(&folder_name));

    DeducedInfo {
        entity_slug,
        name,
        author: meta.author,
        description: meta.description,
        type_tag: meta.type_tag,
        image_filename: asset_fs::find_preview_image(dir),
    }
}
