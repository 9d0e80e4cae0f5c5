use mod_wardrobe_lib::core::catalog::Catalog;
use mod_wardrobe_lib::models::asset::AssetRecord;
use mod_wardrobe_lib::models::error::WError;
use mod_wardrobe_lib::models::preset::{PresetEntry, PresetRecord};
use tempfile::tempdir;

mod common;

fn record(entity: &str, folder: &str) -> AssetRecord {
    AssetRecord {
        id: 0,
        entity_slug: entity.to_string(),
        name: folder.to_string(),
        description: None,
        author: None,
        category_tag: None,
        folder_name: folder.to_string(),
        image_filename: None,
    }
}

#[test]
fn open_creates_state_dir_and_manifest() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let catalog = Catalog::open(&root).unwrap();

    assert!(root.join(".wardrobe/catalog.toml").is_file());
    assert!(root.join(".wardrobe/presets.toml").is_file());
    assert_eq!(catalog.asset_count(), 0);
    assert!(!catalog.id.is_empty());
}

#[test]
fn open_fails_on_missing_root() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp).join("does-not-exist");
    assert!(Catalog::open(&root).is_err());
}

#[test]
fn records_survive_a_reload() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);

    let first_id = {
        let mut catalog = Catalog::open(&root).unwrap();
        let id = catalog
            .insert_asset(record("raiden-shogun", "characters/raiden-shogun/Dress"))
            .unwrap();
        catalog.insert_preset(PresetRecord {
            id: 0,
            name: "all-on".to_string(),
            is_favorite: true,
            entries: vec![PresetEntry {
                asset_id: id,
                enabled: true,
            }],
        });
        catalog.persist().unwrap();
        (id, catalog.id.clone())
    };

    let catalog = Catalog::open(&root).unwrap();
    assert_eq!(catalog.id, first_id.1);
    let asset = catalog.asset(first_id.0).unwrap();
    assert_eq!(asset.folder_name, "characters/raiden-shogun/Dress");
    let preset = catalog.presets().next().unwrap();
    assert_eq!(preset.name, "all-on");
    assert!(preset.is_favorite);
    assert_eq!(preset.entries.len(), 1);
}

#[test]
fn ids_are_monotonic_and_never_reused() {
    let temp = tempdir().unwrap();
    let mut catalog = common::open_catalog(&temp);

    let a = catalog.insert_asset(record("eula", "A")).unwrap();
    let b = catalog.insert_asset(record("eula", "B")).unwrap();
    assert!(b > a);

    catalog.remove_asset(b).unwrap();
    let c = catalog.insert_asset(record("eula", "C")).unwrap();
    assert!(c > b);
}

#[test]
fn duplicate_clean_path_is_rejected() {
    let temp = tempdir().unwrap();
    let mut catalog = common::open_catalog(&temp);

    catalog.insert_asset(record("eula", "Outfits/Dup")).unwrap();
    let err = catalog
        .insert_asset(record("klee", "Outfits/Dup"))
        .unwrap_err();
    assert!(matches!(err, WError::ModOperation(_)));
}

#[test]
fn unknown_entity_is_rejected() {
    let temp = tempdir().unwrap();
    let mut catalog = common::open_catalog(&temp);
    let err = catalog.insert_asset(record("nobody", "X")).unwrap_err();
    assert!(matches!(err, WError::NotFound(_)));
}

#[test]
fn removing_an_asset_drops_it_from_presets() {
    let temp = tempdir().unwrap();
    let mut catalog = common::open_catalog(&temp);

    let keep = catalog.insert_asset(record("eula", "Keep")).unwrap();
    let gone = catalog.insert_asset(record("eula", "Gone")).unwrap();
    let preset_id = catalog.insert_preset(PresetRecord {
        id: 0,
        name: "mixed".to_string(),
        is_favorite: false,
        entries: vec![
            PresetEntry {
                asset_id: keep,
                enabled: true,
            },
            PresetEntry {
                asset_id: gone,
                enabled: false,
            },
        ],
    });

    catalog.remove_asset(gone).unwrap();

    let preset = catalog.preset(preset_id).unwrap();
    assert_eq!(preset.entries.len(), 1);
    assert_eq!(preset.entries[0].asset_id, keep);
}

#[test]
fn incompatible_manifest_format_is_refused() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    Catalog::open(&root).unwrap();

    let manifest_path = root.join(".wardrobe/catalog.toml");
    let text = std::fs::read_to_string(&manifest_path).unwrap();
    let bumped = text.replacen("format = \"1.", "format = \"99.", 1);
    assert_ne!(text, bumped, "fixture should rewrite the format field");
    std::fs::write(&manifest_path, bumped).unwrap();

    let err = Catalog::open(&root).unwrap_err();
    assert!(matches!(err, WError::Config(_)));
}

#[test]
fn definitions_synthesize_an_other_bucket_per_category() {
    let temp = tempdir().unwrap();
    let catalog = common::open_catalog(&temp);

    for category in &catalog.defs.categories {
        let other = format!("{}-other", category.slug);
        let entity = catalog.defs.entity(&other).unwrap();
        assert!(entity.is_other);
        assert_eq!(entity.category_slug, category.slug);
    }
}

#[test]
fn entity_matching_handles_slug_name_and_first_word() {
    let temp = tempdir().unwrap();
    let catalog = common::open_catalog(&temp);

    assert_eq!(
        catalog.defs.match_entity("raiden-shogun").unwrap().slug,
        "raiden-shogun"
    );
    assert_eq!(
        catalog.defs.match_entity("Raiden Shogun").unwrap().slug,
        "raiden-shogun"
    );
    assert_eq!(
        catalog.defs.match_entity("raiden").unwrap().slug,
        "raiden-shogun"
    );
    assert!(catalog.defs.match_entity("paimon").is_none());
}
