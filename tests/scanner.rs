use mod_wardrobe_lib::core::scanner;
use std::fs;
use tempfile::tempdir;

mod common;

#[test]
fn scan_registers_mod_folders_and_deduces_targets() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    common::write_mod_folder(
        &root,
        "downloads/SilkDress",
        &common::basic_ini("Silk Dress", "Raiden Shogun"),
        true,
    );
    common::write_mod_folder(
        &root,
        "downloads/Mystery_v1.2",
        "[Mod]\nDescription = no target here\n",
        false,
    );

    let summary = scanner::scan(&mut catalog).unwrap();
    assert_eq!(summary.scanned, 2);
    assert_eq!(summary.added, 2);
    assert_eq!(summary.errors, 0);

    let silk = catalog
        .assets()
        .find(|a| a.name == "Silk Dress")
        .expect("deduced from ini");
    assert_eq!(silk.entity_slug, "raiden-shogun");
    assert_eq!(silk.author.as_deref(), Some("tester"));
    assert_eq!(silk.image_filename.as_deref(), Some("preview.png"));
    assert_eq!(silk.folder_name, "downloads/SilkDress");

    // No target anywhere: lands in the fallback bucket, name cleaned up.
    let mystery = catalog
        .assets()
        .find(|a| a.folder_name == "downloads/Mystery_v1.2")
        .expect("registered without deduction");
    assert_eq!(mystery.entity_slug, "characters-other");
    assert_eq!(mystery.name, "Mystery");
}

#[test]
fn scan_does_not_descend_into_mod_folders() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    common::write_mod_folder(&root, "Outer", &common::basic_ini("Outer", "Eula"), false);
    // A nested folder with its own ini must not become a second asset.
    common::write_mod_folder(
        &root,
        "Outer/textures",
        "[Info]\nName = inner\n",
        false,
    );

    let summary = scanner::scan(&mut catalog).unwrap();
    assert_eq!(summary.added, 1);
    assert_eq!(catalog.asset_count(), 1);
}

#[test]
fn disabled_folders_register_under_their_clean_path() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    common::write_mod_folder(
        &root,
        "chars/DISABLED_Frost",
        &common::basic_ini("Frost", "Eula"),
        false,
    );

    scanner::scan(&mut catalog).unwrap();
    let frost = catalog.assets().next().unwrap();
    assert_eq!(frost.folder_name, "chars/Frost");
}

#[test]
fn rescan_is_idempotent_across_toggle_states() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    common::write_mod_folder(&root, "Frost", &common::basic_ini("Frost", "Eula"), false);
    scanner::scan(&mut catalog).unwrap();
    assert_eq!(catalog.asset_count(), 1);

    // Disabling the folder on disk must not produce a duplicate record.
    fs::rename(root.join("Frost"), root.join("DISABLED_Frost")).unwrap();
    let summary = scanner::scan(&mut catalog).unwrap();
    assert_eq!(summary.added, 0);
    assert_eq!(catalog.asset_count(), 1);
}

#[test]
fn scan_prunes_vanished_folders() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    common::write_mod_folder(&root, "Stay", &common::basic_ini("Stay", "Eula"), false);
    common::write_mod_folder(&root, "Leave", &common::basic_ini("Leave", "Klee"), false);
    scanner::scan(&mut catalog).unwrap();
    assert_eq!(catalog.asset_count(), 2);

    fs::remove_dir_all(root.join("Leave")).unwrap();
    let summary = scanner::scan(&mut catalog).unwrap();
    assert_eq!(summary.pruned, 1);
    assert_eq!(catalog.asset_count(), 1);
    assert_eq!(catalog.assets().next().unwrap().folder_name, "Stay");
}

#[test]
fn state_dir_and_plain_folders_are_ignored() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    // A directory without any ini is not a mod.
    fs::create_dir_all(root.join("random/stuff")).unwrap();
    fs::write(root.join("random/readme.txt"), "hi").unwrap();

    let summary = scanner::scan(&mut catalog).unwrap();
    assert_eq!(summary.scanned, 0);
    assert_eq!(catalog.asset_count(), 0);
}

#[test]
fn folder_name_heuristic_kicks_in_without_ini_target() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    common::write_mod_folder(
        &root,
        "KleeSummerOutfit",
        "[Mod]\nName = Summer Outfit\n",
        false,
    );

    scanner::scan(&mut catalog).unwrap();
    let outfit = catalog.assets().next().unwrap();
    assert_eq!(outfit.entity_slug, "klee");
    assert_eq!(outfit.name, "Summer Outfit");
}
