use camino::Utf8PathBuf;
use mod_wardrobe_lib::core::importer;
use mod_wardrobe_lib::models::archive::{ImportRequest, FolderImportRequest, PreviewSource};
use mod_wardrobe_lib::models::error::WError;
use std::fs;
use std::io::Write;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

mod common;

/// Builds a zip fixture: one mod root with an ini, a texture, a preview and
/// an unrelated top-level readme.
fn write_fixture_zip(path: &Utf8PathBuf) {
    let file = fs::File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    writer.add_directory("SilkDress/", options).unwrap();
    writer.start_file("SilkDress/mod.ini", options).unwrap();
    writer
        .write_all(b"[Mod]\nName = Silk Dress_v2.0\nAuthor = tester\nTarget = Raiden Shogun\nType = Character\n")
        .unwrap();
    writer.start_file("SilkDress/body.dds", options).unwrap();
    writer.write_all(b"texture-bytes").unwrap();
    writer.start_file("SilkDress/preview.png", options).unwrap();
    writer.write_all(b"\x89PNG\r\nfixture").unwrap();
    writer.start_file("readme.txt", options).unwrap();
    writer.write_all(b"unrelated").unwrap();
    writer.finish().unwrap();
}

fn request(archive: &Utf8PathBuf) -> ImportRequest {
    ImportRequest {
        archive_path: archive.to_string(),
        target_entity_slug: "raiden-shogun".to_string(),
        internal_root: "SilkDress".to_string(),
        name: "Silk Dress".to_string(),
        description: Some("flowing".to_string()),
        author: Some("tester".to_string()),
        category_tag: Some("Outfit".to_string()),
        preview: None,
    }
}

#[test]
fn analyze_marks_roots_and_deduces_metadata() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let catalog = common::open_catalog(&temp);

    let archive = root.join("dress.zip");
    write_fixture_zip(&archive);

    let analysis = importer::analyze(&archive, &catalog).unwrap();

    let silk_root = analysis
        .entries
        .iter()
        .find(|e| e.path.trim_end_matches('/') == "SilkDress")
        .unwrap();
    assert!(silk_root.is_likely_mod_root);
    assert!(analysis.entries.iter().any(|e| e.path == "readme.txt" && !e.is_likely_mod_root));

    assert_eq!(analysis.deduced_name.as_deref(), Some("Silk Dress"));
    assert_eq!(analysis.deduced_author.as_deref(), Some("tester"));
    assert_eq!(analysis.deduced_entity_slug.as_deref(), Some("raiden-shogun"));
    assert_eq!(analysis.raw_ini_target.as_deref(), Some("Raiden Shogun"));
    assert_eq!(analysis.raw_ini_type.as_deref(), Some("Character"));
    assert_eq!(
        analysis.detected_preview_path.as_deref(),
        Some("SilkDress/preview.png")
    );
}

#[test]
fn analyze_falls_back_to_the_archive_stem_for_the_name() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let catalog = common::open_catalog(&temp);

    let archive = root.join("BareMod_v1.3.zip");
    let file = fs::File::create(&archive).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    writer.start_file("loose.txt", options).unwrap();
    writer.write_all(b"no ini anywhere").unwrap();
    writer.finish().unwrap();

    let analysis = importer::analyze(&archive, &catalog).unwrap();
    assert!(analysis.entries.iter().all(|e| !e.is_likely_mod_root));
    assert_eq!(analysis.deduced_name.as_deref(), Some("BareMod"));
}

#[test]
fn read_entry_returns_bytes_or_not_found() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    common::open_catalog(&temp);

    let archive = root.join("dress.zip");
    write_fixture_zip(&archive);

    let bytes = importer::read_entry(&archive, "SilkDress/preview.png").unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));

    let err = importer::read_entry(&archive, "SilkDress/missing.png").unwrap_err();
    assert!(matches!(err, WError::NotFound(_)));
}

#[test]
fn import_extracts_the_selected_root_and_registers_the_asset() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    let archive = root.join("dress.zip");
    write_fixture_zip(&archive);

    let id = importer::import_archive(&mut catalog, &request(&archive)).unwrap();
    let record = catalog.asset(id).unwrap();

    assert_eq!(record.entity_slug, "raiden-shogun");
    assert_eq!(
        record.folder_name,
        "characters/raiden-shogun/Silk_Dress"
    );
    // Only the selected root's contents land in the destination.
    let dest = root.join("characters/raiden-shogun/Silk_Dress");
    assert!(dest.join("mod.ini").is_file());
    assert!(dest.join("body.dds").is_file());
    assert!(!dest.join("readme.txt").exists());
    // The extracted preview is picked up automatically.
    assert_eq!(record.image_filename.as_deref(), Some("preview.png"));
}

#[test]
fn import_with_internal_preview_installs_preview_png() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    let archive = root.join("dress.zip");
    write_fixture_zip(&archive);

    let mut req = request(&archive);
    req.preview = Some(PreviewSource::Internal("SilkDress/preview.png".to_string()));
    let id = importer::import_archive(&mut catalog, &req).unwrap();

    let dest = root.join("characters/raiden-shogun/Silk_Dress");
    assert!(dest.join("preview.png").is_file());
    assert_eq!(
        catalog.asset(id).unwrap().image_filename.as_deref(),
        Some("preview.png")
    );
}

#[test]
fn duplicate_import_is_rejected_and_leaves_no_folder() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    let archive = root.join("dress.zip");
    write_fixture_zip(&archive);

    importer::import_archive(&mut catalog, &request(&archive)).unwrap();
    let err = importer::import_archive(&mut catalog, &request(&archive)).unwrap_err();
    assert!(matches!(err, WError::ModOperation(_)));
    assert_eq!(catalog.asset_count(), 1);
}

#[test]
fn import_rejects_an_empty_selection() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    let archive = root.join("dress.zip");
    write_fixture_zip(&archive);

    let mut req = request(&archive);
    req.internal_root = "NoSuchDir".to_string();
    let err = importer::import_archive(&mut catalog, &req).unwrap_err();
    assert!(matches!(err, WError::Archive(_)));
    // The prepared destination folder is cleaned up on failure.
    assert!(!root.join("characters/raiden-shogun/Silk_Dress").exists());
}

#[test]
fn import_validates_name_and_entity() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    let archive = root.join("dress.zip");
    write_fixture_zip(&archive);

    let mut req = request(&archive);
    req.name = "   ".to_string();
    assert!(matches!(
        importer::import_archive(&mut catalog, &req).unwrap_err(),
        WError::InvalidInput(_)
    ));

    let mut req = request(&archive);
    req.target_entity_slug = "nobody".to_string();
    assert!(matches!(
        importer::import_archive(&mut catalog, &req).unwrap_err(),
        WError::NotFound(_)
    ));
}

#[test]
fn folder_import_copies_recursively() {
    let temp = tempdir().unwrap();
    let root = common::utf8_root(&temp);
    let mut catalog = common::open_catalog(&temp);

    // Source outside the mods root, as a drag-and-drop would provide.
    let source_temp = tempdir().unwrap();
    let source = common::utf8_root(&source_temp).join("LooseMod");
    fs::create_dir_all(source.join("textures")).unwrap();
    fs::write(source.join("mod.ini"), "[Mod]\nName = Loose\n").unwrap();
    fs::write(source.join("textures/body.dds"), b"bytes").unwrap();

    let id = importer::import_folder(
        &mut catalog,
        &FolderImportRequest {
            source_dir: source.to_string(),
            target_entity_slug: "eula".to_string(),
            name: "Loose Mod".to_string(),
            description: None,
            author: None,
            category_tag: None,
            preview_path: None,
        },
    )
    .unwrap();

    let record = catalog.asset(id).unwrap();
    assert_eq!(record.folder_name, "characters/eula/Loose_Mod");
    let dest = root.join("characters/eula/Loose_Mod");
    assert!(dest.join("mod.ini").is_file());
    assert!(dest.join("textures/body.dds").is_file());
}
