#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use mod_wardrobe_lib::core::catalog::Catalog;
use std::fs;
use tempfile::TempDir;

pub fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
}

/// Creates a mod folder under the mods root with a metadata ini and an
/// optional preview image.
pub fn write_mod_folder(base: &Utf8Path, rel: &str, ini: &str, with_preview: bool) {
    let dir = base.join(rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("mod.ini"), ini).unwrap();
    if with_preview {
        fs::write(dir.join("preview.png"), b"\x89PNG\r\n").unwrap();
    }
}

pub fn basic_ini(name: &str, target: &str) -> String {
    format!("[Mod]\nName = {name}\nAuthor = tester\nTarget = {target}\n")
}

/// Opens a catalog over a fresh temp mods root.
pub fn open_catalog(temp: &TempDir) -> Catalog {
    Catalog::open(&utf8_root(temp)).unwrap()
}
