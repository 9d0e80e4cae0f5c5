use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::collections::BTreeMap;

use crate::models::error::WError;

const APP_NAME: &str = "mod_wardrobe";

/// Process-wide application settings, persisted through confy. Constructed
/// once at startup and owned by the registry; nothing reads it ambiently.
#[derive(Serialize, Deserialize, Type, Clone, Debug, Default)]
pub struct AppSettings {
    pub version: u8,
    /// Root folder the game loader reads mods from. `None` until the
    /// first-run setup completes.
    #[specta(type = Option<String>)]
    pub mods_root: Option<Utf8PathBuf>,
    /// Executable started by the quick-launch button.
    #[specta(type = Option<String>)]
    pub quick_launch_path: Option<Utf8PathBuf>,
    pub custom_url: Option<String>,
    /// Per-screen UI preferences (view mode, sort order), keyed by a
    /// screen-scoped string chosen by the frontend.
    pub ui_prefs: BTreeMap<String, String>,
}

impl AppSettings {
    pub fn load() -> Result<AppSettings, WError> {
        Ok(confy::load(APP_NAME, None)?)
    }

    pub fn save(&self) -> Result<(), WError> {
        Ok(confy::store(APP_NAME, None, self)?)
    }

    pub fn is_configured(&self) -> bool {
        self.mods_root.is_some()
    }
}

/// Partial settings update. `Some("")` clears the field, `Some(value)` sets
/// it, `None` leaves it untouched.
#[derive(Serialize, Deserialize, Type, Clone, Debug, Default)]
pub struct SettingsPatch {
    pub mods_root: Option<String>,
    pub quick_launch_path: Option<String>,
    pub custom_url: Option<String>,
}

impl SettingsPatch {
    pub fn apply_to(&self, settings: &mut AppSettings) {
        fn field(patch: &Option<String>) -> Option<Option<String>> {
            patch.as_ref().map(|v| {
                let v = v.trim();
                (!v.is_empty()).then(|| v.to_string())
            })
        }

        if let Some(value) = field(&self.mods_root) {
            settings.mods_root = value.map(Utf8PathBuf::from);
        }
        if let Some(value) = field(&self.quick_launch_path) {
            settings.quick_launch_path = value.map(Utf8PathBuf::from);
        }
        if let Some(value) = field(&self.custom_url) {
            settings.custom_url = value;
        }
    }
}
