use crate::config::AppSettings;
use crate::core::catalog::Catalog;
use crate::models::error::WError;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;

/// Application state managed by Tauri: the settings object and the catalog
/// for the configured mods root. Both are constructed here and passed by
/// handle; nothing reads them through globals.
///
/// Lock order is settings before catalog; locks are never held across await
/// points (command bodies run on blocking threads).
pub struct AppRegistry {
    pub settings: Arc<Mutex<AppSettings>>,
    // Arc<Mutex<Option>> allows swapping the whole catalog when the mods
    // root changes.
    pub catalog: Arc<Mutex<Option<Catalog>>>,
}

impl AppRegistry {
    pub fn new() -> Self {
        let settings = AppSettings::load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load settings, starting with defaults");
            AppSettings::default()
        });
        Self {
            settings: Arc::new(Mutex::new(settings)),
            catalog: Arc::new(Mutex::new(None)),
        }
    }

    /// Opens the catalog for the configured mods root, replacing whatever
    /// was open before. No-op when unconfigured.
    pub fn reload_catalog(
        settings: &Mutex<AppSettings>,
        catalog: &Mutex<Option<Catalog>>,
    ) -> Result<(), WError> {
        let mods_root = settings.lock().mods_root.clone();
        let next = match mods_root {
            Some(root) => Some(Catalog::open(&root)?),
            None => None,
        };
        *catalog.lock() = next;
        Ok(())
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a closure against the open catalog, failing with `NotConfigured`
/// when no mods root is set up yet.
pub fn with_catalog<R>(
    catalog: &Mutex<Option<Catalog>>,
    f: impl FnOnce(&mut Catalog) -> Result<R, WError>,
) -> Result<R, WError> {
    let mut guard = catalog.lock();
    let catalog = guard.as_mut().ok_or(WError::NotConfigured)?;
    f(catalog)
}
