use crate::config::{AppSettings, SettingsPatch};
use crate::core::registry::AppRegistry;
use crate::models::error::WError;
use camino::Utf8PathBuf;
use tauri::State;
use tracing::{info, instrument};

/// First-run gate: the frontend shows the setup flow while `mods_root` is
/// unset.
#[tauri::command]
#[specta::specta]
pub fn get_settings(state: State<'_, AppRegistry>) -> AppSettings {
    state.settings.lock().clone()
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn update_settings(
    state: State<'_, AppRegistry>,
    patch: SettingsPatch,
) -> Result<AppSettings, WError> {
    let settings_handle = state.settings.clone();
    let catalog_handle = state.catalog.clone();

    tauri::async_runtime::spawn_blocking(move || {
        let (updated, root_changed) = {
            let mut settings = settings_handle.lock();
            let previous_root = settings.mods_root.clone();
            patch.apply_to(&mut settings);

            // Normalize a freshly picked root so later path comparisons hold.
            if let Some(root) = settings.mods_root.clone() {
                if settings.mods_root != previous_root {
                    let canonical = dunce::canonicalize(root.as_std_path())
                        .map_err(|e| WError::Config(format!("invalid mods folder '{root}': {e}")))?;
                    settings.mods_root = Some(
                        Utf8PathBuf::from_path_buf(canonical)
                            .map_err(|p| WError::Parse(format!("non-UTF-8 path: {p:?}")))?,
                    );
                }
            }

            settings.save()?;
            (settings.clone(), settings.mods_root != previous_root)
        };

        if root_changed {
            info!(root = ?updated.mods_root, "mods root changed, reloading catalog");
            AppRegistry::reload_catalog(&settings_handle, &catalog_handle)?;
        }
        Ok(updated)
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}

#[tauri::command]
#[specta::specta]
pub fn get_ui_pref(state: State<'_, AppRegistry>, scope: String) -> Option<String> {
    state.settings.lock().ui_prefs.get(&scope).cloned()
}

#[tauri::command]
#[specta::specta]
#[instrument(skip(state))]
pub async fn set_ui_pref(
    state: State<'_, AppRegistry>,
    scope: String,
    value: String,
) -> Result<(), WError> {
    let settings_handle = state.settings.clone();
    tauri::async_runtime::spawn_blocking(move || {
        let mut settings = settings_handle.lock();
        settings.ui_prefs.insert(scope, value);
        settings.save()
    })
    .await
    .map_err(|e| WError::AsyncRuntime(e.to_string()))?
}
