pub mod commands;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;

use crate::core::registry::AppRegistry;
use specta_typescript::{BigIntExportBehavior, Typescript};
use tauri::Manager;
use tauri_specta::{collect_commands, Builder};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Sets up the tracing stack: env-filtered, stdout plus a daily-rolling file
/// in the app data directory. The returned guard must stay alive for the
/// process lifetime or buffered log lines are lost.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match directories::ProjectDirs::from("dev", "wardrobe", "mod_wardrobe") {
        Some(dirs) => {
            let log_dir = dirs.data_dir().join("logs");
            let (file_writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(
                    log_dir,
                    "wardrobe.log",
                ));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(file_writer.and(std::io::stdout))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _log_guard = init_tracing();

    let builder = Builder::<tauri::Wry>::new().commands(collect_commands![
        // Settings & UI prefs
        commands::settings::get_settings,
        commands::settings::update_settings,
        commands::settings::get_ui_pref,
        commands::settings::set_ui_pref,
        // Shell integration
        commands::shell::select_directory,
        commands::shell::select_executable,
        commands::shell::select_archive_file,
        commands::shell::launch_quick_app,
        commands::shell::open_mods_folder,
        commands::shell::open_asset_folder,
        commands::shell::open_custom_url,
        // Entities
        commands::entities::get_categories,
        commands::entities::get_entities_by_category,
        commands::entities::get_entity_details,
        commands::entities::get_total_asset_count,
        commands::entities::get_dashboard_stats,
        // Assets
        commands::assets::get_assets_for_entity,
        commands::assets::toggle_asset_enabled,
        commands::assets::set_assets_enabled,
        commands::assets::update_asset_info,
        commands::assets::relocate_asset,
        commands::assets::delete_asset,
        commands::assets::get_asset_preview,
        // Tracked operations
        commands::scan::scan_mods,
        commands::archive::analyze_archive,
        commands::archive::read_archive_preview,
        commands::archive::import_archive,
        commands::archive::import_folder,
        // Presets
        commands::presets::create_preset,
        commands::presets::get_presets,
        commands::presets::get_favorite_presets,
        commands::presets::apply_preset,
        commands::presets::toggle_preset_favorite,
        commands::presets::overwrite_preset,
        commands::presets::delete_preset,
        commands::presets::add_asset_to_presets,
    ]);

    #[cfg(debug_assertions)] // <- Only export on non-release builds
    builder
        .export(
            // Numeric ids fit in JS numbers; don't fail the export on i64.
            Typescript::default().bigint(BigIntExportBehavior::Number),
            "bindings/wardrobe.ts",
        )
        .expect("Failed to export typescript bindings");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(builder.invoke_handler())
        .setup(|app| {
            let registry = AppRegistry::new();
            let settings_handle = registry.settings.clone();
            let catalog_handle = registry.catalog.clone();
            app.manage(registry);

            // Open the catalog off the setup thread; an unconfigured or
            // broken mods root surfaces through the first command instead of
            // blocking the window.
            tauri::async_runtime::spawn_blocking(move || {
                if let Err(e) = AppRegistry::reload_catalog(&settings_handle, &catalog_handle) {
                    error!(error = %e, "failed to open catalog at startup");
                }
            });
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
