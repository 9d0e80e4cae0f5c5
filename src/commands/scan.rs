use crate::core::registry::{with_catalog, AppRegistry};
use crate::core::scanner;
use crate::models::error::WError;
use crate::models::report::ScanSummary;
use crate::models::task::TaskStatus;
use crate::utils::context::TaskContext;
use tauri::ipc::Channel;
use tauri::State;
use tracing::{info, instrument};

/// Tracked operation: walks the mods root, registers new mods, prunes
/// vanished ones. Progress is streamed on this invocation's channel, so a
/// second concurrent scan gets its own stream.
#[tauri::command]
#[specta::specta]
#[instrument(skip(state, channel))]
pub async fn scan_mods(
    state: State<'_, AppRegistry>,
    channel: Channel<TaskStatus>,
) -> Result<ScanSummary, WError> {
    info!("starting scan task");
    let catalog_handle = state.catalog.clone();

    TaskContext::provide(channel, move || {
        let result = with_catalog(&catalog_handle, scanner::scan);
        match &result {
            Ok(summary) => TaskContext::emit_lossy(TaskStatus::Completed {
                summary: summary.describe(),
            }),
            Err(e) => TaskContext::emit_lossy(TaskStatus::Failed {
                message: e.to_string(),
            }),
        }
        result
    })
    .await?
}
