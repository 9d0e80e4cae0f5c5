use crate::models::error::WError;
use crate::models::task::TaskStatus;
use tauri::async_runtime::spawn_blocking;
use tauri::ipc::Channel;
use tokio::task_local;

task_local! {
     static CHANNEL: Channel<TaskStatus>;
}

/// Scopes a progress channel to one blocking task, so the code running the
/// operation can emit status without threading the channel through every
/// call. One invocation, one channel: concurrent operations of the same type
/// cannot interleave their updates.
pub struct TaskContext;

impl TaskContext {
    pub async fn provide<F, R>(channel: Channel<TaskStatus>, f: F) -> Result<R, WError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        spawn_blocking(move || CHANNEL.sync_scope(channel, f))
            .await
            .map_err(|e| WError::AsyncRuntime(e.to_string()))
    }

    pub fn emit(status: TaskStatus) -> Result<(), WError> {
        CHANNEL
            .try_with(|c| {
                c.send(status)
                    .map_err(|e| WError::StatusChannel(e.to_string()))
            })
            .unwrap_or_else(|_| Err(WError::ContextUnprovided))
    }

    /// Best-effort emit: the frontend may have dropped its listener (e.g.
    /// navigated away), which must not fail the disk work.
    pub fn emit_lossy(status: TaskStatus) {
        let _ = Self::emit(status);
    }
}
