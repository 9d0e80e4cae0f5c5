use serde::{Deserialize, Serialize};
use specta::Type;

/// Lifecycle of one tracked operation, streamed over the invocation's own
/// `Channel`. Exactly one of `Completed`/`Failed` terminates the sequence;
/// `processed` is non-decreasing within a sequence.
#[derive(Serialize, Deserialize, Type, Clone, Debug)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum TaskStatus {
    Started {
        total: u32,
    },
    Progress {
        processed: u32,
        total: u32,
        message: String,
        current_path: Option<String>,
    },
    Completed {
        summary: String,
    },
    Failed {
        message: String,
    },
}
