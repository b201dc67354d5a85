use crate::state::State;
use serde::{Deserialize, Serialize};

/// Lifecycle events emitted by `Executor::spawn_run`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Run execution started
    RunStarted {
        run_id: String,
        entry: String,
        timestamp: i64,
    },

    /// A node finished and produced its partial update
    NodeCompleted {
        node: String,
        update: State,
        duration_ms: u64,
    },

    /// Fatal error occurred; no further node runs
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        node_id: Option<String>,
    },

    /// Run reached the terminal sentinel
    RunFinished {
        status: String,
        steps: usize,
        total_duration_ms: u64,
    },
}

/// One element of a streaming run
#[derive(Debug, Clone, PartialEq)]
pub struct NodeUpdate {
    pub node: String,
    pub update: State,
    pub duration_ms: u64,
}
