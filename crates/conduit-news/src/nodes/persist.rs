use crate::sink::PersistenceSink;
use async_trait::async_trait;
use conduit_graph::{keys, Node, NodeError, State};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_OUTPUT_DIR: &str = "AINews";

/// Saves the summary as `{output_dir}/{frequency}_summary.md`
///
/// A failed write is not fatal: the node records `persistence_warning` and
/// the summary stays in the state.
pub struct PersistNode {
    sink: Arc<dyn PersistenceSink>,
    output_dir: PathBuf,
}

impl PersistNode {
    pub fn new(sink: Arc<dyn PersistenceSink>) -> Self {
        Self {
            sink,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn output_path(&self, frequency: &str) -> PathBuf {
        self.output_dir.join(format!("{}_summary.md", frequency))
    }
}

#[async_trait]
impl Node for PersistNode {
    async fn apply(&self, state: &State) -> Result<State, NodeError> {
        let Some(summary) = state.get_str(keys::SUMMARY) else {
            tracing::debug!("No summary to persist");
            return Ok(State::new());
        };

        let frequency = state.get_str(keys::FREQUENCY).unwrap_or("daily");
        let path = self.output_path(frequency);

        match self.sink.write(&path, summary).await {
            Ok(()) => Ok(State::new().with_field(keys::FILENAME, path.display().to_string())),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to persist summary");
                Ok(State::new().with_field(keys::PERSISTENCE_WARNING, e.to_string()))
            }
        }
    }
}
