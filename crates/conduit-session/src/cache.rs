use crate::use_case::UseCase;
use conduit_graph::Graph;
use std::collections::HashMap;
use std::sync::Arc;

/// Compiled graphs per use case, rebuilt when the model configuration changes
#[derive(Default)]
pub struct GraphCache {
    graphs: HashMap<UseCase, (String, Arc<Graph>)>,
    builds: usize,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached graph when `fingerprint` matches, otherwise build it
    pub fn get_or_build<E>(
        &mut self,
        use_case: UseCase,
        fingerprint: &str,
        build: impl FnOnce() -> Result<Graph, E>,
    ) -> Result<Arc<Graph>, E> {
        if let Some((cached, graph)) = self.graphs.get(&use_case) {
            if cached == fingerprint {
                return Ok(Arc::clone(graph));
            }
            tracing::info!(use_case = %use_case, "Model configuration changed, rebuilding graph");
        }

        let graph = Arc::new(build()?);
        self.builds += 1;
        self.graphs
            .insert(use_case, (fingerprint.to_string(), Arc::clone(&graph)));
        Ok(graph)
    }

    pub fn invalidate(&mut self) {
        self.graphs.clear();
    }

    /// Number of graphs built so far
    pub fn builds(&self) -> usize {
        self.builds
    }
}
