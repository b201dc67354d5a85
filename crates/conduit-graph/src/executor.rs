use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::events::{NodeUpdate, StreamEvent};
use crate::graph::Graph;
use crate::router::Route;
use crate::state::State;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Runs a compiled [`Graph`] against an initial state
///
/// `run` and `stream` share one step machine, so folding the items of
/// `stream` over the initial state yields exactly what `run` returns.
#[derive(Clone)]
pub struct Executor {
    graph: Arc<Graph>,
    config: GraphConfig,
}

impl Executor {
    pub fn new(graph: Arc<Graph>, config: GraphConfig) -> Self {
        Self { graph, config }
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Execute to completion and return the final merged state
    pub async fn run(&self, initial: State) -> Result<State> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut machine = RunMachine::new(Arc::clone(&self.graph), self.config.clone(), initial);

        async move {
            while let Some(update) = machine.step().await {
                update?;
            }
            tracing::info!(steps = machine.steps, "Run finished");
            Ok(machine.state)
        }
        .instrument(tracing::info_span!("run", run_id = %run_id))
        .await
    }

    /// Execute lazily, yielding each node's partial update as it completes
    ///
    /// The stream ends after the first error item.
    pub fn stream(&self, initial: State) -> impl Stream<Item = Result<NodeUpdate>> + Send + 'static {
        let mut machine = RunMachine::new(Arc::clone(&self.graph), self.config.clone(), initial);

        async_stream::stream! {
            while let Some(item) = machine.step().await {
                yield item;
            }
        }
    }

    /// Spawn execution in background, return event receiver
    pub fn spawn_run(&self, initial: State) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(self.config.event_buffer.max(1));
        let executor = self.clone();

        tokio::spawn(async move {
            let start_time = Instant::now();
            let run_id = uuid::Uuid::new_v4().to_string();

            let started = StreamEvent::RunStarted {
                run_id: run_id.clone(),
                entry: executor.graph.entry().to_string(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            };
            if tx.send(started).await.is_err() {
                return;
            }

            let mut steps = 0;
            let stream = executor.stream(initial);
            futures::pin_mut!(stream);

            while let Some(item) = stream.next().await {
                let event = match item {
                    Ok(update) => {
                        steps += 1;
                        StreamEvent::NodeCompleted {
                            node: update.node,
                            update: update.update,
                            duration_ms: update.duration_ms,
                        }
                    }
                    Err(e) => {
                        tracing::error!(run_id = %run_id, error = %e, "Run failed");
                        let _ = tx
                            .send(StreamEvent::Error {
                                message: e.to_string(),
                                node_id: e.node().map(str::to_string),
                            })
                            .await;
                        return;
                    }
                };

                if tx.send(event).await.is_err() {
                    tracing::debug!(run_id = %run_id, "Event receiver dropped, stopping run");
                    return;
                }
            }

            let _ = tx
                .send(StreamEvent::RunFinished {
                    status: "success".to_string(),
                    steps,
                    total_duration_ms: start_time.elapsed().as_millis() as u64,
                })
                .await;
        });

        rx
    }
}

enum RunPhase {
    /// Node about to run
    Ready(String),
    /// Node ran and was merged; its outgoing edge is not resolved yet
    Completed(String),
    Finished,
    Failed,
}

struct RunMachine {
    graph: Arc<Graph>,
    config: GraphConfig,
    state: State,
    phase: RunPhase,
    steps: usize,
}

impl RunMachine {
    fn new(graph: Arc<Graph>, config: GraphConfig, initial: State) -> Self {
        let entry = graph.entry().to_string();
        Self {
            graph,
            config,
            state: initial,
            phase: RunPhase::Ready(entry),
            steps: 0,
        }
    }

    /// Advance one node; `None` once the run has terminated or failed
    async fn step(&mut self) -> Option<Result<NodeUpdate>> {
        let node_name = match std::mem::replace(&mut self.phase, RunPhase::Failed) {
            RunPhase::Ready(name) => name,
            RunPhase::Completed(previous) => match self.graph.resolve_next(&previous, &self.state) {
                Ok(Route::Node(next)) => next,
                Ok(Route::End) => {
                    self.phase = RunPhase::Finished;
                    return None;
                }
                Err(source) => {
                    tracing::warn!(node = %previous, error = %source, "Routing failed");
                    return Some(Err(GraphError::Routing {
                        node: previous,
                        source,
                    }));
                }
            },
            RunPhase::Finished => {
                self.phase = RunPhase::Finished;
                return None;
            }
            RunPhase::Failed => return None,
        };

        if self.steps >= self.config.max_steps {
            tracing::warn!(max_steps = self.config.max_steps, "Step limit reached");
            return Some(Err(GraphError::StepLimit(self.config.max_steps)));
        }

        let Some(node) = self.graph.node(&node_name).cloned() else {
            return Some(Err(GraphError::Invalid(format!("Unknown node '{}'", node_name))));
        };

        let node_start = Instant::now();
        let result = node
            .apply(&self.state)
            .instrument(tracing::debug_span!("node", name = %node_name, kind = ?node.kind()))
            .await;
        let duration_ms = node_start.elapsed().as_millis() as u64;

        match result {
            Ok(update) => {
                self.state.apply(update.clone());
                self.steps += 1;
                tracing::debug!(node = %node_name, duration_ms, "Node completed");
                self.phase = RunPhase::Completed(node_name.clone());
                Some(Ok(NodeUpdate {
                    node: node_name,
                    update,
                    duration_ms,
                }))
            }
            Err(source) => {
                tracing::warn!(node = %node_name, error = %source, "Node failed");
                Some(Err(GraphError::Node {
                    node: node_name,
                    source,
                }))
            }
        }
    }
}
