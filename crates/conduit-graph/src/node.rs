use crate::error::NodeError;
use crate::state::State;
use async_trait::async_trait;

/// Core abstraction for a unit of computation in the graph
///
/// Reads the current state and returns the partial update to merge. A node
/// never mutates the state it is given.
#[async_trait]
pub trait Node: Send + Sync {
    async fn apply(&self, state: &State) -> Result<State, NodeError>;

    /// Return the kind of this node
    fn kind(&self) -> NodeKind {
        NodeKind::Task
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Invokes a chat model
    Model,
    /// Executes pending tool calls
    Tool,
    /// Fetch, transform or persist step
    Task,
}

/// Node backed by a synchronous closure
pub struct FnNode<F> {
    f: F,
}

impl<F> FnNode<F>
where
    F: Fn(&State) -> Result<State, NodeError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> Node for FnNode<F>
where
    F: Fn(&State) -> Result<State, NodeError> + Send + Sync,
{
    async fn apply(&self, state: &State) -> Result<State, NodeError> {
        (self.f)(state)
    }
}
