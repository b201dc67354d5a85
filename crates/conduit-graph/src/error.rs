use conduit_llm::ProviderError;
use thiserror::Error;

/// Failure inside a single tool
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Failed(String),
}

/// Failure of one node's `apply`
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Provider invocation failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Tool '{tool}' failed: {source}")]
    Tool {
        tool: String,
        #[source]
        source: ToolError,
    },

    #[error("No tool named '{0}' is registered")]
    UnknownTool(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A conditional edge could not resolve its next node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Call '{call_id}' requests tool '{tool}', which is not registered")]
    UnknownTool { tool: String, call_id: String },

    #[error("Route points at unknown node '{0}'")]
    UnknownTarget(String),

    #[error("Tool round-trip limit ({0}) reached")]
    ToolRoundLimit(u32),

    #[error("{0}")]
    Unresolved(String),
}

/// Error surfaced by a run
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Node '{node}' failed: {source}")]
    Node {
        node: String,
        #[source]
        source: NodeError,
    },

    #[error("Routing after node '{node}' failed: {source}")]
    Routing {
        node: String,
        #[source]
        source: RoutingError,
    },

    #[error("Invalid graph: {0}")]
    Invalid(String),

    #[error("Step limit ({0}) reached before the graph terminated")]
    StepLimit(usize),
}

impl GraphError {
    /// Name of the node the failure is attributed to
    pub fn node(&self) -> Option<&str> {
        match self {
            Self::Node { node, .. } | Self::Routing { node, .. } => Some(node),
            Self::Invalid(_) | Self::StepLimit(_) => None,
        }
    }

    /// True when an external capability (model or search) failed
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::Node {
                source: NodeError::Provider(_)
                    | NodeError::Tool {
                        source: ToolError::Provider(_),
                        ..
                    },
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
