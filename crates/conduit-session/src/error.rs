use conduit_graph::GraphError;
use conduit_llm::ProviderError;
use thiserror::Error;

/// A run finished but has nothing presentable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresentationError {
    #[error("No summary was produced (status: {})", .status.as_deref().unwrap_or("unknown"))]
    MissingSummary { status: Option<String> },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Presentation(#[from] PresentationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("{0} requires a search client (set TAVILY_API_KEY)")]
    MissingSearch(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
