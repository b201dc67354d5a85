use crate::nodes::{FetchNewsNode, PersistNode, SummarizeNode, DEFAULT_OUTPUT_DIR};
use crate::search::SearchClient;
use crate::sink::{FileSink, PersistenceSink};
use conduit_graph::{Graph, GraphError, END};
use conduit_llm::ChatModel;
use std::path::PathBuf;
use std::sync::Arc;

pub const FETCH_NODE: &str = "fetch_ai_news";
pub const SUMMARIZE_NODE: &str = "summarize_ai_news";
pub const PERSIST_NODE: &str = "save_ai_results";

/// Collaborators of the fetch -> summarize -> persist pipeline
pub struct NewsPipeline {
    pub search: Arc<dyn SearchClient>,
    pub model: Arc<dyn ChatModel>,
    pub sink: Arc<dyn PersistenceSink>,
    pub output_dir: PathBuf,
}

impl NewsPipeline {
    /// Pipeline writing to `AINews/` on the local filesystem
    pub fn new(search: Arc<dyn SearchClient>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            search,
            model,
            sink: Arc::new(FileSink::new()),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn PersistenceSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn build(self) -> Result<Graph, GraphError> {
        build_news_graph(self)
    }
}

/// Build the static news graph
pub fn build_news_graph(pipeline: NewsPipeline) -> Result<Graph, GraphError> {
    Graph::builder()
        .add_node(FETCH_NODE, FetchNewsNode::new(pipeline.search))
        .add_node(SUMMARIZE_NODE, SummarizeNode::new(pipeline.model))
        .add_node(
            PERSIST_NODE,
            PersistNode::new(pipeline.sink).with_output_dir(pipeline.output_dir),
        )
        .set_entry_point(FETCH_NODE)
        .add_edge(FETCH_NODE, SUMMARIZE_NODE)
        .add_edge(SUMMARIZE_NODE, PERSIST_NODE)
        .add_edge(PERSIST_NODE, END)
        .compile()
}
