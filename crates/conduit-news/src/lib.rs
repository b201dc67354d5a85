pub mod search;
pub mod tavily;
pub mod web_search;
pub mod sink;
pub mod nodes;
pub mod pipeline;
pub mod mock;

pub use search::{Article, SearchClient, SearchQuery, TimeWindow};
pub use tavily::TavilyClient;
pub use web_search::{WebSearchTool, MAX_RESULTS_LIMIT, WEB_SEARCH_TOOL};
pub use sink::{FileSink, PersistError, PersistenceSink};
pub use nodes::{FetchNewsNode, PersistNode, SummarizeNode, NO_ARTICLES_FOUND};
pub use pipeline::{build_news_graph, NewsPipeline, FETCH_NODE, PERSIST_NODE, SUMMARIZE_NODE};
pub use mock::MockSearchClient;
