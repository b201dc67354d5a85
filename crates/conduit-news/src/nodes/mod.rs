mod fetch;
mod persist;
mod summarize;

pub use fetch::FetchNewsNode;
pub use persist::{PersistNode, DEFAULT_OUTPUT_DIR};
pub use summarize::{SummarizeNode, NO_ARTICLES_FOUND, SUMMARY_PROMPT};
