pub mod entry;
pub mod adapter;
pub mod history;
pub mod document;
pub mod use_case;
pub mod cache;
pub mod config;
pub mod error;
pub mod session;

pub use entry::{ConversationEntry, EntryDisplay, Role};
pub use adapter::{entries_from_messages, fold_state, summary_entry, EntryFolder};
pub use history::messages_from_entries;
pub use document::Document;
pub use use_case::{GraphParts, UseCase};
pub use cache::GraphCache;
pub use crate::config::AppConfig;
pub use error::{PresentationError, SessionError};
pub use session::Session;
