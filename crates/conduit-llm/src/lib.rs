pub mod types;
pub mod traits;
pub mod error;
pub mod config;
pub mod openai;
pub mod client_factory;
pub mod mock;

pub use traits::{ChatModel, ChatOptions, ChatRequest};
pub use error::ProviderError;
pub use config::{LLMConfig, Provider};
pub use openai::OpenAIClient;
pub use client_factory::ClientFactory;
pub use mock::{EchoChatModel, MockChatModel};
pub use types::{AssistantMessage, Message, ToolCallRequest, ToolSpec};
