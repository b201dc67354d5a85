pub mod message;
pub mod tool;

pub use message::{AssistantMessage, Message};
pub use tool::{ToolCallRequest, ToolSpec};
