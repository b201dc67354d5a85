use crate::entry::{ConversationEntry, Role};
use conduit_llm::{AssistantMessage, Message};

/// Call id given to replayed tool entries that lost theirs
pub const UNKNOWN_CALL_ID: &str = "unknown";

/// Rebuild model-facing messages from stored entries
pub fn messages_from_entries(entries: &[ConversationEntry]) -> Vec<Message> {
    entries
        .iter()
        .map(|entry| match entry.role {
            Role::User => Message::user(entry.content.clone()),
            Role::Assistant => Message::Assistant(AssistantMessage {
                content: entry.content.clone(),
                tool_calls: entry.tool_calls.clone().unwrap_or_default(),
            }),
            Role::Tool => Message::tool_result(
                entry.call_id.clone().unwrap_or_else(|| UNKNOWN_CALL_ID.to_string()),
                entry.content.clone(),
            ),
        })
        .collect()
}
