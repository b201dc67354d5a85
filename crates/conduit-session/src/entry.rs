use conduit_llm::ToolCallRequest;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        })
    }
}

/// How a presentation layer should show an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDisplay {
    Inline,
    /// Folded by default, e.g. raw tool output
    Collapsed,
    /// Kept in history but not rendered
    Hidden,
}

/// One item of a conversation as the user sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallRequest>>,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            call_id: None,
            tool_calls: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            call_id: None,
            tool_calls: None,
        }
    }

    pub fn tool(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            call_id: Some(call_id.into()),
            tool_calls: None,
        }
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCallRequest>) -> Self {
        self.tool_calls = if tool_calls.is_empty() { None } else { Some(tool_calls) };
        self
    }

    /// Assistant turns with no text are recorded but not shown
    pub fn display(&self) -> EntryDisplay {
        match self.role {
            Role::User => EntryDisplay::Inline,
            Role::Assistant if self.content.is_empty() => EntryDisplay::Hidden,
            Role::Assistant => EntryDisplay::Inline,
            Role::Tool => EntryDisplay::Collapsed,
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.display() != EntryDisplay::Hidden
    }
}
