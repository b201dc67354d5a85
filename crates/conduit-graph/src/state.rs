use conduit_llm::{Message, ToolCallRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Well-known state keys
pub mod keys {
    /// Append-only conversation history
    pub const MESSAGES: &str = "messages";
    /// Number of completed tool round-trips in the current run
    pub const TOOL_ROUNDS: &str = "tool_rounds";
    pub const NEWS_DATA: &str = "news_data";
    pub const SUMMARY: &str = "summary";
    pub const FREQUENCY: &str = "frequency";
    pub const FILENAME: &str = "filename";
    /// `"no_articles"` or `"empty_summary"` when summarizing had nothing to say
    pub const NEWS_STATUS: &str = "news_status";
    /// Set when the summary could not be written; the run still succeeds
    pub const PERSISTENCE_WARNING: &str = "persistence_warning";
}

/// Shared record threaded through a run
///
/// `messages` is append-only: merging concatenates. Every other field is
/// last-write-wins. A partial update returned by a node is itself a `State`,
/// so updates compose with the same [`merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(default, flatten)]
    fields: BTreeMap<String, Value>,
}

/// Merge `partial` into `base`, returning a new state
///
/// `messages` become `base.messages ++ partial.messages`; any other key present
/// in `partial` replaces the value in `base`; absent keys are carried over.
pub fn merge(base: &State, partial: &State) -> State {
    let mut result = base.clone();
    result.apply(partial.clone());
    result
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            fields: BTreeMap::new(),
        }
    }

    /// Same as [`merge`], as a method
    pub fn merged(&self, partial: &State) -> State {
        merge(self, partial)
    }

    /// In-place merge, consuming the partial update
    pub fn apply(&mut self, partial: State) {
        self.messages.extend(partial.messages);
        self.fields.extend(partial.fields);
    }

    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a non-message field
    ///
    /// The `messages` key is reserved; writes to it are dropped.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if key == keys::MESSAGES {
            tracing::warn!("Ignoring write to reserved state key '{}'", keys::MESSAGES);
            return;
        }
        self.fields.insert(key, value.into());
    }

    /// Serialize any value into a field
    pub fn set_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.set(key, value);
        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Deserialize a field; `Ok(None)` when the key is absent
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        self.fields
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.fields.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool calls of the last message, if it is an assistant turn requesting tools
    pub fn pending_tool_calls(&self) -> &[ToolCallRequest] {
        self.last_message().map(Message::tool_calls).unwrap_or(&[])
    }

    pub fn has_pending_tool_calls(&self) -> bool {
        !self.pending_tool_calls().is_empty()
    }

    /// Content of the most recent user message
    pub fn latest_user_text(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::User { content } => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn tool_rounds(&self) -> u32 {
        self.fields
            .get(keys::TOOL_ROUNDS)
            .and_then(Value::as_u64)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }
}
