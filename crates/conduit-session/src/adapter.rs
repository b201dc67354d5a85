use crate::entry::ConversationEntry;
use crate::error::PresentationError;
use conduit_graph::{keys, NodeUpdate, State};
use conduit_llm::Message;

/// Map messages to entries, one per message, in order
///
/// Every assistant message yields an entry, even a silent one that only
/// requests tools.
pub fn entries_from_messages(messages: &[Message]) -> Vec<ConversationEntry> {
    messages.iter().map(entry_from_message).collect()
}

fn entry_from_message(message: &Message) -> ConversationEntry {
    match message {
        Message::User { content } => ConversationEntry::user(content.clone()),
        Message::Assistant(assistant) => ConversationEntry::assistant(assistant.content.clone())
            .with_tool_calls(assistant.tool_calls.clone()),
        Message::Tool { content, call_id } => ConversationEntry::tool(call_id.clone(), content.clone()),
    }
}

/// Accumulates entries from streamed node updates
#[derive(Debug, Default)]
pub struct EntryFolder {
    entries: Vec<ConversationEntry>,
}

impl EntryFolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one update; returns the entries it added
    pub fn push_update(&mut self, update: &NodeUpdate) -> &[ConversationEntry] {
        let start = self.entries.len();
        self.entries.extend(entries_from_messages(&update.update.messages));
        &self.entries[start..]
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ConversationEntry> {
        self.entries
    }
}

/// Entries for the messages a run appended to `initial`
pub fn fold_state(initial: &State, final_state: &State) -> Vec<ConversationEntry> {
    let start = initial.messages.len().min(final_state.messages.len());
    entries_from_messages(&final_state.messages[start..])
}

/// The news pipeline's summary as a single assistant entry
pub fn summary_entry(state: &State) -> Result<ConversationEntry, PresentationError> {
    match state.get_str(keys::SUMMARY).map(str::trim) {
        Some(summary) if !summary.is_empty() => Ok(ConversationEntry::assistant(summary)),
        _ => Err(PresentationError::MissingSummary {
            status: state.get_str(keys::NEWS_STATUS).map(str::to_string),
        }),
    }
}
