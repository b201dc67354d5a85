use crate::error::{ProviderError, Result};
use crate::traits::{ChatModel, ChatRequest};
use crate::types::{AssistantMessage, Message};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock chat model for testing
///
/// Replays scripted replies in order and records every request it receives.
#[derive(Default)]
pub struct MockChatModel {
    replies: Mutex<VecDeque<std::result::Result<AssistantMessage, String>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = AssistantMessage>) -> Self {
        let model = Self::new();
        for reply in replies {
            model.push_reply(reply);
        }
        model
    }

    pub fn push_reply(&self, reply: AssistantMessage) {
        self.lock_replies().push_back(Ok(reply));
    }

    /// Next invocation fails with `ProviderError::Unavailable`
    pub fn push_failure(&self, message: impl Into<String>) {
        self.lock_replies().push_back(Err(message.into()));
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn lock_replies(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<std::result::Result<AssistantMessage, String>>> {
        self.replies.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn invoke(&self, request: ChatRequest) -> Result<AssistantMessage> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        match self.lock_replies().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ProviderError::Unavailable(message)),
            None => Err(ProviderError::Unavailable("No scripted reply left".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// Model that answers with the text of the latest user message
pub struct EchoChatModel;

#[async_trait]
impl ChatModel for EchoChatModel {
    async fn invoke(&self, request: ChatRequest) -> Result<AssistantMessage> {
        let text = request
            .messages
            .iter()
            .rev()
            .find_map(|m| match m {
                Message::User { content } => Some(content.clone()),
                _ => None,
            })
            .unwrap_or_default();
        Ok(AssistantMessage::text(text))
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}
