// OpenAI-compatible chat completions client (OpenAI, Groq, Gemini)

use crate::config::{LLMConfig, Provider};
use crate::error::{ProviderError, Result};
use crate::traits::{ChatModel, ChatOptions, ChatRequest};
use crate::types::{AssistantMessage, Message, ToolCallRequest, ToolSpec};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Chat client (HTTP direct, no SDK)
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
    provider: Provider,
    model: String,
    defaults: ChatOptions,
    timeout: Duration,
}

impl OpenAIClient {
    /// Create client for a provider preset with API key
    pub fn new(config: &LLMConfig, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| ProviderError::Config("Invalid API key format".to_string()))?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        let mut defaults = ChatOptions::new();
        defaults.temperature = config.temperature;
        defaults.max_tokens = config.max_tokens;

        Ok(Self {
            http_client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            provider: config.provider,
            model: config.model.clone(),
            defaults,
            timeout,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Build chat completion request payload
    fn build_chat_request(&self, request: ChatRequest) -> Value {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(prompt) = &request.options.system_prompt {
            messages.push(json!({ "role": "system", "content": prompt }));
        }
        messages.extend(request.messages.iter().map(convert_message));

        let mut payload = Map::new();
        payload.insert("model".to_string(), json!(self.model));
        payload.insert("messages".to_string(), Value::Array(messages));

        let temperature = request.options.temperature.or(self.defaults.temperature);
        if let Some(temp) = temperature {
            payload.insert("temperature".to_string(), json!(temp));
        }
        let max_tokens = request.options.max_tokens.or(self.defaults.max_tokens);
        if let Some(max_tokens) = max_tokens {
            payload.insert("max_tokens".to_string(), json!(max_tokens));
        }
        if !request.options.tools.is_empty() {
            let tools: Vec<Value> = request.options.tools.iter().map(convert_tool).collect();
            payload.insert("tools".to_string(), Value::Array(tools));
            payload.insert("tool_choice".to_string(), json!("auto"));
        }

        Value::Object(payload)
    }

    fn map_send_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Http(error)
        }
    }
}

/// Convert our Message type to the chat completions format
fn convert_message(message: &Message) -> Value {
    match message {
        Message::User { content } => json!({
            "role": "user",
            "content": content,
        }),
        Message::Assistant(assistant) => {
            let mut obj = Map::new();
            obj.insert("role".to_string(), json!("assistant"));
            obj.insert("content".to_string(), json!(assistant.content));
            if assistant.has_tool_calls() {
                let calls: Vec<Value> = assistant
                    .tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "id": call.call_id,
                            "type": "function",
                            "function": {
                                "name": call.tool_name,
                                "arguments": Value::Object(call.arguments.clone()).to_string(),
                            }
                        })
                    })
                    .collect();
                obj.insert("tool_calls".to_string(), Value::Array(calls));
            }
            Value::Object(obj)
        }
        Message::Tool { content, call_id } => json!({
            "role": "tool",
            "tool_call_id": call_id,
            "content": content,
        }),
    }
}

fn convert_tool(tool: &ToolSpec) -> Value {
    json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }
    })
}

/// Convert a raw chat completion into an assistant message
fn parse_chat_response(raw: ChatCompletionResponse) -> Result<AssistantMessage> {
    let choice = raw
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("Response contained no choices".to_string()))?;

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| -> Result<ToolCallRequest> {
            let arguments = if call.function.arguments.trim().is_empty() {
                Value::Object(Map::new())
            } else {
                serde_json::from_str(&call.function.arguments).map_err(|e| {
                    ProviderError::InvalidResponse(format!(
                        "Tool call '{}' has malformed arguments: {}",
                        call.function.name, e
                    ))
                })?
            };
            Ok(ToolCallRequest::from_value(call.id, call.function.name, arguments))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AssistantMessage {
        content: choice.message.content.unwrap_or_default(),
        tool_calls,
    })
}

#[async_trait]
impl ChatModel for OpenAIClient {
    async fn invoke(&self, request: ChatRequest) -> Result<AssistantMessage> {
        let payload = self.build_chat_request(request);

        tracing::debug!(provider = %self.provider, model = %self.model, "Sending chat completion request");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: self.provider.to_string(),
                status,
                body,
            });
        }

        let raw: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        parse_chat_response(raw)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// CHAT COMPLETIONS RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<RawToolCall>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawToolCall {
    id: String,
    function: RawFunctionCall,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}
