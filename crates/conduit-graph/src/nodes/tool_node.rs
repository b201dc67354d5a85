use crate::error::NodeError;
use crate::node::{Node, NodeKind};
use crate::state::{keys, State};
use crate::tools::ToolRegistry;
use async_trait::async_trait;
use conduit_llm::Message;
use std::sync::Arc;
use std::time::Instant;

/// Executes every tool call requested by the last assistant turn
///
/// Calls run in request order and each result is appended as a tool message
/// carrying the originating `call_id`. The update also bumps the
/// `tool_rounds` counter. Any failing tool fails the node.
pub struct ToolNode {
    registry: Arc<ToolRegistry>,
}

impl ToolNode {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

#[async_trait]
impl Node for ToolNode {
    async fn apply(&self, state: &State) -> Result<State, NodeError> {
        let tool_calls = state.pending_tool_calls();

        if tool_calls.is_empty() {
            tracing::warn!("Tool node reached without pending tool calls");
            return Ok(State::new());
        }

        let mut update = State::new();

        for call in tool_calls {
            let tool = self
                .registry
                .get(&call.tool_name)
                .ok_or_else(|| NodeError::UnknownTool(call.tool_name.clone()))?;

            let start = Instant::now();
            let output = tool
                .call(&call.arguments)
                .await
                .map_err(|source| NodeError::Tool {
                    tool: call.tool_name.clone(),
                    source,
                })?;

            tracing::debug!(
                tool = %call.tool_name,
                call_id = %call.call_id,
                duration_ms = start.elapsed().as_millis() as u64,
                "Tool call completed"
            );

            update = update.with_message(Message::tool_result(call.call_id.clone(), output));
        }

        Ok(update.with_field(keys::TOOL_ROUNDS, state.tool_rounds() + 1))
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Tool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::tools::FnTool;
    use conduit_llm::{AssistantMessage, ToolCallRequest, ToolSpec};
    use serde_json::{json, Map, Value};

    fn registry() -> Arc<ToolRegistry> {
        let upper = FnTool::new(
            ToolSpec::new("upper", "Uppercase text", json!({"type": "object"})),
            |args: &Map<String, Value>| {
                args.get("text")
                    .and_then(Value::as_str)
                    .map(str::to_uppercase)
                    .ok_or_else(|| ToolError::InvalidArguments("missing 'text'".to_string()))
            },
        );
        Arc::new(ToolRegistry::new().with_tool(upper))
    }

    fn call(id: &str, tool: &str, text: &str) -> ToolCallRequest {
        ToolCallRequest::from_value(id, tool, json!({ "text": text }))
    }

    #[tokio::test]
    async fn test_answers_each_call_in_order() {
        let state = State::new()
            .with_message(Message::user("shout"))
            .with_message(AssistantMessage::with_tool_calls(vec![
                call("a", "upper", "one"),
                call("b", "upper", "two"),
            ]));

        let update = ToolNode::new(registry()).apply(&state).await.unwrap();

        assert_eq!(
            update.messages,
            vec![Message::tool_result("a", "ONE"), Message::tool_result("b", "TWO")]
        );
        assert_eq!(update.tool_rounds(), 1);
    }

    #[tokio::test]
    async fn test_counts_rounds_from_state() {
        let state = State::new()
            .with_field(keys::TOOL_ROUNDS, 2)
            .with_message(AssistantMessage::with_tool_calls(vec![call("a", "upper", "x")]));

        let update = ToolNode::new(registry()).apply(&state).await.unwrap();
        assert_eq!(update.tool_rounds(), 3);
    }

    #[tokio::test]
    async fn test_no_pending_calls_is_empty_update() {
        let state = State::new().with_message(Message::assistant("done"));
        let update = ToolNode::new(registry()).apply(&state).await.unwrap();
        assert!(update.is_empty());
    }

    #[tokio::test]
    async fn test_tool_failure_fails_node() {
        let state = State::new().with_message(AssistantMessage::with_tool_calls(vec![
            ToolCallRequest::from_value("a", "upper", json!({})),
        ]));

        let err = ToolNode::new(registry()).apply(&state).await.unwrap_err();
        assert!(matches!(err, NodeError::Tool { ref tool, .. } if tool == "upper"));
    }

    #[tokio::test]
    async fn test_unregistered_tool_fails_node() {
        let state = State::new().with_message(AssistantMessage::with_tool_calls(vec![call(
            "a", "missing", "x",
        )]));

        let err = ToolNode::new(registry()).apply(&state).await.unwrap_err();
        assert!(matches!(err, NodeError::UnknownTool(name) if name == "missing"));
    }
}
