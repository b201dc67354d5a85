use crate::error::RoutingError;
use crate::state::State;
use conduit_llm::Message;
use std::collections::BTreeSet;
use std::fmt;

/// Name of the terminal sentinel when a route is given as a string
pub const END: &str = "__end__";

/// Target of an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Route {
    Node(String),
    End,
}

impl Route {
    pub fn node(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == END {
            Route::End
        } else {
            Route::Node(name)
        }
    }
}

impl From<&str> for Route {
    fn from(name: &str) -> Self {
        Route::node(name)
    }
}

impl From<String> for Route {
    fn from(name: String) -> Self {
        Route::node(name)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Node(name) => f.write_str(name),
            Route::End => f.write_str(END),
        }
    }
}

/// Decides which node executes next after a conditional edge
pub trait Router: Send + Sync {
    fn route(&self, state: &State) -> Result<Route, RoutingError>;

    /// Every route this router may return; checked when the graph compiles
    fn targets(&self) -> Vec<Route>;
}

/// Router backed by a closure with declared targets
pub struct FnRouter<F> {
    f: F,
    targets: Vec<Route>,
}

impl<F> FnRouter<F>
where
    F: Fn(&State) -> Result<Route, RoutingError> + Send + Sync,
{
    pub fn new(targets: impl IntoIterator<Item = Route>, f: F) -> Self {
        Self {
            f,
            targets: targets.into_iter().collect(),
        }
    }
}

impl<F> Router for FnRouter<F>
where
    F: Fn(&State) -> Result<Route, RoutingError> + Send + Sync,
{
    fn route(&self, state: &State) -> Result<Route, RoutingError> {
        let route = (self.f)(state)?;
        if !self.targets.contains(&route) {
            return Err(RoutingError::UnknownTarget(route.to_string()));
        }
        Ok(route)
    }

    fn targets(&self) -> Vec<Route> {
        self.targets.clone()
    }
}

/// Router implementing the tool-calling loop:
/// model -> tools (if the last assistant turn requests tools) -> model -> END
pub struct ToolsRouter {
    tool_node: String,
    tools: BTreeSet<String>,
    max_tool_rounds: Option<u32>,
}

impl ToolsRouter {
    pub fn new(tool_node: impl Into<String>, tools: impl IntoIterator<Item = String>) -> Self {
        Self {
            tool_node: tool_node.into(),
            tools: tools.into_iter().collect(),
            max_tool_rounds: None,
        }
    }

    /// Fail the run once this many tool round-trips have completed
    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = Some(max);
        self
    }
}

impl Router for ToolsRouter {
    fn route(&self, state: &State) -> Result<Route, RoutingError> {
        let assistant = match state.last_message() {
            Some(Message::Assistant(assistant)) if assistant.has_tool_calls() => assistant,
            Some(Message::Assistant(_)) | Some(Message::User { .. }) | Some(Message::Tool { .. }) | None => {
                return Ok(Route::End)
            }
        };

        if let Some(max) = self.max_tool_rounds {
            if state.tool_rounds() >= max {
                return Err(RoutingError::ToolRoundLimit(max));
            }
        }

        if let Some(call) = assistant
            .tool_calls
            .iter()
            .find(|call| !self.tools.contains(&call.tool_name))
        {
            return Err(RoutingError::UnknownTool {
                tool: call.tool_name.clone(),
                call_id: call.call_id.clone(),
            });
        }

        tracing::debug!(
            calls = assistant.tool_calls.len(),
            target = %self.tool_node,
            "Routing to tool node"
        );
        Ok(Route::Node(self.tool_node.clone()))
    }

    fn targets(&self) -> Vec<Route> {
        vec![Route::Node(self.tool_node.clone()), Route::End]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keys;
    use conduit_llm::{AssistantMessage, ToolCallRequest};
    use serde_json::json;

    fn router() -> ToolsRouter {
        ToolsRouter::new("tools", vec!["web_search".to_string()])
    }

    fn requesting(tool: &str) -> State {
        let call = ToolCallRequest::from_value("c1", tool, json!({}));
        State::from_messages(vec![
            Message::user("q"),
            Message::Assistant(AssistantMessage::with_tool_calls(vec![call])),
        ])
    }

    #[test]
    fn test_routes_to_tools_when_calls_pending() {
        assert_eq!(router().route(&requesting("web_search")), Ok(Route::node("tools")));
    }

    #[test]
    fn test_routes_to_end_on_plain_answer() {
        let state = State::from_messages(vec![Message::user("q"), Message::assistant("a")]);
        assert_eq!(router().route(&state), Ok(Route::End));
        assert_eq!(router().route(&State::new()), Ok(Route::End));
    }

    #[test]
    fn test_unknown_tool_is_routing_error() {
        assert_eq!(
            router().route(&requesting("calculator")),
            Err(RoutingError::UnknownTool {
                tool: "calculator".to_string(),
                call_id: "c1".to_string(),
            })
        );
    }

    #[test]
    fn test_round_limit() {
        let router = router().with_max_tool_rounds(2);
        let mut state = requesting("web_search");
        state.set(keys::TOOL_ROUNDS, 1);
        assert!(router.route(&state).is_ok());

        state.set(keys::TOOL_ROUNDS, 2);
        assert_eq!(router.route(&state), Err(RoutingError::ToolRoundLimit(2)));
    }

    #[test]
    fn test_end_sentinel_string() {
        assert_eq!(Route::from(END), Route::End);
        assert_eq!(Route::End.to_string(), END);
    }

    #[test]
    fn test_fn_router_rejects_undeclared_target() {
        let router = FnRouter::new([Route::End], |_state: &State| Ok(Route::node("elsewhere")));
        assert_eq!(
            router.route(&State::new()),
            Err(RoutingError::UnknownTarget("elsewhere".to_string()))
        );
    }
}
