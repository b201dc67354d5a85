use conduit_llm::{AssistantMessage, Message, ToolCallRequest, ToolSpec};
use serde_json::json;

#[test]
fn test_message_roles() {
    assert_eq!(Message::user("Hello").role(), "user");
    assert_eq!(Message::assistant("Hi there!").role(), "assistant");
    assert_eq!(Message::tool_result("call_123", "42").role(), "tool");
}

#[test]
fn test_silent_assistant_turn() {
    let call = ToolCallRequest::from_value("x", "web_search", json!({}));
    let message = AssistantMessage::with_tool_calls(vec![call]);

    assert!(message.is_silent());
    assert!(message.has_tool_calls());
    assert_eq!(Message::from(message).content(), "");
}

#[test]
fn test_tool_calls_only_on_assistant() {
    assert!(Message::user("hi").tool_calls().is_empty());
    assert!(Message::tool_result("a", "b").tool_calls().is_empty());

    let call = ToolCallRequest::from_value("a", "web_search", json!({"query": "q"}));
    let message = Message::Assistant(AssistantMessage::with_tool_calls(vec![call.clone()]));
    assert_eq!(message.tool_calls(), &[call]);
}

#[test]
fn test_message_serialization_user() {
    let json = serde_json::to_string(&Message::user("Hello")).unwrap();
    assert!(json.contains("\"role\":\"user\""));
    assert!(json.contains("Hello"));
}

#[test]
fn test_message_deserialization_assistant_without_tool_calls() {
    let json = r#"{"role":"assistant","content":"Done"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg, Message::assistant("Done"));
}

#[test]
fn test_tool_message_deserialization() {
    let json = r#"{"role":"tool","content":"42","call_id":"call_1"}"#;
    let msg: Message = serde_json::from_str(json).unwrap();
    assert_eq!(msg, Message::tool_result("call_1", "42"));
}

#[test]
fn test_non_object_arguments_are_dropped() {
    let call = ToolCallRequest::from_value("a", "web_search", json!("not an object"));
    assert!(call.arguments.is_empty());
}

#[test]
fn test_parse_arguments() {
    #[derive(serde::Deserialize)]
    struct Args {
        query: String,
    }

    let call = ToolCallRequest::from_value("a", "web_search", json!({"query": "rust"}));
    let args: Args = call.parse_arguments().unwrap();
    assert_eq!(args.query, "rust");
}

#[test]
fn test_tool_spec_creation() {
    let spec = ToolSpec::new("web_search", "Search the web", json!({"type": "object"}));
    assert_eq!(spec.name, "web_search");
    assert_eq!(spec.parameters["type"], "object");
}
