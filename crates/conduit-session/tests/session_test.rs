use conduit_graph::GraphError;
use conduit_llm::{AssistantMessage, EchoChatModel, Message, MockChatModel, ToolCallRequest};
use conduit_news::{Article, MockSearchClient};
use conduit_session::{
    ConversationEntry, GraphParts, PresentationError, Role, Session, SessionError, UseCase,
};
use serde_json::json;
use std::sync::Arc;

fn news_articles() -> Vec<Article> {
    vec![
        Article::new("Model release", "https://a.example", "A model shipped")
            .with_published_date("2024-07-02"),
        Article::new("Funding round", "https://b.example", "A lab raised money")
            .with_published_date("2024-07-01"),
    ]
}

#[tokio::test]
async fn test_chatbot_replays_history() {
    let model = Arc::new(MockChatModel::with_replies([
        AssistantMessage::text("Hello Ana"),
        AssistantMessage::text("Your name is Ana"),
    ]));
    let mut session = Session::new(GraphParts::new(model.clone()), "mock");

    let first = session.submit(UseCase::Chatbot, "I am Ana").await.unwrap();
    assert_eq!(
        first,
        vec![ConversationEntry::user("I am Ana"), ConversationEntry::assistant("Hello Ana")]
    );

    session.submit(UseCase::Chatbot, "What is my name?").await.unwrap();

    let second_request = &model.requests()[1];
    assert_eq!(
        second_request.messages,
        vec![
            Message::user("I am Ana"),
            Message::assistant("Hello Ana"),
            Message::user("What is my name?"),
        ]
    );
    assert_eq!(session.history(UseCase::Chatbot).len(), 4);
    assert!(session.history(UseCase::ChatbotWithWebSearch).is_empty());
}

#[tokio::test]
async fn test_web_search_turn_streams_entries() {
    let call = ToolCallRequest::from_value("call_1", "web_search", json!({"query": "rust release"}));
    let model = Arc::new(MockChatModel::with_replies([
        AssistantMessage::with_tool_calls(vec![call.clone()]),
        AssistantMessage::text("Rust shipped a release."),
        AssistantMessage::text("You asked about Rust."),
    ]));
    let search = Arc::new(MockSearchClient::new(news_articles()));
    let parts = GraphParts::new(model.clone()).with_search(search);
    let mut session = Session::new(parts, "mock");

    let mut streamed = Vec::new();
    let added = session
        .submit_with(UseCase::ChatbotWithWebSearch, "news about rust?", |entry| {
            streamed.push(entry.clone())
        })
        .await
        .unwrap();

    assert_eq!(streamed.len(), 3);
    assert_eq!(added.len(), 4);
    assert_eq!(added[1].role, Role::Assistant);
    assert_eq!(added[1].content, "");
    assert!(!added[1].is_rendered());
    assert_eq!(added[2].role, Role::Tool);
    assert_eq!(added[2].call_id.as_deref(), Some("call_1"));
    assert!(added[2].content.contains("**Model release**"));
    assert_eq!(added[3], ConversationEntry::assistant("Rust shipped a release."));

    session
        .submit(UseCase::ChatbotWithWebSearch, "what did I ask?")
        .await
        .unwrap();
    let replayed = &model.requests()[2].messages;
    assert_eq!(replayed[1].tool_calls(), &[call]);
    assert!(matches!(&replayed[2], Message::Tool { call_id, .. } if call_id == "call_1"));
}

#[tokio::test]
async fn test_failed_turn_leaves_history() {
    let model = Arc::new(MockChatModel::with_replies([AssistantMessage::text("first")]));
    model.push_failure("provider down");
    let mut session = Session::new(GraphParts::new(model), "mock");

    session.submit(UseCase::Chatbot, "one").await.unwrap();
    let err = session.submit(UseCase::Chatbot, "two").await.unwrap_err();

    assert!(matches!(&err, SessionError::Graph(e) if e.is_provider_failure()));
    assert_eq!(session.history(UseCase::Chatbot).len(), 2);
}

#[tokio::test]
async fn test_news_turn_adds_summary_and_document() {
    let dir = tempfile::tempdir().unwrap();
    let parts = GraphParts::new(Arc::new(EchoChatModel))
        .with_search(Arc::new(MockSearchClient::new(news_articles())))
        .with_output_dir(dir.path());
    let mut session = Session::new(parts, "echo");

    assert!(session.latest_summary_document().is_none());
    let added = session.submit(UseCase::AiNewsSummarizer, "Weekly").await.unwrap();

    assert_eq!(added[0], ConversationEntry::user("Fetching Weekly Latest AI News"));
    assert_eq!(added[1].role, Role::Assistant);
    assert!(added[1].content.contains("Model release"));
    assert!(dir.path().join("weekly_summary.md").exists());

    let document = session.latest_summary_document().unwrap();
    assert_eq!(document.file_name, "ai_news_summary.md");
    assert_eq!(document.mime, "text/markdown");
    assert_eq!(document.body, added[1].content);
}

#[tokio::test]
async fn test_unrecognized_window_is_recorded_as_daily() {
    let dir = tempfile::tempdir().unwrap();
    let parts = GraphParts::new(Arc::new(EchoChatModel))
        .with_search(Arc::new(MockSearchClient::new(news_articles())))
        .with_output_dir(dir.path());
    let mut session = Session::new(parts, "echo");

    let added = session.submit(UseCase::AiNewsSummarizer, "unrecognized").await.unwrap();

    assert_eq!(added[0], ConversationEntry::user("Fetching Daily Latest AI News"));
    assert!(dir.path().join("daily_summary.md").exists());
    assert_eq!(session.history(UseCase::AiNewsSummarizer)[0], added[0]);
}

#[tokio::test]
async fn test_empty_summary_is_presentation_error() {
    let dir = tempfile::tempdir().unwrap();
    let parts = GraphParts::new(Arc::new(MockChatModel::with_replies([AssistantMessage::text("")])))
        .with_search(Arc::new(MockSearchClient::new(news_articles())))
        .with_output_dir(dir.path());
    let mut session = Session::new(parts, "mock");

    let err = session.submit(UseCase::AiNewsSummarizer, "daily").await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Presentation(PresentationError::MissingSummary { .. })
    ));
    assert!(session.history(UseCase::AiNewsSummarizer).is_empty());
    assert!(session.latest_summary_document().is_none());
}

#[tokio::test]
async fn test_model_change_rebuilds_graph() {
    let mut session = Session::new(GraphParts::new(Arc::new(EchoChatModel)), "openai_gpt");

    let first = session.graph(UseCase::Chatbot).unwrap();
    let same = session.graph(UseCase::Chatbot).unwrap();
    assert!(Arc::ptr_eq(&first, &same));

    session.set_model(Arc::new(EchoChatModel), "groq_llama");
    let rebuilt = session.graph(UseCase::Chatbot).unwrap();
    assert!(!Arc::ptr_eq(&first, &rebuilt));
}

#[tokio::test]
async fn test_search_use_cases_need_search_client() {
    let mut session = Session::new(GraphParts::new(Arc::new(EchoChatModel)), "echo");

    let err = session
        .submit(UseCase::ChatbotWithWebSearch, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::MissingSearch(_)));
}

#[tokio::test]
async fn test_unknown_tool_surfaces_routing_error() {
    let model = Arc::new(MockChatModel::with_replies([AssistantMessage::with_tool_calls(vec![
        ToolCallRequest::from_value("c1", "calculator", json!({})),
    ])]));
    let parts = GraphParts::new(model).with_search(Arc::new(MockSearchClient::default()));
    let mut session = Session::new(parts, "mock");

    let err = session
        .submit(UseCase::ChatbotWithWebSearch, "2+2")
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Graph(GraphError::Routing { .. })));
    assert!(session.history(UseCase::ChatbotWithWebSearch).is_empty());
}
