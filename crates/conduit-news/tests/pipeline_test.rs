use async_trait::async_trait;
use conduit_graph::{keys, Executor, GraphConfig, GraphError, State};
use conduit_llm::{EchoChatModel, Message, MockChatModel};
use conduit_news::{
    Article, MockSearchClient, NewsPipeline, PersistError, PersistenceSink, TimeWindow,
    FETCH_NODE, NO_ARTICLES_FOUND, PERSIST_NODE, SUMMARIZE_NODE,
};
use futures::StreamExt;
use std::path::Path;
use std::sync::Arc;

struct RejectingSink;

#[async_trait]
impl PersistenceSink for RejectingSink {
    async fn write(&self, _path: &Path, _content: &str) -> Result<(), PersistError> {
        Err(PersistError::Rejected("disk is read-only".to_string()))
    }
}

fn three_articles() -> Vec<Article> {
    vec![
        Article::new("Open model tops benchmark", "https://a.example", "A new open model...")
            .with_published_date("2024-06-03"),
        Article::new("Chip maker unveils accelerator", "https://b.example", "The accelerator...")
            .with_published_date("2024-06-02"),
        Article::new("Regulators publish AI guidance", "https://c.example", "Guidance covers...")
            .with_published_date("2024-06-01"),
    ]
}

fn executor(pipeline: NewsPipeline) -> Executor {
    Executor::new(Arc::new(pipeline.build().unwrap()), GraphConfig::default())
}

#[tokio::test]
async fn test_summary_mentions_every_title() {
    let dir = tempfile::tempdir().unwrap();
    let search = Arc::new(MockSearchClient::new(three_articles()));
    let pipeline = NewsPipeline::new(search.clone(), Arc::new(EchoChatModel))
        .with_output_dir(dir.path().join("AINews"));

    let state = executor(pipeline)
        .run(State::new().with_message(Message::user("Weekly")))
        .await
        .unwrap();

    let summary = state.get_str(keys::SUMMARY).unwrap();
    assert!(!summary.is_empty());
    for article in three_articles() {
        assert!(summary.contains(&article.title), "missing {}", article.title);
    }

    assert_eq!(state.get_str(keys::FREQUENCY), Some("weekly"));
    assert_eq!(search.queries()[0].time_window, TimeWindow::Weekly);

    let expected = dir.path().join("AINews").join("weekly_summary.md");
    assert_eq!(state.get_str(keys::FILENAME), Some(expected.display().to_string().as_str()));
    let written = tokio::fs::read_to_string(&expected).await.unwrap();
    assert_eq!(written, summary);
}

#[tokio::test]
async fn test_no_articles_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(MockChatModel::new());
    let pipeline = NewsPipeline::new(Arc::new(MockSearchClient::new(vec![])), model.clone())
        .with_output_dir(dir.path());

    let state = executor(pipeline)
        .run(State::new().with_message(Message::user("daily")))
        .await
        .unwrap();

    assert_eq!(state.get_str(keys::SUMMARY), Some(NO_ARTICLES_FOUND));
    assert_eq!(state.get_str(keys::NEWS_STATUS), Some("no_articles"));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_unrecognized_window_behaves_as_daily() {
    let dir = tempfile::tempdir().unwrap();
    let search = Arc::new(MockSearchClient::new(three_articles()));
    let pipeline = NewsPipeline::new(search.clone(), Arc::new(EchoChatModel))
        .with_output_dir(dir.path());

    let state = executor(pipeline)
        .run(State::new().with_message(Message::user("unrecognized")))
        .await
        .unwrap();

    assert_eq!(search.queries()[0].time_window, TimeWindow::Daily);
    assert_eq!(state.get_str(keys::FREQUENCY), Some("daily"));
    assert!(dir.path().join("daily_summary.md").exists());
}

#[tokio::test]
async fn test_sink_failure_keeps_summary() {
    let pipeline = NewsPipeline::new(
        Arc::new(MockSearchClient::new(three_articles())),
        Arc::new(EchoChatModel),
    )
    .with_sink(Arc::new(RejectingSink));

    let state = executor(pipeline)
        .run(State::new().with_message(Message::user("monthly")))
        .await
        .unwrap();

    assert!(!state.get_str(keys::SUMMARY).unwrap_or_default().is_empty());
    assert!(state
        .get_str(keys::PERSISTENCE_WARNING)
        .unwrap()
        .contains("read-only"));
    assert!(!state.contains(keys::FILENAME));
}

#[tokio::test]
async fn test_search_failure_names_fetch_node() {
    let pipeline = NewsPipeline::new(
        Arc::new(MockSearchClient::failing("rate limited")),
        Arc::new(EchoChatModel),
    )
    .with_sink(Arc::new(RejectingSink));

    let err = executor(pipeline)
        .run(State::new().with_message(Message::user("daily")))
        .await
        .unwrap_err();

    assert!(matches!(&err, GraphError::Node { node, .. } if node == FETCH_NODE));
    assert!(err.is_provider_failure());
}

#[tokio::test]
async fn test_stream_runs_each_stage_once() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = NewsPipeline::new(
        Arc::new(MockSearchClient::new(three_articles())),
        Arc::new(EchoChatModel),
    )
    .with_output_dir(dir.path());

    let nodes: Vec<String> = executor(pipeline)
        .stream(State::new().with_message(Message::user("yearly")))
        .map(|item| item.unwrap().node)
        .collect()
        .await;

    assert_eq!(nodes, vec![FETCH_NODE, SUMMARIZE_NODE, PERSIST_NODE]);
}

#[test]
fn test_topology() {
    let graph = NewsPipeline::new(Arc::new(MockSearchClient::default()), Arc::new(EchoChatModel))
        .build()
        .unwrap();

    assert_eq!(graph.entry(), FETCH_NODE);
    assert!(graph
        .to_mermaid()
        .contains("summarize_ai_news --> save_ai_results;"));
}
