use crate::adapter::{summary_entry, EntryFolder};
use crate::cache::GraphCache;
use crate::config::AppConfig;
use crate::document::Document;
use crate::entry::ConversationEntry;
use crate::error::Result;
use crate::history::messages_from_entries;
use crate::use_case::{GraphParts, UseCase};
use conduit_graph::{keys, Executor, Graph, GraphConfig, State};
use conduit_llm::{ChatModel, ClientFactory, Message};
use conduit_news::{SearchClient, TavilyClient, TimeWindow};
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;

/// One user's conversations, one history per use case
///
/// Each `submit` is one run. A failed run leaves history untouched.
pub struct Session {
    parts: GraphParts,
    fingerprint: String,
    graph_config: GraphConfig,
    default_window: TimeWindow,
    cache: GraphCache,
    histories: HashMap<UseCase, Vec<ConversationEntry>>,
    latest_summary: Option<String>,
}

impl Session {
    /// `fingerprint` identifies the model configuration behind `parts.model`
    pub fn new(parts: GraphParts, fingerprint: impl Into<String>) -> Self {
        Self {
            parts,
            fingerprint: fingerprint.into(),
            graph_config: GraphConfig::default(),
            default_window: TimeWindow::Daily,
            cache: GraphCache::new(),
            histories: HashMap::new(),
            latest_summary: None,
        }
    }

    pub fn with_graph_config(mut self, config: GraphConfig) -> Self {
        self.parts.max_tool_rounds = config.max_tool_rounds;
        self.graph_config = config;
        self
    }

    pub fn with_default_window(mut self, window: TimeWindow) -> Self {
        self.default_window = window;
        self
    }

    /// Create clients from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let model = ClientFactory::create_client(&config.llm, &config.llm_api_key)?;

        let mut parts = GraphParts::new(model).with_output_dir(config.news.output_dir.clone());
        match config.tavily_api_key.as_deref() {
            Some(key) => {
                let search: Arc<dyn SearchClient> = Arc::new(TavilyClient::new(key)?);
                parts = parts.with_search(search);
            }
            None => tracing::warn!("TAVILY_API_KEY not set, web search and news are unavailable"),
        }

        Ok(Self::new(parts, config.llm.fingerprint(&config.llm_api_key))
            .with_graph_config(config.graph.clone())
            .with_default_window(TimeWindow::parse_or_daily(&config.news.time_window)))
    }

    /// Swap the model; graphs are rebuilt lazily on the next turn
    pub fn set_model(&mut self, model: Arc<dyn ChatModel>, fingerprint: impl Into<String>) {
        self.parts.model = model;
        self.fingerprint = fingerprint.into();
    }

    pub fn history(&self, use_case: UseCase) -> &[ConversationEntry] {
        self.histories.get(&use_case).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear_history(&mut self, use_case: UseCase) {
        self.histories.remove(&use_case);
    }

    pub fn graph(&mut self, use_case: UseCase) -> Result<Arc<Graph>> {
        let parts = &self.parts;
        self.cache
            .get_or_build(use_case, &self.fingerprint, || use_case.build_graph(parts))
    }

    /// Run one turn and return the entries it added to history
    pub async fn submit(&mut self, use_case: UseCase, input: &str) -> Result<Vec<ConversationEntry>> {
        self.submit_with(use_case, input, |_| {}).await
    }

    /// Like [`submit`](Self::submit), calling `on_entry` as soon as each entry is known
    pub async fn submit_with<F>(
        &mut self,
        use_case: UseCase,
        input: &str,
        mut on_entry: F,
    ) -> Result<Vec<ConversationEntry>>
    where
        F: FnMut(&ConversationEntry) + Send,
    {
        let graph = self.graph(use_case)?;
        let executor = Executor::new(graph, self.graph_config.clone());

        let added = match use_case {
            UseCase::AiNewsSummarizer => {
                let window = if input.trim().is_empty() {
                    self.default_window.as_str().to_string()
                } else {
                    input.trim().to_string()
                };

                let final_state = executor
                    .run(State::new().with_message(Message::user(window.clone())))
                    .await?;
                if let Some(warning) = final_state.get_str(keys::PERSISTENCE_WARNING) {
                    tracing::warn!(warning, "Summary was not saved");
                }

                let summary = summary_entry(&final_state)?;
                on_entry(&summary);
                self.latest_summary = Some(summary.content.clone());

                let fetched = TimeWindow::parse_or_daily(
                    final_state.get_str(keys::FREQUENCY).unwrap_or(window.as_str()),
                );
                vec![
                    ConversationEntry::user(format!("Fetching {} Latest AI News", fetched.label())),
                    summary,
                ]
            }
            UseCase::Chatbot | UseCase::ChatbotWithWebSearch => {
                let mut initial = State::from_messages(messages_from_entries(self.history(use_case)));
                initial.messages.push(Message::user(input));

                let mut folder = EntryFolder::new();
                let stream = executor.stream(initial);
                futures::pin_mut!(stream);
                while let Some(item) = stream.next().await {
                    for entry in folder.push_update(&item?) {
                        on_entry(entry);
                    }
                }

                let mut added = vec![ConversationEntry::user(input)];
                added.extend(folder.into_entries());
                added
            }
        };

        tracing::info!(use_case = %use_case, entries = added.len(), "Turn completed");
        self.histories
            .entry(use_case)
            .or_default()
            .extend(added.iter().cloned());
        Ok(added)
    }

    /// Latest news summary as a downloadable markdown document
    pub fn latest_summary_document(&self) -> Option<Document> {
        self.latest_summary.as_deref().map(Document::news_summary)
    }
}
