use async_trait::async_trait;
use conduit_llm::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search/news capability
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Articles in relevance order
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, ProviderError>;
}

/// How far back a news search looks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [Self::Daily, Self::Weekly, Self::Monthly, Self::Yearly];

    /// Parse leniently; anything unrecognized means `Daily`
    pub fn parse_or_daily(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(value, "Unrecognized time window, using daily");
            Self::Daily
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Capitalized name for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Single-letter range accepted by the search API
    pub fn time_range(&self) -> &'static str {
        match self {
            Self::Daily => "d",
            Self::Weekly => "w",
            Self::Monthly => "m",
            Self::Yearly => "y",
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
            Self::Yearly => 365,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(Self::Daily),
            "weekly" | "w" => Ok(Self::Weekly),
            "monthly" | "m" => Ok(Self::Monthly),
            "yearly" | "y" => Ok(Self::Yearly),
            other => Err(format!("Unknown time window: {}", other)),
        }
    }
}

/// One search result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            published_date: None,
        }
    }

    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub topic: String,
    pub time_window: TimeWindow,
    pub max_results: u32,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            topic: "general".to_string(),
            time_window: TimeWindow::Daily,
            max_results: 5,
        }
    }

    /// Query used by the news pipeline
    pub fn latest_ai_news(window: TimeWindow) -> Self {
        Self::new("latest AI news")
            .with_topic("technology")
            .with_time_window(window)
            .with_max_results(10)
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = window;
        self
    }

    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }
}
