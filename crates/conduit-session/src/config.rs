use config::{Config as ConfigLoader, ConfigError, Environment, File};
use conduit_graph::GraphConfig;
use conduit_llm::{LLMConfig, Provider};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub llm: LLMConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub llm_api_key: String,
    #[serde(default)]
    pub tavily_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    /// Window used when a news request names none
    pub time_window: String,
    pub output_dir: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            time_window: "daily".to_string(),
            output_dir: "AINews".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables `CONDUIT_<SECTION>__<KEY>`, e.g. `CONDUIT_LLM__MODEL`
    ///
    /// Secrets are not read here. Apply any overrides first, then call
    /// [`AppConfig::load_secrets`] so the key matches the final provider.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("CONDUIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        builder.build()?.try_deserialize()
    }

    /// Switch provider and/or model.
    ///
    /// A new provider without a model falls back to that provider's default
    /// model. Sampling settings are kept.
    pub fn apply_overrides(&mut self, provider: Option<Provider>, model: Option<String>) {
        match (provider, model) {
            (Some(provider), model) => {
                let model = model.unwrap_or_else(|| provider.default_model().to_string());
                let mut llm = LLMConfig::new(provider, model);
                llm.temperature = self.llm.temperature;
                llm.max_tokens = self.llm.max_tokens;
                self.llm = llm;
            }
            (None, Some(model)) => self.llm.model = model,
            (None, None) => {}
        }
    }

    /// Read API keys from the environment
    ///
    /// The model key is required; the search key only enables the web search
    /// and news use cases.
    pub fn load_secrets(&mut self) -> Result<(), ConfigError> {
        self.load_secrets_with(|var| std::env::var(var).ok())
    }

    /// Read API keys through `lookup` instead of the process environment
    pub fn load_secrets_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let key_var = self.llm.provider.api_key_env();
        self.llm_api_key = lookup(key_var)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::Message(format!("{} environment variable is required", key_var)))?;
        self.tavily_api_key = lookup("TAVILY_API_KEY").filter(|k| !k.trim().is_empty());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [llm]
        provider = "groq"
        model = "llama-3.3-70b-versatile"
        temperature = 0.2

        [graph]
        max_tool_rounds = 3

        [news]
        time_window = "weekly"
        output_dir = "out/news"

        [logging]
        level = "debug"
        format = "json"
    "#;

    #[test]
    fn test_config_structure() {
        let config: AppConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.llm.provider, Provider::Groq);
        assert_eq!(config.llm.temperature, Some(0.2));
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.graph.max_tool_rounds, 3);
        assert_eq!(config.graph.max_steps, 50);
        assert_eq!(config.news.time_window, "weekly");
        assert_eq!(config.logging.format, "json");
        assert!(config.llm_api_key.is_empty());
    }

    #[test]
    fn test_sections_default() {
        let config: AppConfig = toml::from_str("[llm]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        assert_eq!(config.llm.provider, Provider::OpenAI);
        assert_eq!(config.news.output_dir, "AINews");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.graph, GraphConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.news.output_dir, "out/news");
    }

    fn gemini_only(var: &str) -> Option<String> {
        (var == "GEMINI_API_KEY").then(|| "gemini-key".to_string())
    }

    #[test]
    fn test_provider_override_reads_new_provider_key() {
        let mut config: AppConfig = toml::from_str(SAMPLE).unwrap();
        config.apply_overrides(Some(Provider::Gemini), None);
        config.load_secrets_with(gemini_only).unwrap();

        assert_eq!(config.llm.provider, Provider::Gemini);
        assert_eq!(config.llm.model, Provider::Gemini.default_model());
        assert_eq!(config.llm.temperature, Some(0.2));
        assert_eq!(config.llm_api_key, "gemini-key");
        assert_eq!(config.tavily_api_key, None);
    }

    #[test]
    fn test_missing_key_names_configured_provider() {
        let mut config: AppConfig = toml::from_str(SAMPLE).unwrap();
        let err = config.load_secrets_with(gemini_only).unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_model_override_keeps_provider() {
        let mut config: AppConfig = toml::from_str(SAMPLE).unwrap();
        config.apply_overrides(None, Some("llama-3.1-8b-instant".to_string()));

        assert_eq!(config.llm.provider, Provider::Groq);
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
    }
}
