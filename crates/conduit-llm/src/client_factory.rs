use crate::config::LLMConfig;
use crate::error::{ProviderError, Result};
use crate::openai::OpenAIClient;
use crate::traits::ChatModel;
use std::sync::Arc;

/// Factory Pattern: Centralized logic for client creation
///
/// Callers hold a `dyn ChatModel` and never branch on the provider themselves.
pub struct ClientFactory;

impl ClientFactory {
    /// Validate that the given LLM configuration is usable
    pub fn validate_config(config: &LLMConfig, api_key: &str) -> Result<()> {
        if config.model.trim().is_empty() {
            return Err(ProviderError::Config("Model name is required".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config(format!(
                "API key for {} is missing (set {})",
                config.provider,
                config.provider.api_key_env()
            )));
        }
        Ok(())
    }

    /// Create a chat model from configuration
    pub fn create_client(config: &LLMConfig, api_key: &str) -> Result<Arc<dyn ChatModel>> {
        Self::validate_config(config, api_key)?;

        tracing::info!(
            provider = %config.provider,
            model = %config.model,
            "Creating chat model client"
        );

        Ok(Arc::new(OpenAIClient::new(config, api_key)?))
    }

    /// Read the provider's API key from the environment
    pub fn api_key_from_env(config: &LLMConfig) -> Result<String> {
        std::env::var(config.provider.api_key_env()).map_err(|_| {
            ProviderError::Config(format!(
                "{} environment variable is required",
                config.provider.api_key_env()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;

    #[test]
    fn test_validate_config() {
        let config = LLMConfig::new(Provider::OpenAI, "gpt-4o");
        assert!(ClientFactory::validate_config(&config, "sk-test").is_ok());
        assert!(ClientFactory::validate_config(&config, "  ").is_err());

        let empty_model = LLMConfig::new(Provider::Gemini, "");
        assert!(ClientFactory::validate_config(&empty_model, "key").is_err());
    }

    #[test]
    fn test_create_client_for_each_provider() {
        for provider in [Provider::OpenAI, Provider::Groq, Provider::Gemini] {
            let config = LLMConfig::new(provider, provider.default_model());
            let client = ClientFactory::create_client(&config, "key").unwrap();
            assert_eq!(client.model_name(), provider.default_model());
        }
    }
}
