//! Single-turn access to the language model

use crate::config::{LLM_API_KEY_ENV, LlmSettings};
use crate::error::Result;
use insight_llm::providers::{OpenAIConfig, OpenAIProvider};
use insight_llm::{CompletionRequest, LLMProvider, Message};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Build the shared model client
///
/// A missing credential is not fatal here: the provider is created with an
/// empty key and the first model call fails with an authentication error.
pub fn connect(
    settings: &LlmSettings,
    api_key: Option<String>,
    timeout: Option<Duration>,
) -> Result<Arc<dyn LLMProvider>> {
    let api_key = api_key.unwrap_or_else(|| {
        warn!("{} is not set; model calls will fail", LLM_API_KEY_ENV);
        String::new()
    });

    let mut config = OpenAIConfig::new(api_key)
        .with_api_base(settings.api_base.clone())
        .with_max_retries(settings.max_retries);
    if let Some(timeout) = timeout {
        config = config.with_timeout(timeout);
    }

    Ok(Arc::new(OpenAIProvider::with_config(config)?))
}

/// Sends one prompt, returns the reply text
#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn LLMProvider>,
    settings: LlmSettings,
}

impl Assistant {
    pub fn new(provider: Arc<dyn LLMProvider>, settings: LlmSettings) -> Self {
        Self { provider, settings }
    }

    /// Send `prompt` as a user message and return the reply text
    ///
    /// Provider errors propagate unchanged; nothing here retries or recovers.
    #[instrument(skip(self, prompt), fields(provider = self.provider.name(), model = %self.settings.model))]
    pub async fn ask(&self, prompt: String) -> Result<String> {
        let request = CompletionRequest::builder(&self.settings.model)
            .add_message(Message::user(prompt))
            .max_tokens(self.settings.max_tokens)
            .temperature(self.settings.temperature)
            .build();

        let response = self.provider.complete(request).await?;
        debug!(tokens = response.usage.total(), "model replied");
        Ok(response.text().trim().to_string())
    }
}
