//! Configuration for stock report generation

use crate::error::{Result, StockError};
use insight_utils::{env_opt, env_or};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the language model credential
pub const LLM_API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable holding the news provider key
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

const DEFAULT_TICKER_TABLE: &str = "nasdaq_tickers.csv";
const DEFAULT_NEWS_API_BASE: &str = "https://newsapi.org/v2";
const DEFAULT_LLM_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_LLM_MODEL: &str = "mixtral-8x7b-32768";

/// Query shown in the input field before the user types anything
pub const DEFAULT_QUERY: &str = "Compare Apple and Tesla stocks";

/// Language model parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    /// OpenAI-compatible endpoint
    pub api_base: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap per call
    pub max_tokens: usize,
    /// Retries for transient failures
    pub max_retries: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_LLM_API_BASE.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: 200,
            max_retries: 2,
        }
    }
}

/// Configuration for stock report generation
#[derive(Debug, Clone)]
pub struct StockConfig {
    /// CSV with a `Company,Symbol` header, relative to the working directory
    pub ticker_table_path: PathBuf,

    /// News provider key; `None` degrades the news section
    pub news_api_key: Option<String>,

    /// News provider base URL
    pub news_api_base: String,

    /// Articles shown per report
    pub news_limit: usize,

    /// HTTP timeout for every external call; `None` waits indefinitely
    pub request_timeout: Option<Duration>,

    /// Language model parameters
    pub llm: LlmSettings,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            ticker_table_path: PathBuf::from(DEFAULT_TICKER_TABLE),
            news_api_key: None,
            news_api_base: DEFAULT_NEWS_API_BASE.to_string(),
            news_limit: 5,
            request_timeout: None,
            llm: LlmSettings::default(),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.news_limit == 0 {
            return Err(StockError::ConfigError(
                "news_limit must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(StockError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(StockError::ConfigError(format!(
                "temperature {} is outside 0.0..=2.0",
                self.llm.temperature
            )));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    ticker_table_path: Option<PathBuf>,
    news_api_key: Option<String>,
    news_api_base: Option<String>,
    news_limit: Option<usize>,
    request_timeout: Option<Duration>,
    llm_api_base: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    max_retries: Option<u32>,
}

impl StockConfigBuilder {
    /// Set the ticker table path
    pub fn ticker_table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ticker_table_path = Some(path.into());
        self
    }

    /// Set the news API key
    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    /// Set the news API base URL
    pub fn news_api_base(mut self, base: impl Into<String>) -> Self {
        self.news_api_base = Some(base.into());
        self
    }

    /// Set how many articles each report lists
    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the language model endpoint
    pub fn llm_api_base(mut self, base: impl Into<String>) -> Self {
        self.llm_api_base = Some(base.into());
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the per-call output token cap
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set model retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Fill unset values from the environment
    ///
    /// Reads `NEWS_API_KEY`, `TICKER_TABLE_PATH`, `LLM_API_BASE` and
    /// `LLM_MODEL`. Values set explicitly on the builder win.
    pub fn with_env(mut self) -> Self {
        if self.news_api_key.is_none() {
            self.news_api_key = env_opt(NEWS_API_KEY_ENV);
        }
        if self.ticker_table_path.is_none() {
            self.ticker_table_path =
                Some(PathBuf::from(env_or("TICKER_TABLE_PATH", DEFAULT_TICKER_TABLE)));
        }
        if self.llm_api_base.is_none() {
            self.llm_api_base = env_opt("LLM_API_BASE");
        }
        if self.model.is_none() {
            self.model = env_opt("LLM_MODEL");
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            ticker_table_path: self.ticker_table_path.unwrap_or(defaults.ticker_table_path),
            news_api_key: self.news_api_key,
            news_api_base: self.news_api_base.unwrap_or(defaults.news_api_base),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            request_timeout: self.request_timeout.or(defaults.request_timeout),
            llm: LlmSettings {
                api_base: self.llm_api_base.unwrap_or(defaults.llm.api_base),
                model: self.model.unwrap_or(defaults.llm.model),
                temperature: self.temperature.unwrap_or(defaults.llm.temperature),
                max_tokens: self.max_tokens.unwrap_or(defaults.llm.max_tokens),
                max_retries: self.max_retries.unwrap_or(defaults.llm.max_retries),
            },
        };

        config.validate()?;
        Ok(config)
    }
}
