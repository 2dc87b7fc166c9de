//! Error types for stock-insight operations
//!
//! Only failures that abort an interaction are errors. Unavailable market
//! data and news failures are ordinary values rendered inline.

use thiserror::Error;

/// Stock report errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Ticker table could not be read
    #[error("Failed to load ticker table '{path}': {source}")]
    TickerTable {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Language model call failed
    #[error("Language model error: {0}")]
    Llm(#[from] insight_llm::LLMError),

    /// Prompt template failed to render
    #[error("Prompt error: {0}")]
    Prompt(#[from] minijinja::Error),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StockError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "No data found".to_string(),
        };
        assert_eq!(err.to_string(), "Data not available for AAPL: No data found");

        let err = StockError::ConfigError("news_limit must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: news_limit must be greater than 0"
        );
    }

    #[test]
    fn test_llm_error_conversion() {
        let err: StockError = insight_llm::LLMError::AuthenticationFailed.into();
        assert!(matches!(err, StockError::Llm(_)));
        assert!(err.to_string().contains("authentication"));
    }
}
