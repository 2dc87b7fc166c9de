//! AI-assisted stock investment reports
//!
//! A free-text query is reduced to company names by a language model, the
//! names are resolved to ticker symbols through a static table, and each
//! symbol gets a report built from Yahoo Finance figures, model commentary
//! and recent headlines. Two companies produce a side-by-side comparison.
//!
//! # Example
//!
//! ```no_run
//! use stock_insight::{Dashboard, StockConfig, TerminalRenderer};
//!
//! # async fn run() -> stock_insight::Result<()> {
//! let config = StockConfig::from_env()?;
//! let mut dashboard = Dashboard::from_config(&config, std::env::var("GROQ_API_KEY").ok())?;
//!
//! let state = dashboard.submit("Compare Apple and Tesla stocks").await?;
//! if let Some(text) = TerminalRenderer::new().render_state(state) {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod extractor;
pub mod market;
pub mod news;
pub mod prompts;
pub mod report;
pub mod ticker;

#[cfg(test)]
mod testing;

pub use assistant::Assistant;
pub use config::{LlmSettings, StockConfig, StockConfigBuilder};
pub use dashboard::{Dashboard, DashboardState, TerminalRenderer, View};
pub use error::{Result, StockError};
pub use extractor::EntityExtractor;
pub use market::{
    CompanyInfo, MarketData, MarketDataFetcher, MarketDataSource, PriceBar, YahooFinanceClient,
};
pub use news::{Headline, NewsApiClient, NewsDigest, NewsSource};
pub use prompts::Prompts;
pub use report::{Comparison, Report, ReportGenerator, ReportOutcome, SectionKind};
pub use ticker::TickerTable;
