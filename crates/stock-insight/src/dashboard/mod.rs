//! Query dashboard
//!
//! One submission runs extraction, routing by company count, resolution and
//! report generation, then leaves the result in [`DashboardState`]. Nothing
//! carries over between submissions.

pub mod render;

pub use render::TerminalRenderer;

use crate::assistant::{self, Assistant};
use crate::config::StockConfig;
use crate::error::Result;
use crate::extractor::EntityExtractor;
use crate::market::{MarketDataFetcher, YahooFinanceClient};
use crate::news::NewsApiClient;
use crate::prompts::Prompts;
use crate::report::{Comparison, ReportGenerator, ReportOutcome};
use crate::ticker::TickerTable;
use std::sync::Arc;
use tracing::{info, instrument};

/// What a submission produced
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Rejection or resolution failure
    Message(String),
    Report(ReportOutcome),
    Comparison(Comparison),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardState {
    /// Nothing submitted yet, or the last submission was blank or failed
    #[default]
    Idle,
    Submitted(View),
}

/// Routes queries to single reports or comparisons
pub struct Dashboard {
    tickers: Arc<TickerTable>,
    extractor: EntityExtractor,
    generator: ReportGenerator,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(
        tickers: Arc<TickerTable>,
        extractor: EntityExtractor,
        generator: ReportGenerator,
    ) -> Self {
        Self {
            tickers,
            extractor,
            generator,
            state: DashboardState::Idle,
        }
    }

    /// Wire the production clients described by `config`
    ///
    /// Fails only if the ticker table cannot be loaded or an HTTP client
    /// cannot be built. A missing model key surfaces at the first query.
    pub fn from_config(config: &StockConfig, llm_api_key: Option<String>) -> Result<Self> {
        let tickers = Arc::new(TickerTable::load(&config.ticker_table_path)?);
        let provider = assistant::connect(&config.llm, llm_api_key, config.request_timeout)?;
        let assistant = Assistant::new(provider, config.llm.clone());
        let prompts = Arc::new(Prompts::new()?);

        let yahoo = YahooFinanceClient::new(config.request_timeout)?;
        let news = NewsApiClient::new(
            config.news_api_key.clone(),
            config.news_api_base.clone(),
            config.news_limit,
            config.request_timeout,
        )?;

        let extractor = EntityExtractor::new(assistant.clone(), prompts.clone());
        let generator = ReportGenerator::new(
            assistant,
            prompts,
            MarketDataFetcher::new(Arc::new(yahoo)),
            Arc::new(news),
        );

        Ok(Self::new(tickers, extractor, generator))
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Handle one query
    ///
    /// A blank query leaves the dashboard idle. On error the dashboard is
    /// idle again and the error is returned for the caller to show.
    #[instrument(skip(self))]
    pub async fn submit(&mut self, query: &str) -> Result<&DashboardState> {
        self.state = DashboardState::Idle;
        if query.trim().is_empty() {
            return Ok(&self.state);
        }

        let view = self.route(query).await?;
        self.state = DashboardState::Submitted(view);
        Ok(&self.state)
    }

    async fn route(&self, query: &str) -> Result<View> {
        let companies = self.extractor.extract(query).await?;

        match companies.as_slice() {
            [name] => match self.tickers.resolve(name) {
                Some(symbol) => {
                    info!("single report for {} ({})", name, symbol);
                    Ok(View::Report(self.generator.generate(symbol).await?))
                },
                None => Ok(View::Message(format!("❌ Could not find ticker for {name}."))),
            },
            [first, second] => match (self.tickers.resolve(first), self.tickers.resolve(second)) {
                (Some(left), Some(right)) => {
                    info!("comparing {} and {}", left, right);
                    Ok(View::Comparison(self.generator.compare(left, right).await?))
                },
                _ => Ok(View::Message(format!(
                    "❌ Could not find tickers for [{}].",
                    quoted_list(&companies)
                ))),
            },
            _ => {
                info!(count = companies.len(), "query rejected");
                Ok(View::Message(
                    "❌ Could not identify valid company names in the query.".to_string(),
                ))
            },
        }
    }
}

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
