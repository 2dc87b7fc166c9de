//! Report generation pipeline

use super::document::{Comparison, Report, ReportOutcome};
use crate::assistant::Assistant;
use crate::error::Result;
use crate::market::{MarketData, MarketDataFetcher};
use crate::news::NewsSource;
use crate::prompts::Prompts;
use std::sync::Arc;
use tracing::{info, instrument};

/// Builds reports from market data, model commentary and news
#[derive(Clone)]
pub struct ReportGenerator {
    assistant: Assistant,
    prompts: Arc<Prompts>,
    market: MarketDataFetcher,
    news: Arc<dyn NewsSource>,
}

impl ReportGenerator {
    pub fn new(
        assistant: Assistant,
        prompts: Arc<Prompts>,
        market: MarketDataFetcher,
        news: Arc<dyn NewsSource>,
    ) -> Self {
        Self {
            assistant,
            prompts,
            market,
            news,
        }
    }

    /// Report for one symbol
    ///
    /// Without market data the model and news source are not consulted.
    #[instrument(skip(self))]
    pub async fn generate(&self, symbol: &str) -> Result<ReportOutcome> {
        let data = match self.market.fetch(symbol).await {
            MarketData::Available(data) => data,
            MarketData::Unavailable { symbol } => {
                return Ok(ReportOutcome::Unavailable { symbol });
            },
        };

        let prompt = self.prompts.suggestion(&data.prompt_context())?;
        let suggestion = self.assistant.ask(prompt).await?;
        let news = self.news.latest(symbol).await;

        info!("report ready for {}", data.title());
        Ok(ReportOutcome::Ready(Report::assemble(&data, suggestion, news)))
    }

    /// Reports for both symbols plus a model comparison of the two
    ///
    /// Runs strictly in sequence; the same symbol twice is fetched twice.
    #[instrument(skip(self))]
    pub async fn compare(&self, first: &str, second: &str) -> Result<Comparison> {
        let left = self.generate(first).await?;
        let right = self.generate(second).await?;

        let prompt = self
            .prompts
            .comparison(&left.to_markdown(), &right.to_markdown())?;
        let analysis = self.assistant.ask(prompt).await?;

        Ok(Comparison {
            left,
            right,
            analysis,
        })
    }
}
