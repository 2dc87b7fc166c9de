//! Market data retrieval
//!
//! A [`MarketDataSource`] talks to the provider; [`MarketDataFetcher`] turns
//! its answers into [`MarketData`], which is either a full set of report
//! figures or an unavailability notice. Fetching never aborts a report.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::Result;
use crate::report::ReportData;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// One daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Company profile and key statistics; any field may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub long_name: Option<String>,
    pub sector: Option<String>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub trailing_eps: Option<f64>,
    pub total_revenue: Option<f64>,
    pub net_income_to_common: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub fifty_day_average: Option<f64>,
    pub two_hundred_day_average: Option<f64>,
}

/// Provider of price history and company information
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Most recent trading day; empty when the symbol has no quotes
    async fn price_history(&self, symbol: &str) -> Result<Vec<PriceBar>>;

    async fn company_info(&self, symbol: &str) -> Result<CompanyInfo>;
}

/// Figures for a symbol, or the reason there are none
#[derive(Debug, Clone, PartialEq)]
pub enum MarketData {
    Available(ReportData),
    Unavailable { symbol: String },
}

impl MarketData {
    /// Notice shown in place of a report
    pub fn unavailable_message(symbol: &str) -> String {
        format!("⚠ Stock data for {symbol} is unavailable.")
    }
}

/// Turns provider answers into report figures
#[derive(Clone)]
pub struct MarketDataFetcher {
    source: Arc<dyn MarketDataSource>,
}

impl MarketDataFetcher {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }

    /// Fetch report figures for `symbol`
    ///
    /// An empty or failed price history means the symbol is unavailable.
    /// A failed info lookup still yields a report, with every figure `N/A`.
    #[instrument(skip(self))]
    pub async fn fetch(&self, symbol: &str) -> MarketData {
        match self.source.price_history(symbol).await {
            Ok(bars) if !bars.is_empty() => {},
            Ok(_) => {
                info!("no recent price history for {}", symbol);
                return MarketData::Unavailable {
                    symbol: symbol.to_string(),
                };
            },
            Err(e) => {
                warn!("price history for {} failed: {}", symbol, e);
                return MarketData::Unavailable {
                    symbol: symbol.to_string(),
                };
            },
        }

        let info = self.source.company_info(symbol).await.unwrap_or_else(|e| {
            warn!("company info for {} failed: {}", symbol, e);
            CompanyInfo::default()
        });

        MarketData::Available(ReportData::from_info(symbol, &info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use crate::testing::{company_info, price_bars};

    #[tokio::test]
    async fn test_available() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_price_history()
            .withf(|symbol| symbol.to_string() == "AAPL")
            .times(1)
            .returning(|_| Ok(price_bars()));
        source
            .expect_company_info()
            .times(1)
            .returning(|_| Ok(company_info("Apple Inc.")));

        let fetcher = MarketDataFetcher::new(Arc::new(source));
        let MarketData::Available(data) = fetcher.fetch("AAPL").await else {
            panic!("expected data");
        };
        assert_eq!(data.title(), "Apple Inc. (AAPL)");
    }

    #[tokio::test]
    async fn test_empty_history_is_unavailable() {
        let mut source = MockMarketDataSource::new();
        source.expect_price_history().returning(|_| Ok(Vec::new()));
        source.expect_company_info().times(0);

        let fetcher = MarketDataFetcher::new(Arc::new(source));
        assert_eq!(
            fetcher.fetch("ZZZZ").await,
            MarketData::Unavailable {
                symbol: "ZZZZ".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_history_error_is_unavailable() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_price_history()
            .returning(|_| Err(StockError::YahooFinanceError("HTTP 404".to_string())));
        source.expect_company_info().times(0);

        let fetcher = MarketDataFetcher::new(Arc::new(source));
        assert!(matches!(
            fetcher.fetch("ZZZZ").await,
            MarketData::Unavailable { .. }
        ));
    }

    #[tokio::test]
    async fn test_info_error_gives_placeholder_figures() {
        let mut source = MockMarketDataSource::new();
        source.expect_price_history().returning(|_| Ok(price_bars()));
        source.expect_company_info().returning(|symbol| {
            Err(StockError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "quoteSummary empty".to_string(),
            })
        });

        let fetcher = MarketDataFetcher::new(Arc::new(source));
        let MarketData::Available(data) = fetcher.fetch("AAPL").await else {
            panic!("expected data");
        };
        assert_eq!(data.company_name, "AAPL");
        assert!(data.sector.is_missing());
    }

    #[test]
    fn test_unavailable_message() {
        assert_eq!(
            MarketData::unavailable_message("XYZ"),
            "⚠ Stock data for XYZ is unavailable."
        );
    }
}
