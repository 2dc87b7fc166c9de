//! Yahoo Finance client built on `yahoo_finance_api`

use super::{CompanyInfo, MarketDataSource, PriceBar};
use crate::error::{Result, StockError};
use async_trait::async_trait;
use chrono::DateTime;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use yahoo_finance_api::{Quote, YQuoteSummary, YResponse, YahooConnector, YahooError};

/// Yahoo Finance client for daily bars and quote summaries
///
/// The connector holds the session cookie and crumb the quote summary
/// endpoint needs and renews the crumb when Yahoo rejects it. Renewal
/// mutates the connector, so calls are serialized behind a lock.
pub struct YahooFinanceClient {
    connector: Mutex<YahooConnector>,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = YahooConnector::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let connector = builder.build().map_err(yahoo_error)?;

        Ok(Self {
            connector: Mutex::new(connector),
        })
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    #[instrument(skip(self))]
    async fn price_history(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        let response = self
            .connector
            .lock()
            .await
            .get_latest_quotes(symbol, "1d")
            .await;

        latest_bar(symbol, response)
    }

    #[instrument(skip(self))]
    async fn company_info(&self, symbol: &str) -> Result<CompanyInfo> {
        let summary = self
            .connector
            .lock()
            .await
            .get_ticker_info(symbol)
            .await
            .map_err(yahoo_error)?;

        company_from_summary(symbol, summary)
    }
}

fn yahoo_error(e: YahooError) -> StockError {
    StockError::YahooFinanceError(e.to_string())
}

/// The most recent daily bar
///
/// Unknown symbols come back as a chart error body (HTTP 404) or an empty
/// data set; both mean no history. Any other failure is an error.
fn latest_bar(
    symbol: &str,
    response: std::result::Result<YResponse, YahooError>,
) -> Result<Vec<PriceBar>> {
    match response.and_then(|r| r.last_quote()) {
        Ok(quote) => Ok(bar_from_quote(&quote).into_iter().collect()),
        Err(YahooError::NoResult | YahooError::NoQuotes) => {
            debug!("no quotes for {}", symbol);
            Ok(Vec::new())
        },
        Err(YahooError::ApiError(message)) => {
            debug!(
                code = message.code.as_deref().unwrap_or(""),
                description = message.description.as_deref().unwrap_or(""),
                "chart error for {}",
                symbol
            );
            Ok(Vec::new())
        },
        Err(e) => Err(yahoo_error(e)),
    }
}

fn bar_from_quote(quote: &Quote) -> Option<PriceBar> {
    Some(PriceBar {
        timestamp: DateTime::from_timestamp(quote.timestamp, 0)?,
        open: quote.open,
        high: quote.high,
        low: quote.low,
        close: quote.close,
        volume: quote.volume,
    })
}

fn company_from_summary(symbol: &str, summary: YQuoteSummary) -> Result<CompanyInfo> {
    let unavailable = |reason: String| StockError::DataUnavailable {
        symbol: symbol.to_string(),
        reason,
    };

    let Some(quote_summary) = summary.quote_summary else {
        return Err(unavailable("empty quote summary".to_string()));
    };
    let Some(data) = quote_summary.result.and_then(|r| r.into_iter().next()) else {
        let reason = quote_summary
            .error
            .and_then(|e| e.description)
            .unwrap_or_else(|| "empty quote summary".to_string());
        return Err(unavailable(reason));
    };

    let quote_type = data.quote_type.as_ref();
    let profile = data.asset_profile.as_ref();
    let detail = data.summary_detail.as_ref();
    let stats = data.default_key_statistics.as_ref();
    let financials = data.financial_data.as_ref();

    Ok(CompanyInfo {
        long_name: quote_type.and_then(|q| q.long_name.clone().or_else(|| q.short_name.clone())),
        sector: profile.and_then(|p| p.sector.clone()),
        market_cap: detail.and_then(|d| d.market_cap).map(|v| v as f64),
        trailing_pe: detail.and_then(|d| d.trailing_pe),
        trailing_eps: stats.and_then(|s| s.trailing_eps),
        total_revenue: financials.and_then(|f| f.total_revenue).map(|v| v as f64),
        net_income_to_common: stats.and_then(|s| s.net_income_to_common).map(|v| v as f64),
        dividend_yield: detail.and_then(|d| d.dividend_yield),
        beta: detail.and_then(|d| d.beta).or_else(|| stats.and_then(|s| s.beta)),
        fifty_two_week_high: detail.and_then(|d| d.fifty_two_week_high),
        fifty_two_week_low: detail.and_then(|d| d.fifty_two_week_low),
        fifty_day_average: detail.and_then(|d| d.fifty_day_average),
        two_hundred_day_average: detail.and_then(|d| d.two_hundred_day_average),
    })
}
