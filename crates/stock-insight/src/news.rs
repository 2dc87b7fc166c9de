//! Recent headlines for a ticker symbol
//!
//! News never fails a report. Every outcome, including a missing key or a
//! failed request, becomes a [`NewsDigest`] that renders inline.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Heading of the news section
pub const NEWS_HEADING: &str = "📰 Latest News";

/// One linked headline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub url: String,
}

/// Outcome of a news lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsDigest {
    /// Provider order (newest first), at most the configured limit
    Headlines(Vec<Headline>),
    MissingApiKey,
    NoRecentNews,
    Failed(String),
}

impl NewsDigest {
    /// Bullet list without the heading
    pub fn body_markdown(&self) -> String {
        match self {
            Self::Headlines(headlines) if headlines.is_empty() => Self::NoRecentNews.body_markdown(),
            Self::Headlines(headlines) => headlines
                .iter()
                .map(|h| format!("- [{}]({})", h.title, h.url))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::MissingApiKey => "- ❌ API key missing.".to_string(),
            Self::NoRecentNews => "- No recent news.".to_string(),
            Self::Failed(error) => format!("- ❌ Error: {error}"),
        }
    }

    /// Heading followed by the bullet list
    pub fn to_markdown(&self) -> String {
        format!("## {NEWS_HEADING}\n{}", self.body_markdown())
    }
}

/// Source of recent headlines
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Latest headlines mentioning `symbol`; never errors
    async fn latest(&self, symbol: &str) -> NewsDigest;
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    url: Option<String>,
}

/// NewsAPI `everything` endpoint client
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    api_base: String,
    limit: usize,
}

impl NewsApiClient {
    /// Create a client; `api_key` of `None` short-circuits every lookup
    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
        limit: usize,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            limit,
        })
    }

    async fn fetch_articles(&self, symbol: &str, api_key: &str) -> Result<Vec<Article>> {
        let url = format!("{}/everything", self.api_base);
        // Errors drop the URL: its query string carries the key.
        let response = self
            .client
            .get(&url)
            .query(&[("q", symbol), ("sortBy", "publishedAt"), ("apiKey", api_key)])
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(reqwest::Error::without_url)?;

        let body: EverythingResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;
        Ok(body.articles)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    #[instrument(skip(self))]
    async fn latest(&self, symbol: &str) -> NewsDigest {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("news key not configured");
            return NewsDigest::MissingApiKey;
        };

        match self.fetch_articles(symbol, api_key).await {
            Ok(articles) => digest(articles, self.limit),
            Err(e) => {
                warn!("news lookup for {} failed: {}", symbol, e);
                NewsDigest::Failed(e.to_string())
            },
        }
    }
}

/// First `limit` articles as headlines; the request already sorts by date
fn digest(articles: Vec<Article>, limit: usize) -> NewsDigest {
    if articles.is_empty() {
        return NewsDigest::NoRecentNews;
    }

    let headlines = articles
        .into_iter()
        .take(limit)
        .map(|article| Headline {
            title: article.title.unwrap_or_else(|| "No Title".to_string()),
            url: article.url.unwrap_or_else(|| "#".to_string()),
        })
        .collect();

    NewsDigest::Headlines(headlines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_once;

    fn parse(json: &str) -> Vec<Article> {
        serde_json::from_str::<EverythingResponse>(json).unwrap().articles
    }

    #[test]
    fn test_digest_keeps_provider_order_and_limits() {
        let articles = parse(
            r#"{"status":"ok","articles":[
                {"title":"newest","url":"https://a/1","publishedAt":"2024-05-03T10:00:00Z"},
                {"title":"middle","url":"https://a/2","publishedAt":"2024-05-02T10:00:00Z"},
                {"title":"old","url":"https://a/3","publishedAt":"2024-05-01T10:00:00Z"}
            ]}"#,
        );

        let NewsDigest::Headlines(headlines) = digest(articles, 2) else {
            panic!("expected headlines");
        };
        let titles: Vec<_> = headlines.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle"]);
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let articles = parse(r#"{"articles":[{"title":null,"url":null}]}"#);
        assert_eq!(
            digest(articles, 5).to_markdown(),
            "## 📰 Latest News\n- [No Title](#)"
        );
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(digest(parse(r#"{"articles":[]}"#), 5), NewsDigest::NoRecentNews);
        assert_eq!(digest(parse("{}"), 5), NewsDigest::NoRecentNews);
        assert_eq!(
            NewsDigest::NoRecentNews.to_markdown(),
            "## 📰 Latest News\n- No recent news."
        );
    }

    #[test]
    fn test_degraded_markdown() {
        assert_eq!(
            NewsDigest::MissingApiKey.to_markdown(),
            "## 📰 Latest News\n- ❌ API key missing."
        );
        assert_eq!(
            NewsDigest::Failed("HTTP status client error (426 Upgrade Required)".to_string())
                .body_markdown(),
            "- ❌ Error: HTTP status client error (426 Upgrade Required)"
        );
    }

    #[test]
    fn test_headline_markdown() {
        let digest = NewsDigest::Headlines(vec![
            Headline {
                title: "One".to_string(),
                url: "https://x/1".to_string(),
            },
            Headline {
                title: "Two".to_string(),
                url: "https://x/2".to_string(),
            },
        ]);
        assert_eq!(digest.body_markdown(), "- [One](https://x/1)\n- [Two](https://x/2)");
    }

    #[tokio::test]
    async fn test_missing_key_skips_request() {
        // Unroutable base: any request would fail with an error digest.
        let client = NewsApiClient::new(None, "http://127.0.0.1:1", 5, None).unwrap();
        assert_eq!(client.latest("AAPL").await, NewsDigest::MissingApiKey);
    }

    #[tokio::test]
    async fn test_transport_failure_hides_key() {
        let client = NewsApiClient::new(
            Some("SECRETKEY123".to_string()),
            "http://127.0.0.1:1",
            5,
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let digest = client.latest("AAPL").await;
        assert!(matches!(digest, NewsDigest::Failed(_)));
        assert!(!digest.to_markdown().contains("SECRETKEY123"), "{digest:?}");
    }

    #[tokio::test]
    async fn test_everything_request_shape() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"status":"ok","articles":[{"title":"Apple ships","url":"https://n/1"}]}"#,
        )
        .await;
        let client = NewsApiClient::new(Some("KEY1".to_string()), base, 5, None).unwrap();

        let digest = client.latest("AAPL").await;
        assert_eq!(
            digest,
            NewsDigest::Headlines(vec![Headline {
                title: "Apple ships".to_string(),
                url: "https://n/1".to_string(),
            }])
        );
        assert_eq!(
            request.await.unwrap(),
            "GET /everything?q=AAPL&sortBy=publishedAt&apiKey=KEY1 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_error_status_becomes_digest_without_key() {
        let (base, request) = serve_once(
            "401 Unauthorized",
            r#"{"status":"error","code":"apiKeyInvalid"}"#,
        )
        .await;
        let client = NewsApiClient::new(Some("SECRETKEY123".to_string()), base, 5, None).unwrap();

        let digest = client.latest("TSLA").await;
        let NewsDigest::Failed(reason) = &digest else {
            panic!("expected a failed digest, got {digest:?}");
        };
        assert!(reason.contains("401"), "{reason}");
        assert!(!reason.contains("SECRETKEY123"), "{reason}");
        assert!(request.await.unwrap().starts_with("GET /everything?q=TSLA&"));
    }
}
