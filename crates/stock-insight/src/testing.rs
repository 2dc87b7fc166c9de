//! Test doubles and fixtures shared by the unit tests

use crate::market::{CompanyInfo, PriceBar};
use crate::news::{Headline, NewsDigest};
use crate::ticker::TickerTable;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use insight_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, TokenUsage,
};
use std::sync::Mutex;

type Responder = Box<dyn Fn(&str) -> insight_llm::Result<String> + Send + Sync>;

/// Records every request and answers through a closure over the prompt text
pub struct FakeProvider {
    responder: Responder,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeProvider {
    pub fn new(responder: impl Fn(&str) -> insight_llm::Result<String> + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Same reply to every prompt
    pub fn replying(text: &'static str) -> Self {
        Self::new(move |_| Ok(text.to_string()))
    }

    /// Every call fails like a dead endpoint
    pub fn failing() -> Self {
        Self::new(|_| Err(LLMError::RequestFailed("HTTP 502 Bad Gateway: upstream".into())))
    }

    /// Answers by prompt kind: extraction, suggestion or comparison
    pub fn routed(companies: &'static str) -> Self {
        Self::new(move |prompt| {
            let reply = if prompt.starts_with("List only the company names") {
                companies
            } else if prompt.starts_with("Based on the following stock data") {
                "Hold: solid fundamentals, fair valuation."
            } else {
                "Both are growth names; Apple is the steadier pick."
            };
            Ok(reply.to_string())
        })
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Prompt text of every request, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.messages.iter().map(|m| m.content.clone()).collect())
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMProvider for FakeProvider {
    async fn complete(&self, request: CompletionRequest) -> insight_llm::Result<CompletionResponse> {
        let prompt: String = request.messages.iter().map(|m| m.content.as_str()).collect();
        self.requests.lock().unwrap().push(request);

        let text = (self.responder)(&prompt)?;
        Ok(CompletionResponse {
            message: Message::assistant(text),
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &str {
        "fake"
    }
}

pub fn ticker_table() -> TickerTable {
    TickerTable::from_reader(
        "Company,Symbol\n\
         Apple Inc. Common Stock,AAPL\n\
         \"Tesla, Inc. Common Stock\",TSLA\n\
         Microsoft Corporation Common Stock,MSFT\n"
            .as_bytes(),
    )
    .unwrap()
}

pub fn price_bars() -> Vec<PriceBar> {
    vec![PriceBar {
        timestamp: Utc.with_ymd_and_hms(2024, 6, 3, 13, 30, 0).unwrap(),
        open: 192.9,
        high: 194.99,
        low: 192.52,
        close: 194.03,
        volume: 50_080_500,
    }]
}

pub fn company_info(name: &str) -> CompanyInfo {
    CompanyInfo {
        long_name: Some(name.to_string()),
        sector: Some("Technology".to_string()),
        market_cap: Some(2_975_000_000_000.0),
        trailing_pe: Some(30.17),
        trailing_eps: Some(6.43),
        total_revenue: Some(381_623_009_280.0),
        net_income_to_common: Some(100_389_003_264.0),
        dividend_yield: Some(0.0051),
        beta: Some(1.264),
        fifty_two_week_high: Some(199.62),
        fifty_two_week_low: Some(164.08),
        fifty_day_average: Some(178.42),
        two_hundred_day_average: Some(181.09),
    }
}

pub fn headlines() -> NewsDigest {
    NewsDigest::Headlines(vec![
        Headline {
            title: "Apple unveils new chips".to_string(),
            url: "https://example.com/chips".to_string(),
        },
        Headline {
            title: "Analysts weigh in".to_string(),
            url: "https://example.com/analysts".to_string(),
        },
    ])
}

/// One-shot HTTP server on a loopback port
///
/// Answers the first request with `status` and a JSON `body`, then resolves
/// the handle to that request's request line.
pub async fn serve_once(
    status: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0_u8; 4096];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (base, handle)
}
