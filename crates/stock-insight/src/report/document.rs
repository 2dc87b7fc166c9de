//! Report and comparison documents
//!
//! Reports are built as typed sections and only turned into markdown at the
//! edge. A comparison keeps its two reports separate so each column renders
//! on its own.

use super::data::ReportData;
use crate::market::MarketData;
use crate::news::{NEWS_HEADING, NewsDigest};

/// Heading of the comparison section
pub const COMPARISON_HEADING: &str = "📊 AI-Powered Comparison";

/// Report sections, in the order they appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    CompanyOverview,
    FinancialOverview,
    TechnicalIndicators,
    RiskAssessment,
    InvestmentSuggestion,
    LatestNews,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::CompanyOverview,
        SectionKind::FinancialOverview,
        SectionKind::TechnicalIndicators,
        SectionKind::RiskAssessment,
        SectionKind::InvestmentSuggestion,
        SectionKind::LatestNews,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            Self::CompanyOverview => "🏢 Company Overview",
            Self::FinancialOverview => "📈 Financial Overview",
            Self::TechnicalIndicators => "📊 Technical Indicators",
            Self::RiskAssessment => "⚠ Risk Assessment",
            Self::InvestmentSuggestion => "🏦 Investment Suggestion",
            Self::LatestNews => NEWS_HEADING,
        }
    }
}

/// Section content
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    /// Labelled figures, rendered as bold-label bullets
    Facts(Vec<(&'static str, String)>),
    Prose(String),
    News(NewsDigest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: SectionBody,
}

impl Section {
    pub fn to_markdown(&self) -> String {
        let body = match &self.body {
            SectionBody::Facts(facts) => facts
                .iter()
                .map(|(label, value)| format!("- **{label}:** {value}"))
                .collect::<Vec<_>>()
                .join("\n"),
            SectionBody::Prose(text) => text.clone(),
            SectionBody::News(digest) => digest.body_markdown(),
        };
        format!("## {}\n{}", self.kind.heading(), body)
    }
}

/// Investment report for one company
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub symbol: String,
    pub sections: Vec<Section>,
}

impl Report {
    /// Lay out figures, model commentary and news in section order
    pub fn assemble(data: &ReportData, suggestion: String, news: NewsDigest) -> Self {
        let sections = SectionKind::ALL
            .into_iter()
            .map(|kind| {
                let body = match kind {
                    SectionKind::CompanyOverview => SectionBody::Facts(vec![
                        ("Sector", data.sector.to_string()),
                        ("Market Cap", data.market_cap.grouped()),
                    ]),
                    SectionKind::FinancialOverview => SectionBody::Facts(vec![
                        ("Price-to-Earnings Ratio (P/E)", data.pe_ratio.to_string()),
                        ("Earnings Per Share (EPS)", data.eps.to_string()),
                        ("Revenue", data.revenue.grouped()),
                        ("Net Income", data.net_income.grouped()),
                        ("Dividend Yield", data.dividend_yield.to_string()),
                    ]),
                    SectionKind::TechnicalIndicators => SectionBody::Facts(vec![
                        ("52-Week High", data.fifty_two_week_high.dollars()),
                        ("52-Week Low", data.fifty_two_week_low.dollars()),
                        ("50-Day Moving Average", data.fifty_day_average.to_string()),
                        ("200-Day Moving Average", data.two_hundred_day_average.to_string()),
                    ]),
                    SectionKind::RiskAssessment => {
                        SectionBody::Facts(vec![("Beta", data.beta.to_string())])
                    },
                    SectionKind::InvestmentSuggestion => SectionBody::Prose(suggestion.clone()),
                    SectionKind::LatestNews => SectionBody::News(news.clone()),
                };
                Section { kind, body }
            })
            .collect();

        Self {
            title: data.title(),
            symbol: data.symbol.clone(),
            sections,
        }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}", self.title);
        for section in &self.sections {
            out.push_str("\n\n");
            out.push_str(&section.to_markdown());
        }
        out
    }
}

/// A report, or the notice shown when the symbol has no market data
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Ready(Report),
    Unavailable { symbol: String },
}

impl ReportOutcome {
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Ready(report) => report.to_markdown(),
            Self::Unavailable { symbol } => MarketData::unavailable_message(symbol),
        }
    }
}

/// Two reports and the model's comparison of them
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub left: ReportOutcome,
    pub right: ReportOutcome,
    pub analysis: String,
}

impl Comparison {
    pub fn analysis_markdown(&self) -> String {
        format!("## {COMPARISON_HEADING}\n{}", self.analysis)
    }

    /// Left column, right column, comparison section
    pub fn regions(&self) -> [String; 3] {
        [
            self.left.to_markdown(),
            self.right.to_markdown(),
            self.analysis_markdown(),
        ]
    }
}
