//! Labelled figures extracted from company information

use crate::market::CompanyInfo;
use std::fmt;

/// A single figure in a report
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    Text(String),
    Number(f64),
    Missing,
}

impl Metric {
    fn from_text(value: Option<&String>) -> Self {
        value.map_or(Self::Missing, |v| Self::Text(v.clone()))
    }

    fn from_number(value: Option<f64>) -> Self {
        value.filter(|v| v.is_finite()).map_or(Self::Missing, Self::Number)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numbers with thousands separators, e.g. `2,975,000,000,000`
    pub fn grouped(&self) -> String {
        let Self::Number(n) = self else {
            return self.to_string();
        };

        let formatted = if n.fract() == 0.0 {
            format!("{n:.0}")
        } else {
            format!("{n:.2}")
        };
        let (sign, unsigned) = match formatted.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", formatted.as_str()),
        };
        match unsigned.split_once('.') {
            Some((whole, fraction)) => format!("{sign}{}.{fraction}", group_digits(whole)),
            None => format!("{sign}{}", group_digits(unsigned)),
        }
    }

    /// Dollar-prefixed value; missing figures stay `N/A`
    pub fn dollars(&self) -> String {
        match self {
            Self::Missing => self.to_string(),
            other => format!("${other}"),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
            Self::Missing => f.write_str("N/A"),
        }
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Figures for one company, in report order
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub symbol: String,
    pub company_name: String,
    pub sector: Metric,
    pub market_cap: Metric,
    pub pe_ratio: Metric,
    pub eps: Metric,
    pub revenue: Metric,
    pub net_income: Metric,
    pub dividend_yield: Metric,
    pub beta: Metric,
    pub fifty_two_week_high: Metric,
    pub fifty_two_week_low: Metric,
    pub fifty_day_average: Metric,
    pub two_hundred_day_average: Metric,
}

impl ReportData {
    /// Pick the report figures out of `info`; the name falls back to the symbol
    pub fn from_info(symbol: &str, info: &CompanyInfo) -> Self {
        Self {
            symbol: symbol.to_string(),
            company_name: info
                .long_name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| symbol.to_string()),
            sector: Metric::from_text(info.sector.as_ref()),
            market_cap: Metric::from_number(info.market_cap),
            pe_ratio: Metric::from_number(info.trailing_pe),
            eps: Metric::from_number(info.trailing_eps),
            revenue: Metric::from_number(info.total_revenue),
            net_income: Metric::from_number(info.net_income_to_common),
            dividend_yield: Metric::from_number(info.dividend_yield),
            beta: Metric::from_number(info.beta),
            fifty_two_week_high: Metric::from_number(info.fifty_two_week_high),
            fifty_two_week_low: Metric::from_number(info.fifty_two_week_low),
            fifty_day_average: Metric::from_number(info.fifty_day_average),
            two_hundred_day_average: Metric::from_number(info.two_hundred_day_average),
        }
    }

    /// `Name (SYMBOL)`
    pub fn title(&self) -> String {
        format!("{} ({})", self.company_name, self.symbol)
    }

    /// Every figure with its label, in the order the prompt lists them
    pub fn entries(&self) -> Vec<(&'static str, Metric)> {
        vec![
            ("Company Name", Metric::Text(self.company_name.clone())),
            ("Sector", self.sector.clone()),
            ("Market Cap", self.market_cap.clone()),
            ("P/E Ratio", self.pe_ratio.clone()),
            ("EPS", self.eps.clone()),
            ("Revenue", self.revenue.clone()),
            ("Net Income", self.net_income.clone()),
            ("Dividend Yield", self.dividend_yield.clone()),
            ("Beta", self.beta.clone()),
            ("52-Week High", self.fifty_two_week_high.clone()),
            ("52-Week Low", self.fifty_two_week_low.clone()),
            ("50-Day Moving Avg", self.fifty_day_average.clone()),
            ("200-Day Moving Avg", self.two_hundred_day_average.clone()),
        ]
    }

    /// Mapping-style rendering used inside the suggestion prompt
    pub fn prompt_context(&self) -> String {
        let body = self
            .entries()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{body}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::company_info;

    #[test]
    fn test_grouped_numbers() {
        assert_eq!(Metric::Number(2_975_000_000_000.0).grouped(), "2,975,000,000,000");
        assert_eq!(Metric::Number(999.0).grouped(), "999");
        assert_eq!(Metric::Number(-1_234_567.0).grouped(), "-1,234,567");
        assert_eq!(Metric::Number(1234.5).grouped(), "1,234.50");
        assert_eq!(Metric::Number(1234.999).grouped(), "1,235.00");
    }

    #[test]
    fn test_missing_figures_render_na() {
        assert_eq!(Metric::Missing.to_string(), "N/A");
        assert_eq!(Metric::Missing.grouped(), "N/A");
        assert_eq!(Metric::Missing.dollars(), "N/A");
        assert_eq!(Metric::Number(199.62).dollars(), "$199.62");
    }

    #[test]
    fn test_from_info_defaults_name_to_symbol() {
        let data = ReportData::from_info("XYZ", &CompanyInfo::default());
        assert_eq!(data.company_name, "XYZ");
        assert_eq!(data.title(), "XYZ (XYZ)");
        assert!(data.entries().iter().skip(1).all(|(_, m)| m.is_missing()));
    }

    #[test]
    fn test_non_finite_numbers_are_missing() {
        let info = CompanyInfo {
            beta: Some(f64::NAN),
            ..CompanyInfo::default()
        };
        assert!(ReportData::from_info("XYZ", &info).beta.is_missing());
    }

    #[test]
    fn test_prompt_context() {
        let data = ReportData::from_info("AAPL", &company_info("Apple Inc."));
        let context = data.prompt_context();
        assert!(context.starts_with("{Company Name: Apple Inc., Sector: Technology, Market Cap: "));
        assert!(context.contains("Beta: 1.264"));
        assert!(context.ends_with("200-Day Moving Avg: 181.09}"));
        assert_eq!(data.entries().len(), 13);
    }
}
