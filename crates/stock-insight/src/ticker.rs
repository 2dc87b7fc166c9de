//! Company name to ticker symbol resolution
//!
//! The table is loaded once from a `Company,Symbol` CSV and is read-only
//! afterwards, so it can be shared behind an `Arc` without locking.

use crate::error::{Result, StockError};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct TickerRecord {
    #[serde(rename = "Company")]
    company: Option<String>,
    #[serde(rename = "Symbol")]
    symbol: String,
}

#[derive(Debug, Clone)]
struct TickerEntry {
    company_lower: String,
    symbol: String,
}

/// Static company/symbol lookup table
#[derive(Debug, Clone, Default)]
pub struct TickerTable {
    entries: Vec<TickerEntry>,
}

impl TickerTable {
    /// Load the table from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|source| StockError::TickerTable {
            path: path.display().to_string(),
            source,
        })?;

        let table = Self::from_csv(reader).map_err(|source| StockError::TickerTable {
            path: path.display().to_string(),
            source,
        })?;

        info!("Loaded {} tickers from {}", table.len(), path.display());
        Ok(table)
    }

    /// Load the table from any CSV source
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(rdr)).map_err(|source| StockError::TickerTable {
            path: "<reader>".to_string(),
            source,
        })
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> std::result::Result<Self, csv::Error> {
        let mut entries = Vec::new();

        for record in reader.deserialize::<TickerRecord>() {
            let record = record?;
            // Rows without a company name can never match a query.
            let Some(company) = record.company.filter(|c| !c.trim().is_empty()) else {
                continue;
            };
            entries.push(TickerEntry {
                company_lower: company.to_lowercase(),
                symbol: record.symbol.trim().to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Number of rows that can match
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no matchable rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbol of the first row whose company contains `name`, ignoring case
    ///
    /// First match wins; there is no ranking among multiple matches.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let symbol = self
            .entries
            .iter()
            .find(|entry| entry.company_lower.contains(&needle))
            .map(|entry| entry.symbol.as_str());

        debug!(name, ?symbol, "ticker lookup");
        symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "Company,Symbol\n\
        Apple Inc. Common Stock,AAPL\n\
        Applied Materials Inc. Common Stock,AMAT\n\
        \"Tesla, Inc. Common Stock\",TSLA\n\
        ,NONAME\n\
        Microsoft Corporation Common Stock,MSFT\n";

    fn table() -> TickerTable {
        TickerTable::from_reader(TABLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_rows_without_company_are_skipped() {
        assert_eq!(table().len(), 4);
    }

    #[test]
    fn test_resolve_case_insensitive_substring() {
        let table = table();
        assert_eq!(table.resolve("apple"), Some("AAPL"));
        assert_eq!(table.resolve("TESLA"), Some("TSLA"));
        assert_eq!(table.resolve("  Microsoft "), Some("MSFT"));
    }

    #[test]
    fn test_first_match_wins() {
        // "Appl" is contained in both Apple and Applied Materials
        assert_eq!(table().resolve("Appl"), Some("AAPL"));
        assert_eq!(table().resolve("Common Stock"), Some("AAPL"));
    }

    #[test]
    fn test_absent_name() {
        let table = table();
        assert_eq!(table.resolve("Nvidia"), None);
        assert_eq!(table.resolve(""), None);
        assert_eq!(table.resolve("   "), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let table = TickerTable::load(file.path()).unwrap();
        assert_eq!(table.resolve("tesla"), Some("TSLA"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = TickerTable::load("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, StockError::TickerTable { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[test]
    fn test_bundled_table_resolves_default_query() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../nasdaq_tickers.csv");
        let table = TickerTable::load(path).unwrap();
        assert_eq!(table.resolve("Apple"), Some("AAPL"));
        assert_eq!(table.resolve("Tesla"), Some("TSLA"));
    }
}
