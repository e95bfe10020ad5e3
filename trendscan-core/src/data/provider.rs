//! Data provider trait and structured error types.
//!
//! The `DataProvider` trait abstracts over price-series sources (Yahoo
//! Finance, CSV files, in-memory fixtures) so the screening pipeline can run
//! against any of them and tests can inject failures.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Bar;

/// Structured error types for data operations.
///
/// Every variant is a normal outcome for a single symbol: callers skip the
/// symbol rather than abort a batch.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("no usable bars for '{symbol}'")]
    EmptySeries { symbol: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data error: {0}")]
    Other(String),
}

/// Inclusive date range to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookbackWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LookbackWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `months` calendar months ending at `end`.
    pub fn trailing_months(months: u32, end: NaiveDate) -> Self {
        let start = end
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Result of a successful fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    /// Canonical bars: ascending, unique dates, finite positive prices.
    pub bars: Vec<Bar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Memory,
}

/// Trait for price-series providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol over a window, oldest first.
    fn fetch(&self, symbol: &str, window: LookbackWindow) -> Result<FetchResult, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_six_months() {
        let end = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
        let w = LookbackWindow::trailing_months(6, end);
        assert_eq!(w.start, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(w.contains(end));
        assert!(!w.contains(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()));
    }

    #[test]
    fn errors_are_displayable() {
        let e = DataError::EmptySeries {
            symbol: "2330.TW".into(),
        };
        assert_eq!(e.to_string(), "no usable bars for '2330.TW'");
    }
}
