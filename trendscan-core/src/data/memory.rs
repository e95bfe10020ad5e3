//! In-memory provider for fixtures, demos and failure injection.

use std::collections::{HashMap, HashSet};

use super::canonicalize::canonicalize;
use super::provider::{DataError, DataProvider, DataSource, FetchResult, LookbackWindow};
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    series: HashMap<String, Vec<Bar>>,
    failing: HashSet<String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bars for a symbol (canonicalized on insert).
    pub fn insert(&mut self, symbol: impl Into<String>, bars: Vec<Bar>) {
        self.series.insert(symbol.into(), canonicalize(bars));
    }

    pub fn with_series(mut self, symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        self.insert(symbol, bars);
        self
    }

    /// Make every fetch of `symbol` fail with `NetworkUnreachable`.
    pub fn fail(&mut self, symbol: impl Into<String>) {
        self.failing.insert(symbol.into());
    }

    pub fn with_failure(mut self, symbol: impl Into<String>) -> Self {
        self.fail(symbol);
        self
    }
}

impl DataProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self, symbol: &str, window: LookbackWindow) -> Result<FetchResult, DataError> {
        if self.failing.contains(symbol) {
            return Err(DataError::NetworkUnreachable(format!(
                "injected failure for {symbol}"
            )));
        }
        let series = self
            .series
            .get(symbol)
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;

        let bars: Vec<Bar> = series
            .iter()
            .filter(|b| window.contains(b.date))
            .copied()
            .collect();
        if bars.is_empty() {
            return Err(DataError::EmptySeries {
                symbol: symbol.to_string(),
            });
        }
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::Memory,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars() -> Vec<Bar> {
        (1..=5)
            .map(|d| {
                Bar::new(
                    NaiveDate::from_ymd_opt(2024, 4, d).unwrap(),
                    10.0,
                    11.0,
                    9.0,
                    10.0,
                )
            })
            .collect()
    }

    fn window(from: u32, to: u32) -> LookbackWindow {
        LookbackWindow::new(
            NaiveDate::from_ymd_opt(2024, 4, from).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, to).unwrap(),
        )
    }

    #[test]
    fn fetch_respects_window() {
        let p = MemoryProvider::new().with_series("A", bars());
        assert_eq!(p.fetch("A", window(2, 4)).unwrap().bars.len(), 3);
        assert!(matches!(
            p.fetch("A", window(20, 30)),
            Err(DataError::EmptySeries { .. })
        ));
    }

    #[test]
    fn unknown_and_failing_symbols() {
        let p = MemoryProvider::new()
            .with_series("A", bars())
            .with_failure("A");
        assert!(matches!(
            p.fetch("A", window(1, 5)),
            Err(DataError::NetworkUnreachable(_))
        ));
        assert!(matches!(
            p.fetch("B", window(1, 5)),
            Err(DataError::SymbolNotFound { .. })
        ));
    }
}
