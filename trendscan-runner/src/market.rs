//! Market-index trend. Reported alongside a scan; it never filters the
//! screen's candidates.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use trendscan_core::data::{DataProvider, LookbackWindow};
use trendscan_core::indicators::IndicatorParams;
use trendscan_core::signals::TrendSummary;

use crate::analysis::analyze;
use crate::data_loader::LoadError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketAssessment {
    pub symbol: String,
    pub date: NaiveDate,
    pub summary: TrendSummary,
}

impl MarketAssessment {
    pub fn is_bullish(&self) -> bool {
        self.summary.trend.is_bullish()
    }

    /// Risk reminder shown with a bearish index. Advisory only.
    pub fn caution(&self) -> Option<&'static str> {
        (!self.is_bullish())
            .then_some("index is weak: consider reducing holdings and keep stops tight")
    }
}

/// Classify the index by its latest close against its SAR.
pub fn assess_market(
    provider: &dyn DataProvider,
    index_symbol: &str,
    window: LookbackWindow,
    params: &IndicatorParams,
) -> Result<MarketAssessment, LoadError> {
    let analysis = analyze(provider, index_symbol, window, params)?;
    debug!(symbol = index_symbol, trend = %analysis.summary.trend, "market assessed");
    Ok(MarketAssessment {
        symbol: analysis.symbol,
        date: analysis.date,
        summary: analysis.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendscan_core::data::MemoryProvider;
    use trendscan_core::domain::Bar;

    fn rising(n: usize) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let c = 17000.0 + 10.0 * i as f64;
                Bar::new(base + chrono::Duration::days(i as i64), c, c + 5.0, c - 5.0, c)
            })
            .collect()
    }

    #[test]
    fn rising_index_is_bullish() {
        let provider = MemoryProvider::new().with_series("^TWII", rising(40));
        let window =
            LookbackWindow::trailing_months(6, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let m = assess_market(&provider, "^TWII", window, &IndicatorParams::default()).unwrap();
        assert!(m.is_bullish());
        assert_eq!(m.symbol, "^TWII");
        assert_eq!(m.caution(), None);
    }

    #[test]
    fn falling_index_carries_caution() {
        let mut bars = rising(40);
        bars.reverse();
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for (i, bar) in bars.iter_mut().enumerate() {
            bar.date = base + chrono::Duration::days(i as i64);
        }
        let provider = MemoryProvider::new().with_series("^TWII", bars);
        let window =
            LookbackWindow::trailing_months(6, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let m = assess_market(&provider, "^TWII", window, &IndicatorParams::default()).unwrap();
        assert!(!m.is_bullish());
        assert!(m.caution().is_some_and(|c| c.contains("stops")));
    }

    #[test]
    fn missing_index_is_an_error() {
        let provider = MemoryProvider::new();
        let window =
            LookbackWindow::trailing_months(6, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(assess_market(&provider, "^TWII", window, &IndicatorParams::default()).is_err());
    }
}
