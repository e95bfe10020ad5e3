//! Bar: one trading day of price data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLC bar for a single instrument.
///
/// Series of bars are always ordered oldest first with unique dates; the
/// providers in `crate::data` guarantee that before handing bars out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Returns true if every price is finite and strictly positive.
    pub fn is_finite_positive(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
    }

    /// Basic OHLC sanity check: positive prices and a high/low range that
    /// contains both open and close.
    pub fn is_sane(&self) -> bool {
        self.is_finite_positive()
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> Bar {
        Bar::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            100.0,
            105.0,
            98.0,
            103.0,
        )
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_rejects_nan() {
        let mut bar = sample_bar();
        bar.open = f64::NAN;
        assert!(!bar.is_finite_positive());
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_rejects_inverted_range() {
        let mut bar = sample_bar();
        bar.high = 97.0;
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_rejects_zero_price() {
        let mut bar = sample_bar();
        bar.low = 0.0;
        assert!(!bar.is_finite_positive());
    }
}
