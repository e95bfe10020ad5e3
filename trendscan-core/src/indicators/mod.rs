//! Indicator engine.
//!
//! Single-series indicators implement [`Indicator`]: bar history in, a numeric
//! series of the same length out, `f64::NAN` during warm-up. The engine in
//! [`series`] combines them into one index-aligned [`IndicatorSeries`] per
//! instrument.
//!
//! # Look-ahead contamination guard
//! No value at bar t may depend on bars after t. Every indicator here must
//! give identical prefixes when computed on a truncated series.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod parabolic_sar;
pub mod series;
pub mod sma;

pub use bollinger::{bollinger_bands, rolling_sample_std, BandSeries, Bollinger, BollingerBand};
pub use ema::{ema_of_series, Ema};
pub use macd::{macd, MacdSeries};
pub use parabolic_sar::{ParabolicSar, SarParams, SarPoint};
pub use series::{
    compute, compute_with, IndicatorError, IndicatorParams, IndicatorRow, IndicatorSeries,
    MIN_BARS,
};
pub use sma::{rolling_mean, Sma};

use crate::domain::Bar;

/// Trait for single-series indicators.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ema_12", "sma_20").
    fn name(&self) -> &str;

    /// Number of leading bars whose output is `f64::NAN`.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

pub(crate) fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar), high = max(open,close) + 1.0,
/// low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
