//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = EMA[t-1] + k * (close[t] - EMA[t-1]), k = 2 / (span + 1)
//! Seed: EMA[0] = close[0], so there is no warm-up gap.
//! Algebraically equal to `x*k + prev*(1-k)` (pandas `ewm(adjust=False)`), but
//! the rounding can differ in the last bit, which can flip an exact MACD/signal tie.
//! Lookback: 0.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        ema_of_series(&super::closes(bars), self.span)
    }
}

/// EMA of an arbitrary series, seeded with its first value.
///
/// The update is written in incremental form so a constant input reproduces
/// the constant exactly instead of drifting by rounding error.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let k = 2.0 / (span.max(1) as f64 + 1.0);

    let mut result = Vec::with_capacity(values.len());
    let mut prev = first;
    result.push(prev);
    for &v in &values[1..] {
        prev += k * (v - prev);
        result.push(prev);
    }
    result
}
