//! MACD: difference of a fast and a slow EMA, plus its signal line.
//!
//! MACD[t]   = EMA(close, fast)[t] - EMA(close, slow)[t]
//! Signal[t] = EMA(MACD, signal)[t], seeded with MACD[0]

use super::ema::ema_of_series;

/// All four MACD columns, index-aligned with the input.
#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub fast: Vec<f64>,
    pub slow: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

impl MacdSeries {
    /// MACD minus signal at `i` (the histogram bar).
    pub fn histogram(&self, i: usize) -> Option<f64> {
        Some(self.macd.get(i)? - self.signal.get(i)?)
    }
}

pub fn macd(closes: &[f64], fast_span: usize, slow_span: usize, signal_span: usize) -> MacdSeries {
    let fast = ema_of_series(closes, fast_span);
    let slow = ema_of_series(closes, slow_span);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_of_series(&macd, signal_span);
    MacdSeries {
        fast,
        slow,
        macd,
        signal,
    }
}
