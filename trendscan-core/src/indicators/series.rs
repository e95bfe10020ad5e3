//! Indicator series: every indicator the scanner needs, one row per bar.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bollinger::bollinger_bands;
use super::macd::macd;
use super::parabolic_sar::{self, SarParams};
use crate::domain::{Bar, Trend};

/// Minimum number of bars before any series is produced.
pub const MIN_BARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("not enough data: {len} bars, need at least {required}")]
    NotEnoughData { len: usize, required: usize },
}

/// Indicator parameters. Defaults are the classic 12/26/9 MACD, 20-period
/// 2-sigma Bollinger Bands and Wilder's SAR schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub fast_span: usize,
    pub slow_span: usize,
    pub signal_span: usize,
    pub band_period: usize,
    pub band_width: f64,
    pub sar: SarParams,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            fast_span: 12,
            slow_span: 26,
            signal_span: 9,
            band_period: 20,
            band_width: 2.0,
            sar: SarParams::default(),
        }
    }
}

/// Indicator values for one bar. Band fields are `None` until the band window
/// is full.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub bar: Bar,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: f64,
    pub signal: f64,
    pub ma: Option<f64>,
    pub std: Option<f64>,
    pub upper_band: Option<f64>,
    pub lower_band: Option<f64>,
    pub sar: f64,
}

impl IndicatorRow {
    pub fn close(&self) -> f64 {
        self.bar.close
    }

    /// MACD minus signal.
    pub fn histogram(&self) -> f64 {
        self.macd - self.signal
    }

    /// Bull iff the close is strictly above the SAR.
    pub fn trend(&self) -> Trend {
        if self.bar.close > self.sar {
            Trend::Bull
        } else {
            Trend::Bear
        }
    }
}

/// Index-aligned indicator rows for a bar series. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    rows: Vec<IndicatorRow>,
}

impl IndicatorSeries {
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IndicatorRow> {
        self.rows.get(index)
    }

    /// Row for the most recent bar.
    pub fn latest(&self) -> &IndicatorRow {
        // Construction guarantees at least MIN_BARS rows.
        &self.rows[self.rows.len() - 1]
    }
}

/// Compute the series with default parameters.
pub fn compute(bars: &[Bar]) -> Result<IndicatorSeries, IndicatorError> {
    compute_with(bars, &IndicatorParams::default())
}

/// Compute the series. Pure: no I/O, deterministic, causal.
pub fn compute_with(
    bars: &[Bar],
    params: &IndicatorParams,
) -> Result<IndicatorSeries, IndicatorError> {
    if bars.len() < MIN_BARS {
        return Err(IndicatorError::NotEnoughData {
            len: bars.len(),
            required: MIN_BARS,
        });
    }

    let closes = super::closes(bars);
    let m = macd(
        &closes,
        params.fast_span,
        params.slow_span,
        params.signal_span,
    );
    let bands = bollinger_bands(&closes, params.band_period, params.band_width);
    let sar = parabolic_sar::trace(bars, &params.sar);

    let rows = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            bar: *bar,
            ema_fast: m.fast[i],
            ema_slow: m.slow[i],
            macd: m.macd[i],
            signal: m.signal[i],
            ma: defined(bands.middle[i]),
            std: defined(bands.std[i]),
            upper_band: defined(bands.upper[i]),
            lower_band: defined(bands.lower[i]),
            sar: sar[i].sar,
        })
        .collect();

    Ok(IndicatorSeries { rows })
}

fn defined(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}
