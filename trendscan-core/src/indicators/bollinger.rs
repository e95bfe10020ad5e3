//! Bollinger Bands: moving average +/- a multiple of the rolling standard deviation.
//!
//! - Middle: SMA(close, period)
//! - StdDev: sample standard deviation (divide by N - 1) over the same window
//! - Upper:  middle + width * stddev
//! - Lower:  middle - width * stddev
//!
//! Lookback: period - 1.

use super::sma::rolling_mean;
use super::Indicator;
use crate::domain::Bar;

/// Which column of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
    StdDev,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    width: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn new(band: BollingerBand, period: usize, width: f64) -> Self {
        assert!(period >= 2, "Bollinger period must be >= 2");
        let label = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
            BollingerBand::StdDev => "std",
        };
        Self {
            period,
            width,
            band,
            name: format!("bollinger_{label}_{period}_{width}"),
        }
    }

    pub fn upper(period: usize, width: f64) -> Self {
        Self::new(BollingerBand::Upper, period, width)
    }

    pub fn middle(period: usize, width: f64) -> Self {
        Self::new(BollingerBand::Middle, period, width)
    }

    pub fn lower(period: usize, width: f64) -> Self {
        Self::new(BollingerBand::Lower, period, width)
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let bands = bollinger_bands(&super::closes(bars), self.period, self.width);
        match self.band {
            BollingerBand::Upper => bands.upper,
            BollingerBand::Middle => bands.middle,
            BollingerBand::Lower => bands.lower,
            BollingerBand::StdDev => bands.std,
        }
    }
}

/// All Bollinger columns, index-aligned with the input, NaN during warm-up.
#[derive(Debug, Clone, Default)]
pub struct BandSeries {
    pub middle: Vec<f64>,
    pub std: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger_bands(closes: &[f64], period: usize, width: f64) -> BandSeries {
    let middle = rolling_mean(closes, period);
    let std = rolling_sample_std(closes, period);
    let upper = middle.iter().zip(&std).map(|(m, s)| m + width * s).collect();
    let lower = middle.iter().zip(&std).map(|(m, s)| m - width * s).collect();
    BandSeries {
        middle,
        std,
        upper,
        lower,
    }
}

/// Rolling sample standard deviation; NaN until the first full window and for
/// windows shorter than two values.
pub fn rolling_sample_std(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period < 2 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[(i + 1 - period)..=i];
        let mean = window.iter().sum::<f64>() / period as f64;
        let sum_sq: f64 = window
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum();
        result[i] = (sum_sq / (period - 1) as f64).sqrt();
    }
    result
}
