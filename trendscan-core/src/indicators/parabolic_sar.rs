//! Parabolic SAR: Wilder's stop-and-reverse with an acceleration factor.
//!
//! Inherently sequential: each bar folds the previous state (trend, SAR,
//! extreme point, acceleration factor) into the next one.
//!
//! Seed at bar 0: bull trend, SAR = low[0], EP = high[0], AF = af_start.
//! At bar i the tentative SAR is `sar + af * (ep - sar)`. A bar that pierces
//! the tentative SAR reverses the trend: SAR jumps to the old EP, EP restarts
//! at the bar's extreme and AF resets to af_start. Otherwise a new extreme
//! bumps AF by af_step (capped at af_max) and the SAR is clamped so it never
//! sits inside the two previous bars' range.
//!
//! Lookback: 0 (the seed value is defined but not meaningful).

use serde::{Deserialize, Serialize};

use super::Indicator;
use crate::domain::{Bar, Trend};

/// Acceleration-factor schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SarParams {
    pub af_start: f64,
    pub af_step: f64,
    pub af_max: f64,
}

impl Default for SarParams {
    /// Wilder's defaults: 0.02, 0.02, 0.20
    fn default() -> Self {
        Self {
            af_start: 0.02,
            af_step: 0.02,
            af_max: 0.20,
        }
    }
}

/// SAR state after processing one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SarPoint {
    pub sar: f64,
    pub trend: Trend,
    pub extreme_point: f64,
    pub acceleration: f64,
}

impl SarPoint {
    fn seed(bar: &Bar, params: &SarParams) -> Self {
        Self {
            sar: bar.low,
            trend: Trend::Bull,
            extreme_point: bar.high,
            acceleration: params.af_start,
        }
    }

    /// Advance the state by bar `i`. `bars[..=i]` must be available.
    fn step(self, bars: &[Bar], i: usize, params: &SarParams) -> Self {
        let bar = &bars[i];
        let prev1 = &bars[i - 1];
        let prev2 = &bars[i.saturating_sub(2)];
        let tentative = self.sar + self.acceleration * (self.extreme_point - self.sar);

        match self.trend {
            Trend::Bull if bar.low < tentative => Self {
                sar: self.extreme_point,
                trend: Trend::Bear,
                extreme_point: bar.low,
                acceleration: params.af_start,
            },
            Trend::Bull => {
                let (extreme_point, acceleration) = if bar.high > self.extreme_point {
                    (bar.high, bump(self.acceleration, params))
                } else {
                    (self.extreme_point, self.acceleration)
                };
                Self {
                    sar: tentative.min(prev1.low).min(prev2.low),
                    trend: Trend::Bull,
                    extreme_point,
                    acceleration,
                }
            }
            Trend::Bear if bar.high > tentative => Self {
                sar: self.extreme_point,
                trend: Trend::Bull,
                extreme_point: bar.high,
                acceleration: params.af_start,
            },
            Trend::Bear => {
                let (extreme_point, acceleration) = if bar.low < self.extreme_point {
                    (bar.low, bump(self.acceleration, params))
                } else {
                    (self.extreme_point, self.acceleration)
                };
                Self {
                    sar: tentative.max(prev1.high).max(prev2.high),
                    trend: Trend::Bear,
                    extreme_point,
                    acceleration,
                }
            }
        }
    }
}

fn bump(af: f64, params: &SarParams) -> f64 {
    (af + params.af_step).min(params.af_max)
}

/// Full SAR state per bar, index-aligned with `bars`. Empty input gives an
/// empty trace.
pub fn trace(bars: &[Bar], params: &SarParams) -> Vec<SarPoint> {
    let Some(first) = bars.first() else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(bars.len());
    let mut state = SarPoint::seed(first, params);
    points.push(state);
    for i in 1..bars.len() {
        state = state.step(bars, i, params);
        points.push(state);
    }
    points
}

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    params: SarParams,
    name: String,
}

impl ParabolicSar {
    pub fn new(af_start: f64, af_step: f64, af_max: f64) -> Self {
        assert!(af_start > 0.0, "AF start must be > 0");
        assert!(af_step > 0.0, "AF step must be > 0");
        assert!(af_max >= af_start, "AF max must be >= AF start");
        Self {
            params: SarParams {
                af_start,
                af_step,
                af_max,
            },
            name: format!("psar_{af_start}_{af_step}_{af_max}"),
        }
    }

    pub fn default_params() -> Self {
        let p = SarParams::default();
        Self::new(p.af_start, p.af_step, p.af_max)
    }

    pub fn params(&self) -> &SarParams {
        &self.params
    }
}

impl Indicator for ParabolicSar {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        trace(bars, &self.params).into_iter().map(|p| p.sar).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use chrono::NaiveDate;

    /// Bars with high = close + 1 and low = close - 1.
    fn band_bars(closes: &[f64]) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
            })
            .collect()
    }

    #[test]
    fn psar_seed() {
        let bars = band_bars(&[100.0]);
        let points = trace(&bars, &SarParams::default());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].sar, 99.0);
        assert_eq!(points[0].extreme_point, 101.0);
        assert_eq!(points[0].trend, Trend::Bull);
        assert_eq!(points[0].acceleration, 0.02);
    }

    #[test]
    fn psar_hand_computed_reversal() {
        // Five rising bars, then a sharp fall that pierces the SAR at bar 5.
        let bars = band_bars(&[100.0, 102.0, 104.0, 106.0, 108.0, 96.0, 92.0, 88.0]);
        let p = trace(&bars, &SarParams::default());

        // bar 1: 99 + 0.02*(101-99) = 99.04, clamped to low[0] = 99
        assert_approx(p[1].sar, 99.0, DEFAULT_EPSILON);
        assert_approx(p[1].acceleration, 0.04, DEFAULT_EPSILON);
        // bar 2: 99 + 0.04*(103-99) = 99.16, clamped to low[0] = 99
        assert_approx(p[2].sar, 99.0, DEFAULT_EPSILON);
        // bar 3: 99 + 0.06*(105-99) = 99.36
        assert_approx(p[3].sar, 99.36, DEFAULT_EPSILON);
        // bar 4: 99.36 + 0.08*(107-99.36) = 99.9712
        assert_approx(p[4].sar, 99.9712, DEFAULT_EPSILON);
        assert_approx(p[4].extreme_point, 109.0, DEFAULT_EPSILON);
        assert_approx(p[4].acceleration, 0.10, DEFAULT_EPSILON);

        // bar 5: low 95 < tentative 100.87408 -> reverse, SAR = old EP
        assert_eq!(p[5].trend, Trend::Bear);
        assert_approx(p[5].sar, 109.0, DEFAULT_EPSILON);
        assert_approx(p[5].extreme_point, 95.0, DEFAULT_EPSILON);
        assert_eq!(p[5].acceleration, 0.02);

        // bar 6: 109 - 0.02*14 = 108.72, clamped up to high[4] = 109
        assert_approx(p[6].sar, 109.0, DEFAULT_EPSILON);
        assert_approx(p[6].acceleration, 0.04, DEFAULT_EPSILON);
        // bar 7: 109 - 0.04*18 = 108.28
        assert_approx(p[7].sar, 108.28, DEFAULT_EPSILON);
        assert_eq!(p[7].trend, Trend::Bear);
    }

    #[test]
    fn psar_reversal_tests_unclamped_value() {
        // Flat bars: bar 1's low (49.5) pierces the tentative 49.52 even though
        // the clamp would have pulled the SAR down to 49.5.
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = (0..3)
            .map(|i| Bar {
                date: base_date + chrono::Duration::days(i),
                open: 50.0,
                high: 50.5,
                low: 49.5,
                close: 50.0,
            })
            .collect();
        let p = trace(&bars, &SarParams::default());
        assert_eq!(p[1].trend, Trend::Bear);
        assert_eq!(p[1].sar, 50.5);
        assert_eq!(p[2].trend, Trend::Bull);
        assert_eq!(p[2].sar, 49.5);
    }

    #[test]
    fn psar_uptrend_below_price() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64 * 3.0).collect();
        let bars = band_bars(&closes);
        let result = ParabolicSar::default_params().compute(&bars);
        // Bar 0 is the seed: SAR sits exactly on the first low.
        assert_eq!(result[0], bars[0].low);
        for i in 1..10 {
            assert!(
                result[i] < bars[i].low,
                "PSAR ({}) should be below low ({}) at bar {i} in uptrend",
                result[i],
                bars[i].low,
            );
        }
    }

    #[test]
    fn psar_af_caps_at_max() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bars = band_bars(&closes);
        let points = trace(&bars, &SarParams::default());
        assert_eq!(points.last().unwrap().acceleration, 0.20);
        assert!(points.iter().all(|p| p.acceleration <= 0.20));
    }

    #[test]
    fn psar_empty() {
        assert!(trace(&[], &SarParams::default()).is_empty());
        assert!(ParabolicSar::default_params().compute(&[]).is_empty());
    }
}
