//! End-to-end checks of `compute` on synthetic series with known answers.

use chrono::NaiveDate;
use trendscan_core::domain::{Bar, Trend};
use trendscan_core::indicators::parabolic_sar::{self, SarParams};
use trendscan_core::indicators::{compute, IndicatorError, MIN_BARS};
use trendscan_core::signals::{classify_trend, BuyRule};

fn bars_from_closes(closes: &[f64], half_range: f64) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open: c,
            high: c + half_range,
            low: c - half_range,
            close: c,
        })
        .collect()
}

#[test]
fn short_series_is_not_enough_data() {
    for n in [0, 1, 19, 29] {
        let bars = bars_from_closes(&vec![100.0; n], 0.5);
        assert_eq!(
            compute(&bars).unwrap_err(),
            IndicatorError::NotEnoughData {
                len: n,
                required: MIN_BARS
            }
        );
    }
}

#[test]
fn rising_series_is_bullish_and_passes_buy_rule() {
    // 100.0 -> 139.0, +1/day, high/low = close +/- 0.5
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let series = compute(&bars_from_closes(&closes, 0.5)).unwrap();

    for (i, row) in series.rows().iter().enumerate() {
        assert_eq!(classify_trend(row), Trend::Bull, "bar {i} should be bullish");
    }
    for row in &series.rows()[19..] {
        assert!(row.macd > 0.0);
        assert!(row.macd > row.signal);
    }

    let last = series.latest();
    assert_eq!(last.close(), 139.0);
    assert_eq!(last.ma, Some(129.5));
    assert!(BuyRule.evaluate(last).passes());
}

#[test]
fn flat_series_collapses_and_fails_buy_rule() {
    let series = compute(&bars_from_closes(&[50.0; 40], 0.5)).unwrap();

    for row in series.rows() {
        assert_eq!(row.ema_fast, 50.0);
        assert_eq!(row.ema_slow, 50.0);
        assert_eq!(row.macd, 0.0);
        assert_eq!(row.signal, 0.0);
    }
    for row in &series.rows()[19..] {
        assert_eq!(row.ma, Some(50.0));
        assert_eq!(row.std, Some(0.0));
        assert_eq!(row.upper_band, row.lower_band);
    }

    let check = BuyRule.evaluate(series.latest());
    assert!(!check.above_ma);
    assert!(!check.macd_above_signal);
    assert!(!check.passes());
}

#[test]
fn single_reversal_flips_trend_once() {
    // 15 rising days, then a gap down below the SAR and a steady decline.
    let closes: Vec<f64> = (0..15)
        .map(|i| 100.0 + 2.0 * i as f64)
        .chain((0..20).map(|j| 96.0 - 4.0 * j as f64 / 2.0))
        .collect();
    let bars = bars_from_closes(&closes, 1.0);
    let series = compute(&bars).unwrap();

    let trends: Vec<Trend> = series.rows().iter().map(classify_trend).collect();
    let flips: Vec<usize> = (1..trends.len())
        .filter(|&i| trends[i] != trends[i - 1])
        .collect();
    assert_eq!(flips, vec![15]);
    assert_eq!(trends[0], Trend::Bull);
    assert_eq!(trends[15], Trend::Bear);

    let points = parabolic_sar::trace(&bars, &SarParams::default());
    let internal_flips: Vec<usize> = (1..points.len())
        .filter(|&i| points[i].trend != points[i - 1].trend)
        .collect();
    assert_eq!(internal_flips, vec![15]);
    assert_eq!(points[15].acceleration, 0.02);
    // the prior bull extreme (high of bar 14) becomes the bear SAR
    assert_eq!(points[15].sar, 129.0);
}

#[test]
fn compute_is_deterministic() {
    let closes: Vec<f64> = (0..60).map(|i| 80.0 + (i as f64 * 0.7).cos() * 6.0).collect();
    let bars = bars_from_closes(&closes, 1.25);
    assert_eq!(compute(&bars).unwrap(), compute(&bars).unwrap());
}
