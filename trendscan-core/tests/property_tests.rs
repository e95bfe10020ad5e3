//! Property tests for indicator invariants.
//!
//! Uses proptest to verify:
//! 1. Short series are always rejected
//! 2. SAR acceleration factor: bounded, non-decreasing within a trend run,
//!    reset to the start value on every reversal
//! 3. Constant prices give exact EMAs and a zero MACD
//! 4. Indicator rows are causal for arbitrary walks

use chrono::NaiveDate;
use proptest::prelude::*;
use trendscan_core::domain::Bar;
use trendscan_core::indicators::parabolic_sar::{self, SarParams};
use trendscan_core::indicators::{compute, IndicatorError, MIN_BARS};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random walk of (close, half-range) pairs turned into bars.
fn arb_bars(min: usize, max: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((-3.0..3.0_f64, 0.05..2.5_f64), min..max).prop_map(|steps| {
        let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let mut price = 100.0_f64;
        steps
            .into_iter()
            .enumerate()
            .map(|(i, (change, half_range))| {
                let open = price;
                price = (price + change).max(5.0);
                Bar {
                    date: base_date + chrono::Duration::days(i as i64),
                    open,
                    high: open.max(price) + half_range,
                    low: open.min(price) - half_range,
                    close: price,
                }
            })
            .collect()
    })
}

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..2000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

// ── 1. Burn-in ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn short_series_rejected(bars in arb_bars(0, MIN_BARS)) {
        let err = compute(&bars).unwrap_err();
        prop_assert_eq!(err, IndicatorError::NotEnoughData { len: bars.len(), required: MIN_BARS });
    }

    #[test]
    fn long_series_index_aligned(bars in arb_bars(MIN_BARS, 150)) {
        let series = compute(&bars).unwrap();
        prop_assert_eq!(series.len(), bars.len());
        prop_assert!(series.rows()[..19].iter().all(|r| r.ma.is_none()));
        prop_assert!(series.rows()[19..].iter().all(|r| r.ma.is_some()));
    }
}

// ── 2. SAR acceleration factor ───────────────────────────────────────

proptest! {
    #[test]
    fn acceleration_factor_schedule(bars in arb_bars(2, 200)) {
        let params = SarParams::default();
        let points = parabolic_sar::trace(&bars, &params);
        prop_assert_eq!(points[0].acceleration, params.af_start);

        for i in 1..points.len() {
            let (prev, cur) = (points[i - 1], points[i]);
            prop_assert!(cur.acceleration <= params.af_max);
            prop_assert!(cur.acceleration >= params.af_start);
            if cur.trend != prev.trend {
                prop_assert_eq!(cur.acceleration, params.af_start);
            } else {
                prop_assert!(cur.acceleration >= prev.acceleration);
            }
        }
    }

    #[test]
    fn sar_clamped_outside_previous_bars(bars in arb_bars(3, 120)) {
        let points = parabolic_sar::trace(&bars, &SarParams::default());
        for i in 2..points.len() {
            let (prev, cur) = (points[i - 1], points[i]);
            if cur.trend != prev.trend {
                continue;
            }
            if cur.trend.is_bullish() {
                prop_assert!(cur.sar <= bars[i - 1].low && cur.sar <= bars[i - 2].low);
            } else {
                prop_assert!(cur.sar >= bars[i - 1].high && cur.sar >= bars[i - 2].high);
            }
        }
    }
}

// ── 3. Constant prices ───────────────────────────────────────────────

proptest! {
    #[test]
    fn constant_prices_converge_exactly(price in arb_price(), n in MIN_BARS..90usize) {
        let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let bars: Vec<Bar> = (0..n)
            .map(|i| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: price,
                high: price * 1.01,
                low: price * 0.99,
                close: price,
            })
            .collect();
        let series = compute(&bars).unwrap();
        for row in series.rows() {
            prop_assert_eq!(row.ema_fast, price);
            prop_assert_eq!(row.ema_slow, price);
            prop_assert_eq!(row.macd, 0.0);
            prop_assert_eq!(row.signal, 0.0);
        }
    }
}

// ── 4. Causality ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rows_are_causal(bars in arb_bars(MIN_BARS + 1, 120), cut_frac in 0.0..1.0_f64) {
        let cut = MIN_BARS + ((bars.len() - MIN_BARS) as f64 * cut_frac) as usize;
        let full = compute(&bars).unwrap();
        let truncated = compute(&bars[..cut]).unwrap();
        prop_assert_eq!(truncated.rows(), &full.rows()[..cut]);
    }
}
