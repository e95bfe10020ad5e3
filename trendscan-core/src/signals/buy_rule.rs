//! The "strong buy" screen: close above SAR, close above the moving average,
//! MACD above its signal line. All three must hold.

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorRow;

/// Which buy conditions held on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyCheck {
    pub above_sar: bool,
    pub above_ma: bool,
    pub macd_above_signal: bool,
}

impl BuyCheck {
    pub fn passes(&self) -> bool {
        self.above_sar && self.above_ma && self.macd_above_signal
    }

    /// Number of conditions that held (0..=3).
    pub fn score(&self) -> u8 {
        self.above_sar as u8 + self.above_ma as u8 + self.macd_above_signal as u8
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuyRule;

impl BuyRule {
    pub fn name(&self) -> &str {
        "sar_ma_macd"
    }

    /// One-line statement of the rule, printed under a candidate list.
    pub fn criteria(&self) -> &'static str {
        "close above SAR + close above the 20-day MA + MACD above its signal line"
    }

    /// Strict inequalities throughout. A row without a moving average (band
    /// warm-up) fails `above_ma`.
    pub fn evaluate(&self, row: &IndicatorRow) -> BuyCheck {
        let close = row.close();
        BuyCheck {
            above_sar: close > row.sar,
            above_ma: row.ma.is_some_and(|ma| close > ma),
            macd_above_signal: row.macd > row.signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use chrono::NaiveDate;

    fn row(close: f64, sar: f64, ma: Option<f64>, macd: f64, signal: f64) -> IndicatorRow {
        IndicatorRow {
            bar: Bar::new(
                NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                close,
                close + 1.0,
                close - 1.0,
                close,
            ),
            ema_fast: close,
            ema_slow: close,
            macd,
            signal,
            ma,
            std: Some(1.0),
            upper_band: ma.map(|m| m + 2.0),
            lower_band: ma.map(|m| m - 2.0),
            sar,
        }
    }

    #[test]
    fn all_three_pass() {
        let check = BuyRule.evaluate(&row(100.0, 95.0, Some(98.0), 0.5, 0.2));
        assert!(check.passes());
        assert_eq!(check.score(), 3);
    }

    #[test]
    fn any_two_of_three_fail() {
        // below SAR
        let check = BuyRule.evaluate(&row(100.0, 101.0, Some(98.0), 0.5, 0.2));
        assert_eq!(check.score(), 2);
        assert!(!check.passes());
        // below MA
        let check = BuyRule.evaluate(&row(100.0, 95.0, Some(102.0), 0.5, 0.2));
        assert_eq!(check.score(), 2);
        assert!(!check.passes());
        // MACD under signal
        let check = BuyRule.evaluate(&row(100.0, 95.0, Some(98.0), 0.1, 0.2));
        assert_eq!(check.score(), 2);
        assert!(!check.passes());
    }

    #[test]
    fn criteria_names_every_condition() {
        let rule = BuyRule;
        assert_eq!(rule.name(), "sar_ma_macd");
        for part in ["SAR", "MA", "MACD"] {
            assert!(rule.criteria().contains(part), "missing {part}");
        }
    }

    #[test]
    fn ties_fail() {
        let check = BuyRule.evaluate(&row(100.0, 100.0, Some(100.0), 0.2, 0.2));
        assert_eq!(check.score(), 0);
    }

    #[test]
    fn missing_ma_fails() {
        let check = BuyRule.evaluate(&row(100.0, 95.0, None, 0.5, 0.2));
        assert!(!check.above_ma);
        assert!(!check.passes());
    }
}
