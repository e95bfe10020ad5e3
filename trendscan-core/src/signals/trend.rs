//! Trend classification and the advice derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Trend;
use crate::indicators::IndicatorRow;

/// Bull iff close > SAR on the given row.
pub fn classify_trend(row: &IndicatorRow) -> Trend {
    row.trend()
}

/// Suggested action for a trend state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Price holds above the stop: buy or keep holding.
    BuyOrHold,
    /// Price is below the SAR: stay out until it breaks above.
    WaitForBreakout,
}

impl From<Trend> for Action {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Bull => Action::BuyOrHold,
            Trend::Bear => Action::WaitForBreakout,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::BuyOrHold => f.write_str("buy / hold"),
            Action::WaitForBreakout => f.write_str("stand aside / wait for breakout"),
        }
    }
}

/// Trend reading for the latest bar of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub close: f64,
    /// SAR doubles as the stop level in a bull trend and the breakout level
    /// in a bear trend.
    pub sar: f64,
    pub trend: Trend,
    pub action: Action,
}

impl TrendSummary {
    pub fn from_row(row: &IndicatorRow) -> Self {
        let trend = classify_trend(row);
        Self {
            close: row.close(),
            sar: row.sar,
            trend,
            action: trend.into(),
        }
    }
}
