//! Single-instrument analysis: the latest trend reading plus the full series
//! for export.

use chrono::NaiveDate;
use serde::Serialize;
use trendscan_core::data::{DataProvider, LookbackWindow};
use trendscan_core::indicators::{IndicatorParams, IndicatorSeries};
use trendscan_core::signals::{BuyCheck, BuyRule, TrendSummary};

use crate::data_loader::{load_series, LoadError};
use crate::screen::Screener;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub symbol: String,
    /// Date of the latest bar.
    pub date: NaiveDate,
    pub summary: TrendSummary,
    /// Buy conditions on the latest bar, for display only.
    pub buy_check: BuyCheck,
    pub series: IndicatorSeries,
}

pub fn analyze(
    provider: &dyn DataProvider,
    symbol: &str,
    window: LookbackWindow,
    params: &IndicatorParams,
) -> Result<Analysis, LoadError> {
    let series = load_series(provider, symbol, window, params)?;
    let latest = series.latest();
    Ok(Analysis {
        symbol: symbol.to_string(),
        date: latest.bar.date,
        summary: TrendSummary::from_row(latest),
        buy_check: BuyRule.evaluate(latest),
        series,
    })
}

impl Screener {
    /// Analyze a listing code with this screener's provider, window,
    /// parameters and symbol suffix.
    pub fn analyze(&self, code: &str) -> Result<Analysis, LoadError> {
        analyze(
            self.provider(),
            &self.symbol_for(code),
            self.window(),
            self.params(),
        )
    }
}
