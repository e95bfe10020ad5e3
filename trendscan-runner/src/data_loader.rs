//! Per-symbol loading: fetch bars from a provider, then run the indicator
//! engine over them.

use thiserror::Error;
use trendscan_core::data::{DataError, DataProvider, LookbackWindow};
use trendscan_core::indicators::{compute_with, IndicatorError, IndicatorParams, IndicatorSeries};

/// Errors from loading a single symbol.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data unavailable for '{symbol}': {source}")]
    Data {
        symbol: String,
        #[source]
        source: DataError,
    },

    #[error("cannot evaluate '{symbol}': {source}")]
    Indicator {
        symbol: String,
        #[source]
        source: IndicatorError,
    },
}

impl LoadError {
    /// Bars available when the series was too short, if that is the cause.
    pub fn bars_available(&self) -> Option<usize> {
        match self {
            LoadError::Indicator {
                source: IndicatorError::NotEnoughData { len, .. },
                ..
            } => Some(*len),
            LoadError::Data { .. } => None,
        }
    }
}

/// Fetch `symbol` over `window` and compute its indicator series.
pub fn load_series(
    provider: &dyn DataProvider,
    symbol: &str,
    window: LookbackWindow,
    params: &IndicatorParams,
) -> Result<IndicatorSeries, LoadError> {
    let fetched = provider
        .fetch(symbol, window)
        .map_err(|source| LoadError::Data {
            symbol: symbol.to_string(),
            source,
        })?;

    compute_with(&fetched.bars, params).map_err(|source| LoadError::Indicator {
        symbol: symbol.to_string(),
        source,
    })
}
