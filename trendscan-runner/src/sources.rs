//! Turn a [`ScanConfig`] into live collaborators: the price provider, the
//! ranked universe and a configured [`Screener`].

use std::sync::Arc;

use chrono::NaiveDate;
use trendscan_core::data::{
    CircuitBreaker, CsvProvider, DataError, DataProvider, LookbackWindow, StaticUniverse,
    TwseUniverse, UniverseSource, YahooProvider,
};

use crate::config::{ProviderKind, ScanConfig, UniverseKind};
use crate::screen::Screener;

pub fn build_provider(config: &ScanConfig) -> Result<Arc<dyn DataProvider>, DataError> {
    Ok(match config.data.provider {
        ProviderKind::Yahoo => {
            let breaker = Arc::new(CircuitBreaker::default_provider());
            Arc::new(YahooProvider::new(breaker, config.data.timeout())?)
        }
        ProviderKind::Csv => Arc::new(CsvProvider::new(&config.data.csv_dir)),
    })
}

pub fn build_universe(config: &ScanConfig) -> Result<Box<dyn UniverseSource>, DataError> {
    Ok(match config.universe.source {
        UniverseKind::Twse => Box::new(TwseUniverse::new(config.data.timeout())?),
        UniverseKind::Static => Box::new(StaticUniverse::new(config.universe.symbols.clone())),
    })
}

/// The configured lookback, ending at `today`.
pub fn lookback_window(config: &ScanConfig, today: NaiveDate) -> LookbackWindow {
    LookbackWindow::trailing_months(config.data.lookback_months, today)
}

pub fn build_screener(
    config: &ScanConfig,
    provider: Arc<dyn DataProvider>,
    today: NaiveDate,
) -> Screener {
    Screener::new(provider, lookback_window(config, today))
        .with_params(config.indicators)
        .with_symbol_suffix(config.data.symbol_suffix.clone())
        .with_workers(config.scan.workers)
}
