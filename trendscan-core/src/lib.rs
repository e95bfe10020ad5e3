//! TrendScan Core: indicator engine, trend signals and data sources.
//!
//! This crate contains:
//! - Domain types (bars, listings, candidates, trend state)
//! - The indicator engine: EMA/MACD, Bollinger Bands, Parabolic SAR
//! - Signals read off the latest indicator row (trend, buy rule)
//! - Price-series providers (Yahoo, CSV, in-memory) and ranked universes

pub mod data;
pub mod domain;
pub mod indicators;
pub mod signals;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types crossing the scan worker pool are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Listing>();
        require_sync::<domain::Listing>();
        require_send::<domain::Candidate>();
        require_sync::<domain::Candidate>();

        require_send::<indicators::IndicatorSeries>();
        require_sync::<indicators::IndicatorSeries>();
        require_send::<indicators::IndicatorParams>();
        require_sync::<indicators::IndicatorParams>();
        require_send::<signals::BuyCheck>();
        require_sync::<signals::BuyCheck>();

        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::CsvProvider>();
        require_sync::<data::CsvProvider>();
        require_send::<data::MemoryProvider>();
        require_sync::<data::MemoryProvider>();
        require_send::<data::TwseUniverse>();
        require_sync::<data::TwseUniverse>();
    }
}
