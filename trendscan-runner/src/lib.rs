//! TrendScan Runner: scan orchestration on top of `trendscan-core`.
//!
//! This crate provides:
//! - TOML scan configuration
//! - Per-symbol loading (provider fetch + indicator engine)
//! - The screening pipeline over a bounded worker pool
//! - Market-index assessment and single-symbol analysis
//! - CSV/JSON export of series and scan reports

pub mod analysis;
pub mod config;
pub mod data_loader;
pub mod export;
pub mod market;
pub mod screen;
pub mod sources;

pub use analysis::{analyze, Analysis};
pub use config::{ConfigError, ProviderKind, ScanConfig, UniverseKind};
pub use data_loader::{load_series, LoadError};
pub use export::{export_scan_json, export_series_csv, write_artifact};
pub use market::{assess_market, MarketAssessment};
pub use screen::{
    run_scan, CandidateOutcome, OutcomeCounts, ScanError, ScanReport, ScreenEntry, ScreenReport,
    Screener,
};
pub use sources::{build_provider, build_screener, build_universe, lookback_window};
