//! Signals read off the latest indicator row.
//!
//! Signals depend only on indicator values for a single bar. They never see
//! other instruments: the market-index trend and a stock's buy rule are
//! independent readings.

pub mod buy_rule;
pub mod trend;

pub use buy_rule::{BuyCheck, BuyRule};
pub use trend::{classify_trend, Action, TrendSummary};
