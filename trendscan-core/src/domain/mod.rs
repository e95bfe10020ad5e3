//! Domain types for TrendScan

pub mod bar;
pub mod listing;
pub mod trend;

pub use bar::Bar;
pub use listing::{Candidate, Listing};
pub use trend::Trend;
