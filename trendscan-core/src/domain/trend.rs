//! Trend state of an instrument on a given bar.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Bull,
    Bear,
}

impl Trend {
    pub fn is_bullish(self) -> bool {
        matches!(self, Trend::Bull)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bull => f.write_str("bullish"),
            Trend::Bear => f.write_str("bearish"),
        }
    }
}
