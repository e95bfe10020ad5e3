//! Listings (ranked universe rows) and screening candidates.

use serde::{Deserialize, Serialize};

/// One instrument in the ranked universe, as reported by the exchange feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub code: String,
    pub name: String,
    /// Traded value for the session; the ranking key.
    #[serde(default)]
    pub trade_value: f64,
    #[serde(default)]
    pub closing_price: f64,
}

impl Listing {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            trade_value: 0.0,
            closing_price: 0.0,
        }
    }
}

/// An instrument that passed the buy rule on its latest bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub code: String,
    pub name: String,
    /// Close of the latest bar used for the evaluation.
    pub price: f64,
}
