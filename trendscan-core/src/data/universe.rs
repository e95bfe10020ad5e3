//! Ranked universe sources: the list of symbols a scan starts from.

use serde::{Deserialize, Serialize};

use super::provider::DataError;
use crate::domain::Listing;

/// Source of listings ranked by traded value, most active first.
pub trait UniverseSource: Send + Sync {
    fn name(&self) -> &str;

    /// The `n` most actively traded listings, in rank order.
    fn top_by_turnover(&self, n: usize) -> Result<Vec<Listing>, DataError>;
}

/// Sort by traded value descending (stable, so ties keep feed order) and
/// keep the first `n`.
pub fn rank_by_turnover(mut listings: Vec<Listing>, n: usize) -> Vec<Listing> {
    listings.sort_by(|a, b| b.trade_value.total_cmp(&a.trade_value));
    listings.truncate(n);
    listings
}

/// A fixed, already ranked list of listings (from configuration).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticUniverse {
    pub listings: Vec<Listing>,
}

impl StaticUniverse {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn from_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            listings: codes.into_iter().map(|c| Listing::new(c, c)).collect(),
        }
    }
}

impl UniverseSource for StaticUniverse {
    fn name(&self) -> &str {
        "static"
    }

    /// Configured order is the rank order.
    fn top_by_turnover(&self, n: usize) -> Result<Vec<Listing>, DataError> {
        if self.listings.is_empty() {
            return Err(DataError::Other("static universe has no listings".into()));
        }
        Ok(self.listings.iter().take(n).cloned().collect())
    }
}
