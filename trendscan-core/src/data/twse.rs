//! Taiwan Stock Exchange daily-summary feed (`STOCK_DAY_ALL`).
//!
//! The feed is a JSON array of objects whose numeric fields are strings with
//! thousands separators, e.g. `"TradeValue": "12,345,678"`. Empty strings are
//! read as zero; rows that still fail to parse are skipped.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::provider::DataError;
use super::universe::{rank_by_turnover, UniverseSource};
use crate::domain::Listing;

pub const STOCK_DAY_ALL_URL: &str = "https://openapi.twse.com.tw/v1/exchangeReport/STOCK_DAY_ALL";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DayRow {
    code: String,
    name: String,
    #[serde(default)]
    trade_value: String,
    #[serde(default)]
    closing_price: String,
}

/// Parse a numeric feed field: strip separators, treat blank as zero.
pub fn parse_feed_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a `STOCK_DAY_ALL` body into listings, in feed order.
pub fn parse_listings(body: &str) -> Result<Vec<Listing>, DataError> {
    let rows: Vec<DayRow> = serde_json::from_str(body)
        .map_err(|e| DataError::ResponseFormat(format!("STOCK_DAY_ALL: {e}")))?;

    let listings = rows
        .into_iter()
        .filter_map(|row| {
            let trade_value = parse_feed_number(&row.trade_value);
            let closing_price = parse_feed_number(&row.closing_price);
            match (trade_value, closing_price) {
                (Some(trade_value), Some(closing_price)) => Some(Listing {
                    code: row.code.trim().to_string(),
                    name: row.name.trim().to_string(),
                    trade_value,
                    closing_price,
                }),
                _ => {
                    debug!(code = %row.code, "skipping feed row with malformed numbers");
                    None
                }
            }
        })
        .collect();
    Ok(listings)
}

pub struct TwseUniverse {
    client: reqwest::blocking::Client,
    url: String,
}

impl TwseUniverse {
    pub fn new(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: STOCK_DAY_ALL_URL.to_string(),
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl UniverseSource for TwseUniverse {
    fn name(&self) -> &str {
        "twse"
    }

    fn top_by_turnover(&self, n: usize) -> Result<Vec<Listing>, DataError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(DataError::Other(format!(
                "HTTP {} from STOCK_DAY_ALL",
                resp.status()
            )));
        }
        let body = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let listings = parse_listings(&body)?;
        debug!(rows = listings.len(), "parsed STOCK_DAY_ALL");
        Ok(rank_by_turnover(listings, n))
    }
}
