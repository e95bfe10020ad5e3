//! Export: indicator series as CSV, scan reports as JSON.
//!
//! These are the hand-off to whatever renders charts or tables downstream.
//! Undefined band values (warm-up) are written as empty CSV fields.

use std::path::Path;

use anyhow::{Context, Result};
use trendscan_core::indicators::IndicatorSeries;

use crate::screen::ScanReport;

const SERIES_HEADER: [&str; 17] = [
    "date",
    "open",
    "high",
    "low",
    "close",
    "ema_fast",
    "ema_slow",
    "macd",
    "signal",
    "histogram",
    "ma",
    "std",
    "upper_band",
    "lower_band",
    "sar",
    "trend",
    "buy_signal",
];

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

/// One CSV row per bar, oldest first.
pub fn export_series_csv(series: &IndicatorSeries) -> Result<String> {
    let rule = trendscan_core::signals::BuyRule;
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(SERIES_HEADER)?;

    for row in series.rows() {
        let bar = &row.bar;
        wtr.write_record([
            bar.date.to_string(),
            format!("{:.6}", bar.open),
            format!("{:.6}", bar.high),
            format!("{:.6}", bar.low),
            format!("{:.6}", bar.close),
            format!("{:.6}", row.ema_fast),
            format!("{:.6}", row.ema_slow),
            format!("{:.6}", row.macd),
            format!("{:.6}", row.signal),
            format!("{:.6}", row.histogram()),
            fmt_opt(row.ma),
            fmt_opt(row.std),
            fmt_opt(row.upper_band),
            fmt_opt(row.lower_band),
            format!("{:.6}", row.sar),
            row.trend().to_string(),
            rule.evaluate(row).passes().to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Pretty JSON for a scan report, every outcome included.
pub fn export_scan_json(report: &ScanReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize scan report to JSON")
}

/// Write an exported artifact, creating parent directories as needed.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
