//! CSV price-series provider: one `<symbol>.csv` per instrument with a
//! `date,open,high,low,close` header. Extra columns are ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::canonicalize::canonicalize;
use super::provider::{DataError, DataProvider, DataSource, FetchResult, LookbackWindow};
use crate::domain::Bar;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: chrono::NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    /// Write bars as `<symbol>.csv`, replacing any existing file.
    pub fn write(&self, symbol: &str, bars: &[Bar]) -> Result<PathBuf, DataError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(symbol);
        let mut wtr = csv::Writer::from_path(&path).map_err(csv_error)?;
        for bar in bars {
            wtr.serialize(bar).map_err(csv_error)?;
        }
        wtr.flush()?;
        Ok(path)
    }
}

fn csv_error(e: csv::Error) -> DataError {
    DataError::ResponseFormat(format!("csv: {e}"))
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, symbol: &str, window: LookbackWindow) -> Result<FetchResult, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let mut rdr = csv::Reader::from_path(&path).map_err(csv_error)?;
        let mut bars = Vec::new();
        for row in rdr.deserialize::<CsvRow>() {
            let row = row.map_err(csv_error)?;
            if window.contains(row.date) {
                bars.push(Bar::new(row.date, row.open, row.high, row.low, row.close));
            }
        }

        let bars = canonicalize(bars);
        if bars.is_empty() {
            return Err(DataError::EmptySeries {
                symbol: symbol.to_string(),
            });
        }
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }

    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }
}
