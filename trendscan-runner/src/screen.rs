//! Screening pipeline.
//!
//! Every listing in a ranked batch gets exactly one [`CandidateOutcome`]:
//! per-symbol failures are recorded, never propagated. Only losing the
//! universe itself (or the worker pool) fails the batch.
//!
//! Listings are independent, so evaluation fans out over a bounded rayon
//! pool. `par_iter().collect()` keeps input order, so rank order survives
//! regardless of which worker finishes first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use trendscan_core::data::{DataError, DataProvider, LookbackWindow, UniverseSource};
use trendscan_core::domain::{Candidate, Listing};
use trendscan_core::indicators::IndicatorParams;
use trendscan_core::signals::{BuyCheck, BuyRule};

use crate::data_loader::{load_series, LoadError};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("universe '{source_name}' unavailable: {source}")]
    UniverseUnavailable {
        source_name: String,
        #[source]
        source: DataError,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// What happened to one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateOutcome {
    /// All three buy conditions held on the latest bar.
    Passed(Candidate),
    /// Evaluated, but at least one buy condition failed.
    Rejected(BuyCheck),
    /// Too little history to compute indicators.
    NotEnoughData { bars: usize },
    /// The provider could not deliver bars.
    RetrievalFailed { reason: String },
    /// The batch was cancelled before this listing was evaluated.
    Cancelled,
}

impl CandidateOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CandidateOutcome::Passed(_))
    }

    fn from_load_error(err: LoadError) -> Self {
        match err.bars_available() {
            Some(bars) => CandidateOutcome::NotEnoughData { bars },
            None => CandidateOutcome::RetrievalFailed {
                reason: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenEntry {
    pub listing: Listing,
    pub outcome: CandidateOutcome,
}

/// Tally of outcomes in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub passed: usize,
    pub rejected: usize,
    pub not_enough_data: usize,
    pub retrieval_failed: usize,
    pub cancelled: usize,
}

/// One entry per screened listing, in input (rank) order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenReport {
    pub entries: Vec<ScreenEntry>,
}

impl ScreenReport {
    /// Passing candidates, in rank order.
    pub fn candidates(&self) -> Vec<&Candidate> {
        self.entries
            .iter()
            .filter_map(|e| match &e.outcome {
                CandidateOutcome::Passed(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for entry in &self.entries {
            match entry.outcome {
                CandidateOutcome::Passed(_) => counts.passed += 1,
                CandidateOutcome::Rejected(_) => counts.rejected += 1,
                CandidateOutcome::NotEnoughData { .. } => counts.not_enough_data += 1,
                CandidateOutcome::RetrievalFailed { .. } => counts.retrieval_failed += 1,
                CandidateOutcome::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }

    pub fn was_cancelled(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.outcome == CandidateOutcome::Cancelled)
    }
}

/// Applies the buy rule to a batch of listings.
pub struct Screener {
    provider: Arc<dyn DataProvider>,
    window: LookbackWindow,
    params: IndicatorParams,
    symbol_suffix: String,
    workers: usize,
    rule: BuyRule,
}

impl Screener {
    /// Single worker, default indicator parameters, no symbol suffix.
    pub fn new(provider: Arc<dyn DataProvider>, window: LookbackWindow) -> Self {
        Self {
            provider,
            window,
            params: IndicatorParams::default(),
            symbol_suffix: String::new(),
            workers: 1,
            rule: BuyRule,
        }
    }

    pub fn with_params(mut self, params: IndicatorParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_symbol_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.symbol_suffix = suffix.into();
        self
    }

    /// Clamped to at least one worker.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn provider(&self) -> &dyn DataProvider {
        self.provider.as_ref()
    }

    pub fn window(&self) -> LookbackWindow {
        self.window
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Provider symbol for a listing code ("2330" -> "2330.TW").
    pub fn symbol_for(&self, code: &str) -> String {
        format!("{code}{}", self.symbol_suffix)
    }

    /// Load, compute and judge a single listing.
    pub fn evaluate(&self, listing: &Listing) -> CandidateOutcome {
        let symbol = self.symbol_for(&listing.code);
        let outcome = match load_series(self.provider.as_ref(), &symbol, self.window, &self.params)
        {
            Ok(series) => {
                let row = series.latest();
                let check = self.rule.evaluate(row);
                if check.passes() {
                    CandidateOutcome::Passed(Candidate {
                        code: listing.code.clone(),
                        name: listing.name.clone(),
                        price: row.close(),
                    })
                } else {
                    CandidateOutcome::Rejected(check)
                }
            }
            Err(err) => CandidateOutcome::from_load_error(err),
        };
        debug!(symbol = %symbol, outcome = ?outcome, "screened");
        outcome
    }

    fn evaluate_unless_cancelled(
        &self,
        listing: &Listing,
        cancel: Option<&AtomicBool>,
    ) -> ScreenEntry {
        let outcome = if cancel.is_some_and(|f| f.load(Ordering::Relaxed)) {
            CandidateOutcome::Cancelled
        } else {
            self.evaluate(listing)
        };
        ScreenEntry {
            listing: listing.clone(),
            outcome,
        }
    }

    /// Screen `listings`, one outcome each, in input order.
    ///
    /// Listings not yet started when `cancel` is raised are marked
    /// [`CandidateOutcome::Cancelled`]; evaluations already running finish.
    pub fn screen(
        &self,
        listings: &[Listing],
        cancel: Option<&AtomicBool>,
    ) -> Result<ScreenReport, ScanError> {
        let entries: Vec<ScreenEntry> = if self.workers > 1 && listings.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()?;
            pool.install(|| {
                listings
                    .par_iter()
                    .map(|listing| self.evaluate_unless_cancelled(listing, cancel))
                    .collect()
            })
        } else {
            listings
                .iter()
                .map(|listing| self.evaluate_unless_cancelled(listing, cancel))
                .collect()
        };

        let report = ScreenReport { entries };
        let counts = report.counts();
        info!(
            screened = listings.len(),
            passed = counts.passed,
            rejected = counts.rejected,
            not_enough_data = counts.not_enough_data,
            retrieval_failed = counts.retrieval_failed,
            cancelled = counts.cancelled,
            "screen complete"
        );
        Ok(report)
    }
}

/// Result of a full scan: the ranked batch that was screened and its outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub universe: String,
    pub provider: String,
    pub window: LookbackWindow,
    pub screen: ScreenReport,
}

impl ScanReport {
    pub fn candidates(&self) -> Vec<&Candidate> {
        self.screen.candidates()
    }
}

/// Fetch the top `top_n` listings by turnover and screen them.
pub fn run_scan(
    universe: &dyn UniverseSource,
    screener: &Screener,
    top_n: usize,
    cancel: Option<&AtomicBool>,
) -> Result<ScanReport, ScanError> {
    let listings =
        universe
            .top_by_turnover(top_n)
            .map_err(|source| ScanError::UniverseUnavailable {
                source_name: universe.name().to_string(),
                source,
            })?;
    debug!(universe = universe.name(), listings = listings.len(), "universe loaded");

    let screen = screener.screen(&listings, cancel)?;
    Ok(ScanReport {
        universe: universe.name().to_string(),
        provider: screener.provider().name().to_string(),
        window: screener.window(),
        screen,
    })
}
