//! Boundary sanitizer for provider output.
//!
//! The indicator engine assumes well-formed input, so every provider passes
//! its bars through [`canonicalize`] before returning them.

use crate::domain::Bar;

/// Drop rows that fail [`Bar::is_sane`], sort ascending by date and keep the
/// first row for any duplicated date.
pub fn canonicalize(mut bars: Vec<Bar>) -> Vec<Bar> {
    bars.retain(Bar::is_sane);
    // Stable sort keeps the provider's original order among equal dates.
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    bars
}

/// True if `bars` is already canonical.
pub fn is_canonical(bars: &[Bar]) -> bool {
    bars.iter().all(Bar::is_sane) && bars.windows(2).all(|w| w[0].date < w[1].date)
}
