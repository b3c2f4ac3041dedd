#![warn(missing_docs)]
//! inkprof Delta-E Analysis Engine
//!
//! Turns the text report written by ArgyllCMS `profcheck` into a statistical
//! quality summary:
//! - Per-patch ΔE extraction from the loosely structured report text
//! - Nearest-rank percentile values (90th/95th/98th/99th)
//! - Threshold counts for the perceptual ΔE bands (<1.0, <2.0, <3.0)
//!
//! The crate performs no I/O. Callers hand in the full report text and
//! receive a [`DeltaSummary`] (or a typed failure) back.

mod parse;
mod summary;

pub use parse::{DeltaSample, parse_report};
pub use summary::{DeltaSummary, SummaryError, percentile_from_sorted, summarize};

/// ΔE bands used for the patch-count analysis, in ascending order.
///
/// ΔE < 1.0 is generally considered visually indistinguishable; ΔE > 2.0 is
/// a clearly visible difference on most printer classes.
pub const DELTA_E_BANDS: [f64; 3] = [1.0, 2.0, 3.0];

/// Percentiles reported by the summary, worst-tail oriented.
pub const REPORT_PERCENTILES: [u32; 4] = [90, 95, 98, 99];
