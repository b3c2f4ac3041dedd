//! Distribution Summary
//!
//! Computes the quality summary over a parsed ΔE sample: extremes,
//! worst-tail percentiles, and threshold counts for the perceptual bands.
//!
//! Percentiles use the nearest-rank-by-ceiling method: for percentile `p`
//! over `n` patches, `position = ceil(n * p/100)` counted from the worst
//! (largest) end. This matches the established report format consumed by
//! downstream tooling; it is deliberately not an interpolated percentile.

use crate::parse::DeltaSample;
use thiserror::Error;

/// Failure to summarize a sample.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// No ΔE values were found in the report. The caller should treat this
    /// as a report-quality problem (e.g. re-run verification), not render
    /// statistics.
    #[error("no delta E values found in verification report")]
    EmptySample,
}

/// Read-only statistical aggregate of one verification run.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaSummary {
    /// Worst patch deviation (first element of the descending sample).
    pub largest: f64,
    /// Best patch deviation (last element of the descending sample).
    pub smallest: f64,
    /// 90th percentile ΔE, or `None` when the rank is unavailable.
    pub p90: Option<f64>,
    /// 95th percentile ΔE.
    pub p95: Option<f64>,
    /// 98th percentile ΔE.
    pub p98: Option<f64>,
    /// 99th percentile ΔE.
    pub p99: Option<f64>,
    /// Patches with ΔE strictly below 1.0.
    pub count_below_1: usize,
    /// Patches with ΔE strictly below 2.0.
    pub count_below_2: usize,
    /// Patches with ΔE strictly below 3.0.
    pub count_below_3: usize,
    /// `count_below_1` as a percentage of the sample.
    pub percent_below_1: f64,
    /// `count_below_2` as a percentage of the sample.
    pub percent_below_2: f64,
    /// `count_below_3` as a percentage of the sample.
    pub percent_below_3: f64,
    /// Total number of patches in the sample.
    pub sample_count: usize,
}

/// Nearest-rank percentile over a descending-sorted slice.
///
/// Returns `None` when the computed rank falls outside the sample — an
/// unavailable value, not an error.
pub fn percentile_from_sorted(descending: &[f64], percent: u32) -> Option<f64> {
    let n = descending.len();
    let position = (n as f64 * percent as f64 / 100.0).ceil() as usize;
    if position == 0 || position > n {
        return None;
    }
    Some(descending[n - position])
}

/// Summarize a non-empty ΔE sample.
///
/// The upstream tool emits the sample sorted descending, but that invariant
/// is not enforced at parse time. Rather than trusting it blindly, an
/// out-of-order sample is summarized over a descending-sorted copy.
pub fn summarize(sample: &DeltaSample) -> Result<DeltaSummary, SummaryError> {
    if sample.is_empty() {
        return Err(SummaryError::EmptySample);
    }

    let sorted_copy;
    let values: &[f64] = if sample.is_sorted_descending() {
        sample.values()
    } else {
        let mut v = sample.values().to_vec();
        v.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        sorted_copy = v;
        &sorted_copy
    };

    let n = values.len();
    let count_below = |threshold: f64| values.iter().filter(|&&v| v < threshold).count();
    let percent = |count: usize| (count as f64 / n as f64) * 100.0;

    let count_below_1 = count_below(1.0);
    let count_below_2 = count_below(2.0);
    let count_below_3 = count_below(3.0);

    Ok(DeltaSummary {
        largest: values[0],
        smallest: values[n - 1],
        p90: percentile_from_sorted(values, 90),
        p95: percentile_from_sorted(values, 95),
        p98: percentile_from_sorted(values, 98),
        p99: percentile_from_sorted(values, 99),
        count_below_1,
        count_below_2,
        count_below_3,
        percent_below_1: percent(count_below_1),
        percent_below_2: percent(count_below_2),
        percent_below_3: percent(count_below_3),
        sample_count: n,
    })
}

impl DeltaSummary {
    /// Spread between the worst and best patch.
    pub fn range(&self) -> f64 {
        self.largest - self.smallest
    }
}
