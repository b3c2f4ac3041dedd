//! Verification Report Parsing
//!
//! Extracts per-patch ΔE values from `profcheck -v2 -k -s` output. A
//! per-patch result line starts with the ΔE value in square brackets and
//! carries an `@` marker before the patch location, e.g.:
//!
//! ```text
//! [2.31] A12: 45.2 12.1 -8.3 -> 44.1 11.8 -7.9 @ 120.5 88.0
//! ```
//!
//! Everything else in the report (headers, averages, the appended analysis
//! block from a previous run) is ignored.

use regex::Regex;
use std::sync::OnceLock;

/// Matches a per-patch result line: bracketed decimal at line start,
/// `@` marker later on the line.
fn patch_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[([0-9]+\.[0-9]+)\].*@").expect("patch line regex"))
}

/// An ordered sequence of per-patch ΔE values, in report file order.
///
/// `profcheck -s` sorts its output highest deviation first, so a sample
/// parsed from a sorted verbose report is descending. The parser does not
/// re-sort; [`summarize`](crate::summarize) checks the ordering before
/// relying on it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaSample {
    values: Vec<f64>,
}

impl DeltaSample {
    /// Wrap an already-extracted value sequence.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The values in file order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of patches in the sample.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the report contained no per-patch lines.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the sample honors the upstream sorted-descending invariant.
    pub fn is_sorted_descending(&self) -> bool {
        self.values.windows(2).all(|w| w[0] >= w[1])
    }
}

/// Extract a [`DeltaSample`] from the full text of a verification report.
///
/// Lines that do not match the per-patch format are skipped silently; a
/// report with no matching lines yields an empty sample, not an error.
pub fn parse_report(text: &str) -> DeltaSample {
    let re = patch_line_re();
    let mut values = Vec::new();

    for line in text.lines() {
        if let Some(caps) = re.captures(line.trim()) {
            // The bracketed group is all digits and a dot, so this parse
            // only fails on out-of-range exponents; skip such lines.
            if let Ok(value) = caps[1].parse::<f64>() {
                values.push(value);
            }
        }
    }

    DeltaSample::new(values)
}
