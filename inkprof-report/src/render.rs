//! Summary Rendering
//!
//! ΔE values keep their source precision (`f64` Display, no forced
//! rounding); only percentages are fixed to one decimal place. Percentiles
//! whose rank fell outside the sample render as `N/A`, never as zero.

use inkprof_stats::DeltaSummary;

/// First line of the persisted-report append block. Doubles as the block
/// delimiter so repeated verification runs remain distinguishable.
pub const APPEND_HEADER: &str = "=== Delta E Range Analysis ===";

/// Closing delimiter of the append block.
pub const APPEND_FOOTER: &str = "================================";

fn fmt_percentile(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

/// Render the terminal/log form of a summary.
pub fn render_display(summary: &DeltaSummary) -> String {
    let mut out = String::new();

    out.push_str("Delta E Range Analysis:\n");
    out.push_str(&format!("  Largest ΔE:  {}\n", summary.largest));
    out.push_str(&format!("  Smallest ΔE: {}\n", summary.smallest));
    out.push('\n');

    out.push_str("Percentile Values:\n");
    out.push_str(&format!("  99th percentile: {}\n", fmt_percentile(summary.p99)));
    out.push_str(&format!("  98th percentile: {}\n", fmt_percentile(summary.p98)));
    out.push_str(&format!("  95th percentile: {}\n", fmt_percentile(summary.p95)));
    out.push_str(&format!("  90th percentile: {}\n", fmt_percentile(summary.p90)));
    out.push('\n');

    out.push_str("Patch Count Analysis:\n");
    out.push_str(&format!(
        "  Percent of patches with ΔE<1.0: {:.1}%\n",
        summary.percent_below_1
    ));
    out.push_str(&format!(
        "  Percent of patches with ΔE<2.0: {:.1}%\n",
        summary.percent_below_2
    ));
    out.push_str(&format!(
        "  Percent of patches with ΔE<3.0: {:.1}%\n",
        summary.percent_below_3
    ));

    out
}

/// Render the append block for the persisted report file.
///
/// Same data as [`render_display`] with plain labels and header/footer
/// delimiters; surrounding blank lines keep stacked blocks readable.
pub fn render_append(summary: &DeltaSummary) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(APPEND_HEADER);
    out.push('\n');
    out.push_str(&format!("Largest ΔE: {}\n", summary.largest));
    out.push_str(&format!("Smallest ΔE: {}\n", summary.smallest));
    out.push('\n');

    out.push_str("Percentile Values:\n");
    out.push_str(&format!("99th percentile: {}\n", fmt_percentile(summary.p99)));
    out.push_str(&format!("98th percentile: {}\n", fmt_percentile(summary.p98)));
    out.push_str(&format!("95th percentile: {}\n", fmt_percentile(summary.p95)));
    out.push_str(&format!("90th percentile: {}\n", fmt_percentile(summary.p90)));
    out.push('\n');

    out.push_str("Patch Count Analysis:\n");
    out.push_str(&format!(
        "Percent of patches with ΔE<1.0: {:.1}%\n",
        summary.percent_below_1
    ));
    out.push_str(&format!(
        "Percent of patches with ΔE<2.0: {:.1}%\n",
        summary.percent_below_2
    ));
    out.push_str(&format!(
        "Percent of patches with ΔE<3.0: {:.1}%\n",
        summary.percent_below_3
    ));
    out.push_str(APPEND_FOOTER);
    out.push_str("\n\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkprof_stats::{parse_report, summarize};

    fn example_summary() -> DeltaSummary {
        let text = "\
[5.20] patch A1 @ x\n\
[3.10] patch A2 @ x\n\
[0.50] patch A3 @ x\n";
        summarize(&parse_report(text)).unwrap()
    }

    #[test]
    fn display_has_all_three_sections() {
        let out = render_display(&example_summary());
        assert!(out.contains("Delta E Range Analysis:"));
        assert!(out.contains("Percentile Values:"));
        assert!(out.contains("Patch Count Analysis:"));
        assert!(out.contains("  Largest ΔE:  5.2\n"));
        assert!(out.contains("  Smallest ΔE: 0.5\n"));
        assert!(out.contains("  90th percentile: 5.2\n"));
        assert!(out.contains("  Percent of patches with ΔE<1.0: 33.3%\n"));
    }

    #[test]
    fn append_block_is_delimited() {
        let out = render_append(&example_summary());
        assert!(out.starts_with(&format!("\n{}\n", APPEND_HEADER)));
        assert!(out.trim_end().ends_with(APPEND_FOOTER));
        // Plain labels, no indentation
        assert!(out.contains("\nLargest ΔE: 5.2\n"));
        assert!(out.contains("\n90th percentile: 5.2\n"));
    }

    #[test]
    fn unavailable_percentile_renders_as_na() {
        let mut summary = example_summary();
        summary.p99 = None;
        let display = render_display(&summary);
        let append = render_append(&summary);
        assert!(display.contains("  99th percentile: N/A\n"));
        assert!(append.contains("\n99th percentile: N/A\n"));
        // Other percentiles still render numerically
        assert!(display.contains("  98th percentile: 5.2\n"));
    }

    #[test]
    fn values_keep_source_precision() {
        let mut summary = example_summary();
        summary.largest = 5.25;
        summary.smallest = 0.125;
        let out = render_display(&summary);
        assert!(out.contains("Largest ΔE:  5.25"));
        assert!(out.contains("Smallest ΔE: 0.125"));
    }

    #[test]
    fn percentages_round_trip_to_counts() {
        // Re-parse the rendered percentages back into counts given the
        // sample size; rounding to one decimal must not lose the count.
        let summary = example_summary();
        let out = render_append(&summary);
        let re = regex::Regex::new(r"ΔE<([0-9.]+): ([0-9.]+)%").unwrap();

        let mut recovered = Vec::new();
        for caps in re.captures_iter(&out) {
            let percent: f64 = caps[2].parse().unwrap();
            let count = (percent / 100.0 * summary.sample_count as f64).round() as usize;
            recovered.push(count);
        }
        assert_eq!(
            recovered,
            vec![
                summary.count_below_1,
                summary.count_below_2,
                summary.count_below_3
            ]
        );
    }

    #[test]
    fn stacked_blocks_stay_separable() {
        let summary = example_summary();
        let twice = format!("{}{}", render_append(&summary), render_append(&summary));
        assert_eq!(twice.matches(APPEND_HEADER).count(), 2);
        assert_eq!(twice.matches(APPEND_FOOTER).count(), 2);
    }
}
