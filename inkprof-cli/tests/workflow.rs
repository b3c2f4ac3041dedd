//! End-to-end workflow tests
//!
//! Drives the verification analysis over a realistic profcheck report and,
//! on unix, the full sanity-check workflow against a stubbed profcheck
//! placed on PATH.

use inkprof_cli::{analyze_report_text, append_summary, ProfilePair, TeeLog};

const PROFCHECK_REPORT: &str = "\
Profile check complete, errors(CIEDE2000): max. = 4.821423, avg. = 0.912345, RMS = 1.234
[4.82] 0.0 0.0 0.0 -> 12.1 0.3 -0.2 should be @ 13.0 0.1 0.0
[2.31] 50.0 40.0 30.0 -> 55.5 2.1 -3.0 should be @ 55.0 2.0 -2.5
[1.15] 10.0 10.0 10.0 -> 30.1 0.2 0.1 should be @ 30.0 0.0 0.0
[0.73] 0.0 100.0 0.0 -> 87.7 -86.2 83.2 should be @ 88.0 -85.0 84.0
[0.21] 0.0 0.0 100.0 -> 29.6 68.3 -112.0 should be @ 29.5 68.3 -112.1
";

#[test]
fn report_analysis_matches_hand_computation() {
    let summary = analyze_report_text(PROFCHECK_REPORT).unwrap();

    assert_eq!(summary.sample_count, 5);
    assert_eq!(summary.largest, 4.82);
    assert_eq!(summary.smallest, 0.21);

    // ceil(5 * 0.90) = 5 -> index 0; ceil(5 * 0.95) = 5 -> index 0
    assert_eq!(summary.p90, Some(4.82));
    assert_eq!(summary.p99, Some(4.82));

    assert_eq!(summary.count_below_1, 2);
    assert_eq!(summary.count_below_2, 3);
    assert_eq!(summary.count_below_3, 4);
    assert!((summary.percent_below_1 - 40.0).abs() < 1e-9);
}

#[test]
fn append_then_reanalyze_is_stable() {
    // An appended analysis block must not change what a later analysis of
    // the same file sees: the block contains no patch lines.
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("paper_sanity_check.txt");
    std::fs::write(&report, PROFCHECK_REPORT).unwrap();

    let first = analyze_report_text(PROFCHECK_REPORT).unwrap();
    append_summary(&report, &first).unwrap();

    let text = std::fs::read_to_string(&report).unwrap();
    let second = analyze_report_text(&text).unwrap();
    assert_eq!(second.sample_count, first.sample_count);
    assert_eq!(second.largest, first.largest);
    assert_eq!(second.p95, first.p95);
}

#[cfg(unix)]
mod stubbed_profcheck {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn install_stub(dir: &std::path::Path) {
        // Emits a fixed report for -v2 -k -s, a short trailer otherwise.
        let script = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"-v2\" ]; then\n\
             cat <<'EOF'\n{}EOF\n\
             else\n\
             echo 'Profile check complete, errors(CIEDE2000): max. = 4.82, avg. = 0.91'\n\
             fi\n",
            PROFCHECK_REPORT
        );
        let path = dir.join("profcheck");
        std::fs::write(&path, script).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
    }

    #[test]
    fn sanity_check_persists_report_with_analysis_block() {
        let bin = tempfile::tempdir().unwrap();
        install_stub(bin.path());
        let old_path = std::env::var("PATH").unwrap_or_default();
        std::env::set_var("PATH", format!("{}:{}", bin.path().display(), old_path));

        let work = tempfile::tempdir().unwrap();
        std::fs::write(work.path().join("paper.ti3"), "CTI3\n").unwrap();
        std::fs::write(work.path().join("paper.icc"), "icc").unwrap();
        let log = TeeLog::create(work.path().join("session.log")).unwrap();

        let pair = ProfilePair::from_path(&work.path().join("paper.ti3")).unwrap();
        inkprof_cli::sanity_check(&pair, &log).unwrap();

        let report = std::fs::read_to_string(work.path().join("paper_sanity_check.txt")).unwrap();
        // Raw tool output first, then the delimited analysis, then the
        // second profcheck pass.
        let analysis_at = report.find("=== Delta E Range Analysis ===").unwrap();
        let raw_at = report.find("[4.82]").unwrap();
        let trailer_at = report.rfind("Profile check complete").unwrap();
        assert!(raw_at < analysis_at);
        assert!(analysis_at < trailer_at);
        assert!(report.contains("Largest ΔE: 4.82"));
        assert!(report.contains("90th percentile: 4.82"));

        let session = std::fs::read_to_string(log.path()).unwrap();
        assert!(session.contains("Sanity Check Complete"));
    }
}
