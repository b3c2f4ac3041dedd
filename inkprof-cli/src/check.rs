//! Profile verification workflow
//!
//! Runs `profcheck` against a measurement/profile pair, persists the raw
//! report, analyzes the per-patch ΔE values, and appends the analysis block
//! to the report. The analysis half is also usable on its own against a
//! previously persisted report (`inkprof analyze`).

use crate::logger::TeeLog;
use crate::runner::{self, ToolError};
use anyhow::{bail, Context, Result};
use inkprof_report::{render_append, render_display};
use inkprof_stats::{parse_report, summarize, DeltaSummary};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A measurement/profile pair identified by a shared base name.
#[derive(Debug, Clone)]
pub struct ProfilePair {
    /// Base name shared by the `.ti3` and `.icc` files.
    pub name: String,
    /// Directory containing both files.
    pub dir: PathBuf,
}

impl ProfilePair {
    /// Derive the pair from a path to either the `.ti3` or `.icc` file.
    ///
    /// Both files must exist next to each other.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .with_context(|| format!("cannot derive a base name from {}", path.display()))?
            .to_string();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let pair = Self { name, dir };
        for file in [pair.ti3_path(), pair.icc_path()] {
            if !file.exists() {
                bail!("required file does not exist: {}", file.display());
            }
        }
        Ok(pair)
    }

    /// Path of the measurement file.
    pub fn ti3_path(&self) -> PathBuf {
        self.dir.join(format!("{}.ti3", self.name))
    }

    /// Path of the profile file.
    pub fn icc_path(&self) -> PathBuf {
        self.dir.join(format!("{}.icc", self.name))
    }

    /// Path of the persisted verification report.
    pub fn report_path(&self) -> PathBuf {
        self.dir.join(format!("{}_sanity_check.txt", self.name))
    }
}

/// Analyze verification report text into a summary.
///
/// Unsorted input is tolerated (the summary normalizes internally) but
/// worth flagging, since `profcheck -s` output is expected to arrive
/// sorted worst first.
pub fn analyze_report_text(text: &str) -> Result<DeltaSummary> {
    let sample = parse_report(text);
    if !sample.is_empty() && !sample.is_sorted_descending() {
        tracing::warn!("delta E values are not sorted worst-first; normalizing");
    }
    summarize(&sample).context("no delta E values found in verification report")
}

/// Append the analysis block for `summary` to the report at `path`.
pub fn append_summary(path: &Path, summary: &DeltaSummary) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open report for append: {}", path.display()))?;
    file.write_all(render_append(summary).as_bytes())
        .with_context(|| format!("failed to append analysis to {}", path.display()))?;
    Ok(())
}

/// Run the full verification workflow for a profile pair.
pub fn sanity_check(pair: &ProfilePair, log: &TeeLog) -> Result<()> {
    let report = pair.report_path();
    let ti3 = format!("{}.ti3", pair.name);
    let icc = format!("{}.icc", pair.name);

    log.writeln("");
    log.writeln("Performing sanity check (creating .txt file)...");
    log.writeln("");
    log.writeln("Command Used: profcheck -v2 -k -s");

    // Fresh report per run; analysis blocks from this run append below it.
    std::fs::write(&report, "")
        .with_context(|| format!("failed to create report file {}", report.display()))?;

    let args = vec![
        "-v2".to_string(),
        "-k".to_string(),
        "-s".to_string(),
        ti3.clone(),
        icc.clone(),
    ];
    let code = runner::run_to_file("profcheck", &args, &report, Some(&pair.dir))?;
    runner::expect_success("profcheck", code).map_err(|e| profcheck_failed(log, e))?;

    {
        let mut file = std::fs::OpenOptions::new().append(true).open(&report)?;
        file.write_all(b"\n\n")?;
    }

    let text = std::fs::read_to_string(&report)
        .with_context(|| format!("failed to read report {}", report.display()))?;
    let summary = analyze_report_text(&text)?;

    log.writeln("");
    log.write(&render_display(&summary));
    log.writeln("");

    append_summary(&report, &summary)?;

    log.writeln("Command Used: profcheck -v -k");
    let args = vec!["-v".to_string(), "-k".to_string(), ti3, icc];
    let code = runner::run_to_file("profcheck", &args, &report, Some(&pair.dir))?;
    runner::expect_success("profcheck", code).map_err(|e| profcheck_failed(log, e))?;

    log.writeln("");
    log.writeln("Sanity Check Complete");
    log.writeln("Detailed sanity check stored in:");
    log.writeln(&format!("'{}'.", report.display()));
    log.writeln("");

    Ok(())
}

/// Analyze an existing verification report, optionally appending the block.
pub fn analyze_existing(report: &Path, append: bool, log: &TeeLog) -> Result<()> {
    let text = std::fs::read_to_string(report)
        .with_context(|| format!("failed to read report {}", report.display()))?;
    let summary = analyze_report_text(&text)?;

    log.writeln("");
    log.write(&render_display(&summary));
    log.writeln("");

    if append {
        append_summary(report, &summary)?;
        log.writeln(&format!("Analysis appended to '{}'.", report.display()));
    }
    Ok(())
}

fn profcheck_failed(log: &TeeLog, err: ToolError) -> anyhow::Error {
    log.writeln("");
    log.writeln("profcheck failed. See log for details.");
    log.writeln("");
    err.into()
}
