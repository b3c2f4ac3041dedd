//! External tool execution
//!
//! Two modes of running ArgyllCMS tools: streaming combined output through
//! the tee logger (interactive steps like `chartread`), and redirecting
//! output straight into a report file (`profcheck` verification runs).

use crate::logger::TeeLog;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

/// External tool failures.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The executable is not on PATH.
    #[error("command not found: {0}")]
    NotFound(String),

    /// Spawning or waiting on the process failed.
    #[error("failed to run {tool}: {source}")]
    Io {
        /// Tool name.
        tool: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited unsuccessfully.
    #[error("{tool} exited with status {code}")]
    Failed {
        /// Tool name.
        tool: String,
        /// Exit code, or -1 when killed by a signal.
        code: i32,
    },
}

fn io_error(tool: &str, source: std::io::Error) -> ToolError {
    if source.kind() == std::io::ErrorKind::NotFound {
        ToolError::NotFound(tool.to_string())
    } else {
        ToolError::Io {
            tool: tool.to_string(),
            source,
        }
    }
}

fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Run `tool` with `args`, streaming stdout and stderr through the logger.
///
/// The invocation itself is logged first so a session log doubles as a
/// record of the exact commands used. Returns the exit code; spawning
/// failures are errors, nonzero exits are not (callers decide severity).
pub fn run_streamed(
    tool: &str,
    args: &[String],
    cwd: Option<&Path>,
    log: &TeeLog,
) -> Result<i32, ToolError> {
    log.writeln("");
    log.writeln(&format!("Command Used: {} {}", tool, args.join(" ")));

    let mut cmd = Command::new(tool);
    cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|e| io_error(tool, e))?;

    // stderr is drained on a separate thread so neither pipe can fill up
    // and stall the tool.
    let stderr = child.stderr.take();
    let stderr_log = log.clone();
    let drain = std::thread::spawn(move || {
        if let Some(stderr) = stderr {
            for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                stderr_log.writeln(&line);
            }
        }
    });

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            log.writeln(&line);
        }
    }

    let status = child.wait().map_err(|e| io_error(tool, e))?;
    let _ = drain.join();
    Ok(exit_code(status))
}

/// Run `tool` with `args`, appending stdout and stderr to `output`.
///
/// Used for verification runs whose raw output is the persisted report.
/// Returns the exit code.
pub fn run_to_file(
    tool: &str,
    args: &[String],
    output: &Path,
    cwd: Option<&Path>,
) -> Result<i32, ToolError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .map_err(|e| io_error(tool, e))?;
    let stderr_file = file.try_clone().map_err(|e| io_error(tool, e))?;

    let mut cmd = Command::new(tool);
    cmd.args(args)
        .stdout(Stdio::from(file))
        .stderr(Stdio::from(stderr_file));
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let status = cmd.status().map_err(|e| io_error(tool, e))?;
    Ok(exit_code(status))
}

/// Turn a nonzero exit code into a [`ToolError::Failed`].
pub fn expect_success(tool: &str, code: i32) -> Result<(), ToolError> {
    if code == 0 {
        Ok(())
    } else {
        Err(ToolError::Failed {
            tool: tool.to_string(),
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let log = TeeLog::create(dir.path().join("run.log")).unwrap();
        let err = run_streamed("definitely-not-a-real-tool-9f3", &[], None, &log).unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn streamed_output_reaches_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = TeeLog::create(dir.path().join("run.log")).unwrap();
        let code = run_streamed(
            "sh",
            &["-c".to_string(), "echo hello from tool".to_string()],
            None,
            &log,
        )
        .unwrap();
        assert_eq!(code, 0);
        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("Command Used: sh -c"));
        assert!(contents.contains("hello from tool"));
    }

    #[cfg(unix)]
    #[test]
    fn stderr_is_captured_too() {
        let dir = tempfile::tempdir().unwrap();
        let log = TeeLog::create(dir.path().join("run.log")).unwrap();
        let code = run_streamed(
            "sh",
            &["-c".to_string(), "echo oops >&2; exit 3".to_string()],
            None,
            &log,
        )
        .unwrap();
        assert_eq!(code, 3);
        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("oops"));
    }

    #[cfg(unix)]
    #[test]
    fn run_to_file_appends_both_streams() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.txt");
        std::fs::write(&report, "existing\n").unwrap();
        let code = run_to_file(
            "sh",
            &["-c".to_string(), "echo out; echo err >&2".to_string()],
            &report,
            None,
        )
        .unwrap();
        assert_eq!(code, 0);
        let contents = std::fs::read_to_string(&report).unwrap();
        assert!(contents.starts_with("existing\n"));
        assert!(contents.contains("out"));
        assert!(contents.contains("err"));
    }

    #[test]
    fn expect_success_maps_nonzero() {
        assert!(expect_success("colprof", 0).is_ok());
        let err = expect_success("colprof", 2).unwrap_err();
        assert!(matches!(err, ToolError::Failed { code: 2, .. }));
    }
}
