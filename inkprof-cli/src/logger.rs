//! Tee Logging
//!
//! Mirrors workflow output to the terminal and a daily log file, so an
//! operator can reconstruct a profiling session after the fact. External
//! tool output is streamed through the same logger by the runner.

use crate::platform::Platform;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Terminal + file logger.
///
/// Log-file writes are best effort once the file has been created: a failed
/// append must not abort a measurement session that is otherwise healthy.
#[derive(Debug, Clone)]
pub struct TeeLog {
    path: PathBuf,
}

impl TeeLog {
    /// Create a logger writing to `path`, creating the file if needed.
    pub fn create(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path })
    }

    /// Daily log file name, e.g. `inkprof_20260823.log`.
    pub fn daily_file_name(today: chrono::NaiveDate) -> String {
        format!("inkprof_{}.log", today.format("%Y%m%d"))
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write text to both the terminal and the log file.
    pub fn write(&self, text: &str) {
        print!("{}", text);
        let _ = std::io::stdout().flush();
        self.append(text);
    }

    /// Write a line to both the terminal and the log file.
    pub fn writeln(&self, text: &str) {
        println!("{}", text);
        self.append(text);
        self.append("\n");
    }

    /// Write a line to the log file only.
    pub fn log_only(&self, text: &str) {
        self.append(text);
        self.append("\n");
    }

    fn append(&self, text: &str) {
        if let Ok(mut file) = OpenOptions::new().append(true).open(&self.path) {
            let _ = file.write_all(text.as_bytes());
        }
    }

    /// Write a session separator block to the log file only.
    pub fn session_separator(&self, platform: Platform) {
        let now = chrono::Local::now();
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        let cwd = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        for line in [
            String::new(),
            "=".repeat(80),
            "NEW SESSION STARTED".to_string(),
            format!("Date & Time: {}", now.format("%Y-%m-%d %H:%M:%S %z")),
            format!("Platform: {}", platform.name()),
            format!("User: {}", user),
            format!("Working Directory: {}", cwd),
            format!("Log File: {}", self.path.display()),
            format!("Process ID: {}", std::process::id()),
            "=".repeat(80),
            String::new(),
        ] {
            self.log_only(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_only_skips_terminal_but_hits_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = TeeLog::create(dir.path().join("session.log")).unwrap();
        log.log_only("file only line");
        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("file only line\n"));
    }

    #[test]
    fn writes_accumulate_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let log = TeeLog::create(dir.path().join("session.log")).unwrap();
        log.log_only("first");
        log.log_only("second");
        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("first\nsecond\n"));
    }

    #[test]
    fn session_separator_records_pid() {
        let dir = tempfile::tempdir().unwrap();
        let log = TeeLog::create(dir.path().join("session.log")).unwrap();
        log.session_separator(Platform::Linux);
        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("NEW SESSION STARTED"));
        assert!(contents.contains(&format!("Process ID: {}", std::process::id())));
    }

    #[test]
    fn daily_file_name_uses_compact_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(TeeLog::daily_file_name(date), "inkprof_20260823.log");
    }
}
