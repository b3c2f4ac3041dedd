//! Setup-file configuration
//!
//! Parameters live in a shell-style setup file (`inkprof_setup.ini`) of
//! simple `KEY='value'` assignments, compatible with the setup files used by
//! earlier shell-based profiling workflows. The file is discovered by
//! walking up from the current directory; `--setup` overrides.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Default setup file name searched for during discovery.
pub const SETUP_FILE_NAME: &str = "inkprof_setup.ini";

/// Setup-file loading/update errors.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The requested setup file does not exist.
    #[error("setup file not found: {0}")]
    NotFound(PathBuf),

    /// Underlying I/O failure while reading or rewriting the file.
    #[error("failed to access setup file: {0}")]
    Io(#[from] std::io::Error),
}

fn assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("assignment regex"))
}

/// Loaded setup parameters.
///
/// Lookups never fail: a missing key reads as the empty string, mirroring
/// how the shell-based workflow treated unset variables.
#[derive(Debug, Clone, Default)]
pub struct SetupConfig {
    values: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

impl SetupConfig {
    /// Load setup parameters from a shell-style file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SetupError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        let mut values = BTreeMap::new();

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(caps) = assignment_re().captures(line) else {
                continue;
            };

            let key = caps[1].to_string();
            let mut val = caps[2].trim().to_string();

            // Best-effort stripping of inline " # ..." comments.
            if let Some(idx) = val.find(" #") {
                val.truncate(idx);
                val = val.trim_end().to_string();
            }

            // Strip one pair of outer quotes if present.
            if (val.starts_with('\'') && val.ends_with('\'') && val.len() >= 2)
                || (val.starts_with('"') && val.ends_with('"') && val.len() >= 2)
            {
                val = val[1..val.len() - 1].to_string();
            }

            values.insert(key, val);
        }

        Ok(Self {
            values,
            path: Some(path.to_path_buf()),
        })
    }

    /// Try to discover a setup file by walking up from the current directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(SETUP_FILE_NAME);
            if candidate.exists() {
                return Self::load(&candidate).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Where this config was loaded from, if it came from a file.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Value for `key`, or the empty string when unset.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Split a shell-like argument string stored under `key`.
    ///
    /// Argument groups are stored the way a shell would pass them
    /// (e.g. `COMMON_ARGUMENTS_COLPROF='-v -qh -S'`); quoting is honored.
    pub fn args(&self, key: &str) -> Vec<String> {
        let raw = self.get(key).trim();
        if raw.is_empty() {
            return Vec::new();
        }
        shlex::split(raw).unwrap_or_default()
    }

    /// Update or append `KEY='value'` in the setup file at `path`.
    pub fn update_value(path: impl AsRef<Path>, key: &str, value: &str) -> Result<(), SetupError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SetupError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        let prefix = format!("{}=", key);
        let mut out: Vec<String> = Vec::new();
        let mut found = false;

        for line in text.lines() {
            if line.trim_start().starts_with(&prefix) {
                out.push(format!("{}='{}'", key, value));
                found = true;
            } else {
                out.push(line.to_string());
            }
        }
        if !found {
            out.push(format!("{}='{}'", key, value));
        }

        std::fs::write(path, out.join("\n") + "\n")?;
        Ok(())
    }

    /// Validate configured paths and required scalars, returning one warning
    /// line per problem. The caller decides where the warnings go.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let dir_key = "PRINTER_PROFILES_PATH";
        let dir_val = self.get(dir_key).trim();
        if dir_val.is_empty() {
            warnings.push(format!("{} is not specified in setup file.", dir_key));
        } else {
            let p = expand_home(dir_val);
            if !p.exists() {
                warnings.push(format!("{} directory does not exist: '{}'", dir_key, dir_val));
            } else if !p.is_dir() {
                warnings.push(format!("{} is not a directory: '{}'", dir_key, dir_val));
            }
        }

        for (key, required) in [
            ("PRINTER_ICC_PATH", true),
            ("PRECONDITIONING_PROFILE_PATH", false),
        ] {
            let val = self.get(key).trim();
            if val.is_empty() {
                if required {
                    warnings.push(format!("{} is not specified in setup file.", key));
                }
                continue;
            }
            let p = expand_home(val);
            if !p.exists() {
                warnings.push(format!("{} file does not exist: '{}'", key, val));
            } else if !p.is_file() {
                warnings.push(format!("{} is not a file: '{}'", key, val));
            }
        }

        for key in [
            "STRIP_PATCH_CONSISTENSY_TOLERANCE",
            "PROFILE_SMOOTING",
            "TARGET_RESOLUTION",
        ] {
            if self.get(key).trim().is_empty() {
                warnings.push(format!("Variable {} not set. Check setup file.", key));
            }
        }

        warnings
    }

    /// Default setup file contents written by `inkprof init`.
    pub fn default_ini() -> String {
        r#"# inkprof setup parameters
# Simple KEY='value' assignments; '#' starts a comment.

# Arguments always passed to colprof when creating a profile.
COMMON_ARGUMENTS_COLPROF='-v -qh'

# Total ink limit in percent for targen and colprof -l. Empty disables.
INK_LIMIT='260'

# Average deviation / smoothing for colprof -r.
PROFILE_SMOOTING='1.0'

# Color space profile for gamut mapping (colprof -S).
PRINTER_ICC_PATH=''

# Pre-conditioning profile for target generation (targen -c).
PRECONDITIONING_PROFILE_PATH=''

# Directory where finished .icc profiles are installed.
PRINTER_PROFILES_PATH=''

# Patch consistency tolerance per strip (chartread -T).
STRIP_PATCH_CONSISTENSY_TOLERANCE='0.6'

# Target chart resolution in dpi (printtarg -T).
TARGET_RESOLUTION='360'
"#
        .to_string()
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
