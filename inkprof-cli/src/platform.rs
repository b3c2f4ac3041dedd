//! Platform detection and environment checks
//!
//! The profiling toolchain itself is cross-platform; the only per-platform
//! differences that matter here are install hints for missing tools.

use std::process::Command;

/// ArgyllCMS executables the workflows depend on.
pub const REQUIRED_TOOLS: [&str; 6] = [
    "targen",
    "chartread",
    "colprof",
    "printtarg",
    "profcheck",
    "dispcal",
];

/// Host operating system, as far as the workflows care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows.
    Windows,
    /// macOS.
    MacOs,
    /// Linux and other unixes treated as Linux.
    Linux,
}

impl Platform {
    /// Detect the host platform.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            _ => Self::Linux,
        }
    }

    /// Human-readable name for log headers.
    pub fn name(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }

    /// How to install ArgyllCMS on this platform.
    pub fn install_hint(self) -> &'static str {
        match self {
            Self::Linux => {
                "On Linux, install ArgyllCMS with: sudo apt update && sudo apt install argyll"
            }
            Self::MacOs => "On macOS, install ArgyllCMS with: brew install argyllcms",
            Self::Windows => {
                "On Windows, download and install ArgyllCMS from https://www.argyllcms.com/"
            }
        }
    }
}

/// Names from [`REQUIRED_TOOLS`] that are not reachable on PATH.
pub fn missing_tools() -> Vec<&'static str> {
    REQUIRED_TOOLS
        .iter()
        .copied()
        .filter(|tool| which::which(tool).is_err())
        .collect()
}

/// Installed ArgyllCMS version, scraped from `dispcal`'s usage banner.
///
/// `dispcal` run without arguments prints `... Version X.Y.Z` on its first
/// output line. Returns `None` when the tool is missing or the banner does
/// not match.
pub fn argyll_version() -> Option<String> {
    let output = Command::new("dispcal").output().ok()?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    let first_line = text.lines().next()?;
    parse_version_banner(first_line)
}

fn parse_version_banner(line: &str) -> Option<String> {
    let re = regex::Regex::new(r"Version ([0-9.]+)").expect("version regex");
    re.captures(line).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_compile_target() {
        let platform = Platform::detect();
        match std::env::consts::OS {
            "windows" => assert_eq!(platform, Platform::Windows),
            "macos" => assert_eq!(platform, Platform::MacOs),
            _ => assert_eq!(platform, Platform::Linux),
        }
    }

    #[test]
    fn version_banner_parses() {
        let line = "Argyll 'V3.2.0' Display calibrator, Version 3.2.0";
        assert_eq!(parse_version_banner(line), Some("3.2.0".to_string()));
    }

    #[test]
    fn version_banner_without_match_is_none() {
        assert_eq!(parse_version_banner("usage: dispcal [options]"), None);
    }

    #[test]
    fn every_platform_has_an_install_hint() {
        for p in [Platform::Windows, Platform::MacOs, Platform::Linux] {
            assert!(p.install_hint().contains("ArgyllCMS"));
        }
    }
}
