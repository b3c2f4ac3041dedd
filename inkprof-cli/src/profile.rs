//! Profile creation and installation
//!
//! Builds a `colprof` invocation from the setup parameters, creates the
//! `.icc` from an existing `.ti3`, verifies it, and installs finished
//! profiles into the configured profile directory.

use crate::check::{self, ProfilePair};
use crate::config::{expand_home, SetupConfig};
use crate::logger::TeeLog;
use crate::platform::Platform;
use crate::runner;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Build the `colprof` argument list from the setup parameters.
///
/// Common arguments come first, then the conditional flags (ink limit,
/// smoothing, gamut-mapping source profile). The description and base name
/// are appended by the caller.
pub fn build_colprof_args(cfg: &SetupConfig, log: &TeeLog) -> Vec<String> {
    let mut args = cfg.args("COMMON_ARGUMENTS_COLPROF");

    let ink_limit = cfg.get("INK_LIMIT").trim().to_string();
    if !ink_limit.is_empty() {
        args.push(format!("-l{}", ink_limit));
    }

    let smoothing = cfg.get("PROFILE_SMOOTING").trim().to_string();
    if !smoothing.is_empty() {
        args.push(format!("-r{}", smoothing));
    }

    let printer_icc = cfg.get("PRINTER_ICC_PATH").trim().to_string();
    if !printer_icc.is_empty() {
        let path = expand_home(&printer_icc);
        if path.is_file() {
            args.push("-S".to_string());
            args.push(path.display().to_string());
        } else {
            log.writeln(&format!(
                "Warning: Printer ICC profile not found: '{}'",
                printer_icc
            ));
            log.writeln("   Skipping printer ICC profile in colprof.");
        }
    }

    args
}

/// Create an `.icc` profile from an existing `.ti3`, then verify it.
pub fn create_profile(
    name: &str,
    desc: &str,
    dir: &Path,
    cfg: &SetupConfig,
    log: &TeeLog,
) -> Result<()> {
    let ti3 = dir.join(format!("{}.ti3", name));
    if !ti3.is_file() {
        bail!("measurement file does not exist: {}", ti3.display());
    }

    let mut args = build_colprof_args(cfg, log);

    log.writeln("");
    log.writeln("Starting profile creation (read .ti3 file and generate .icc file)...");
    args.push("-D".to_string());
    args.push(desc.to_string());
    args.push(name.to_string());

    let code = runner::run_streamed("colprof", &args, Some(dir), log)?;
    if let Err(err) = runner::expect_success("colprof", code) {
        log.writeln("");
        log.writeln("colprof failed. See log for details.");
        log.writeln("");
        return Err(err.into());
    }

    log.writeln("");
    log.writeln("Profile created.");
    log.writeln("");

    let pair = ProfilePair {
        name: name.to_string(),
        dir: dir.to_path_buf(),
    };
    check::sanity_check(&pair, log)
}

/// Copy a finished `.icc` into the configured profile directory.
pub fn install_profile(
    name: &str,
    dir: &Path,
    cfg: &SetupConfig,
    platform: Platform,
    log: &TeeLog,
) -> Result<()> {
    log.writeln("Installing measured ICC profile...");

    let src = dir.join(format!("{}.icc", name));
    if !src.is_file() {
        bail!(
            "ICC profile not found: '{}' (expected in {})",
            src.display(),
            dir.display()
        );
    }

    let dest_dir = cfg.get("PRINTER_PROFILES_PATH").trim().to_string();
    if dest_dir.is_empty() {
        bail!("PRINTER_PROFILES_PATH is empty. Check setup file.");
    }

    let dest = expand_home(&dest_dir);
    if !dest.is_dir() {
        bail!(
            "destination directory does not exist: '{}'. Check PRINTER_PROFILES_PATH in the setup file.",
            dest_dir
        );
    }

    if !dir_is_writable(&dest) {
        log.writeln("");
        log.writeln(&format!(
            "Destination directory is not writable: '{}'",
            dest_dir
        ));
        log.writeln("   Check folder permissions or choose a user-writable profile folder.");
        match platform {
            Platform::Linux => {
                log.writeln("   Suggested Linux user profile folder:");
                log.writeln("     '$HOME/.local/share/color/icc' (create if missing)");
            }
            Platform::MacOs => {
                log.writeln("   Suggested macOS user profile folder:");
                log.writeln("     '$HOME/Library/ColorSync/Profiles'");
            }
            Platform::Windows => {}
        }
        bail!("destination directory is not writable: '{}'", dest_dir);
    }

    let target = dest.join(src.file_name().unwrap_or_default());
    std::fs::copy(&src, &target)
        .with_context(|| format!("failed to copy ICC profile to '{}'", dest_dir))?;

    log.writeln("");
    log.writeln(&format!("Profile installed: {}", target.display()));
    log.writeln("");
    Ok(())
}

fn dir_is_writable(dir: &Path) -> bool {
    let probe = dir.join(".inkprof_write_probe");
    match std::fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
