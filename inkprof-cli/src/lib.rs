#![warn(missing_docs)]
//! inkprof CLI Library
//!
//! Command-line orchestration for the ArgyllCMS printer-profiling
//! workflows: running `profcheck` verification with ΔE analysis, creating
//! profiles with `colprof`, installing finished profiles, and checking the
//! environment. Use `inkprof_cli::run()` from the binary's main function.

mod check;
mod config;
mod guide;
mod logger;
mod platform;
mod profile;
mod runner;

pub use check::{analyze_existing, analyze_report_text, append_summary, sanity_check, ProfilePair};
pub use config::{expand_home, SetupConfig, SetupError, SETUP_FILE_NAME};
pub use logger::TeeLog;
pub use platform::{argyll_version, missing_tools, Platform, REQUIRED_TOOLS};
pub use runner::ToolError;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// inkprof CLI arguments
#[derive(Parser, Debug)]
#[command(name = "inkprof")]
#[command(author, version, about = "ArgyllCMS printer-profiling orchestrator")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Setup file path (default: discover inkprof_setup.ini upwards from cwd)
    #[arg(long)]
    pub setup: Option<PathBuf>,

    /// Directory for session log files (default: current directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run profcheck verification and ΔE analysis for a profile
    Check {
        /// Path to the .ti3 measurement file; the .icc must sit next to it
        ti3: PathBuf,
    },
    /// Analyze an existing verification report
    Analyze {
        /// Path to a previously persisted verification report
        report: PathBuf,

        /// Append the analysis block to the report file
        #[arg(long)]
        append: bool,
    },
    /// Create an .icc profile from a .ti3 file, then verify it
    Profile {
        /// Path to the .ti3 measurement file
        ti3: PathBuf,

        /// Profile description embedded via colprof -D (default: base name)
        #[arg(long)]
        desc: Option<String>,
    },
    /// Install a finished .icc profile into the configured profile directory
    Install {
        /// Path to the .icc profile
        icc: PathBuf,
    },
    /// Check the environment: required tools, Argyll version, setup file
    Doctor,
    /// Show tips on improving the accuracy of a profile
    Tips,
    /// Show the ΔE2000 color accuracy quick reference
    Reference,
    /// Write a default setup file
    Init {
        /// Where to write the setup file (default: ./inkprof_setup.ini)
        path: Option<PathBuf>,
    },
}

/// Run the inkprof CLI. This is the main entry point for the binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the inkprof CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("inkprof=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("inkprof=info")
            .init();
    }

    let platform = Platform::detect();
    let log = open_session_log(&cli, platform)?;

    match cli.command {
        Commands::Check { ref ti3 } => {
            let pair = ProfilePair::from_path(ti3)?;
            check::sanity_check(&pair, &log)?;
        }
        Commands::Analyze { ref report, append } => {
            check::analyze_existing(report, append, &log)?;
        }
        Commands::Profile { ref ti3, ref desc } => {
            let cfg = resolve_config(&cli)?;
            let (name, dir) = split_base(ti3)?;
            let desc = desc.clone().unwrap_or_else(|| name.clone());
            profile::create_profile(&name, &desc, &dir, &cfg, &log)?;
        }
        Commands::Install { ref icc } => {
            let cfg = resolve_config(&cli)?;
            let (name, dir) = split_base(icc)?;
            profile::install_profile(&name, &dir, &cfg, platform, &log)?;
        }
        Commands::Doctor => {
            doctor(&cli, platform, &log)?;
        }
        Commands::Tips => {
            log.write(guide::TIPS);
        }
        Commands::Reference => {
            log.write(guide::DE_REFERENCE);
        }
        Commands::Init { ref path } => {
            init_setup_file(path.as_deref(), &log)?;
        }
    }

    Ok(())
}

/// Open the daily session log and record the session header.
fn open_session_log(cli: &Cli, platform: Platform) -> Result<TeeLog> {
    let dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let file = TeeLog::daily_file_name(chrono::Local::now().date_naive());
    let log = TeeLog::create(dir.join(file)).context("failed to open session log")?;
    log.session_separator(platform);
    Ok(log)
}

/// Load the setup file: explicit `--setup` wins, otherwise discovery,
/// otherwise empty defaults.
fn resolve_config(cli: &Cli) -> Result<SetupConfig> {
    match cli.setup {
        Some(ref path) => {
            SetupConfig::load(path).with_context(|| format!("--setup {}", path.display()))
        }
        None => Ok(SetupConfig::discover().unwrap_or_default()),
    }
}

/// Base name and directory of a workflow input file.
fn split_base(path: &Path) -> Result<(String, PathBuf)> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("cannot derive a base name from {}", path.display()))?
        .to_string();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((name, dir))
}

fn doctor(cli: &Cli, platform: Platform, log: &TeeLog) -> Result<()> {
    log.writeln(&format!("Platform: {}", platform.name()));

    let missing = platform::missing_tools();
    if missing.is_empty() {
        log.writeln("All required ArgyllCMS tools found:");
        log.writeln(&format!("   {}", REQUIRED_TOOLS.join(", ")));
    } else {
        log.writeln(&format!(
            "Missing required commands: {}",
            missing.join(", ")
        ));
        log.writeln(platform.install_hint());
    }

    match platform::argyll_version() {
        Some(version) => {
            log.writeln("ArgyllCMS detected");
            log.writeln(&format!("   Version: {}", version));
        }
        None => log.writeln("ArgyllCMS version could not be determined"),
    }

    let cfg = resolve_config(cli)?;
    match cfg.path() {
        Some(path) => {
            log.writeln(&format!("Setup file: {}", path.display()));
            for warning in cfg.validate() {
                log.writeln(&format!("Warning: {}", warning));
            }
        }
        None => {
            log.writeln("No setup file found. Create one with 'inkprof init'.");
        }
    }

    if !missing.is_empty() {
        bail!("missing required commands: {}", missing.join(", "));
    }
    Ok(())
}

fn init_setup_file(path: Option<&Path>, log: &TeeLog) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(SETUP_FILE_NAME));
    if path.exists() {
        bail!("refusing to overwrite existing setup file: {}", path.display());
    }
    std::fs::write(&path, SetupConfig::default_ini())
        .with_context(|| format!("failed to write {}", path.display()))?;
    log.writeln(&format!("Setup file written: {}", path.display()));
    log.writeln("Edit it to match your printer and profile folders.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn split_base_handles_bare_file_names() {
        let (name, dir) = split_base(Path::new("demo.ti3")).unwrap();
        assert_eq!(name, "demo");
        assert_eq!(dir, PathBuf::from("."));

        let (name, dir) = split_base(Path::new("/work/print/demo.icc")).unwrap();
        assert_eq!(name, "demo");
        assert_eq!(dir, PathBuf::from("/work/print"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let log = TeeLog::create(dir.path().join("run.log")).unwrap();
        let target = dir.path().join(SETUP_FILE_NAME);

        init_setup_file(Some(&target), &log).unwrap();
        assert!(target.exists());

        let err = init_setup_file(Some(&target), &log).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));
    }
}
