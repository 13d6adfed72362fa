// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `stalecheck`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stalecheck",
    version,
    about = "Decide which CI job artifacts are still valid for the current source tree.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the filter catalog (YAML).
    #[arg(long, value_name = "PATH", default_value = "filters.yaml")]
    pub filter_file: String,

    /// Path to the workflow file whose `jobs` keys drive the run.
    #[arg(long, value_name = "PATH")]
    pub workflow_file: String,

    /// Namespace prefix for artifact keys, e.g. "owner/repo".
    #[arg(long, value_name = "PREFIX")]
    pub namespace: String,

    /// Git ref to diff against when determining changed files.
    #[arg(long, value_name = "REF", default_value = "origin/main")]
    pub base_ref: String,

    /// Root of the repository checkout to fingerprint.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub repo_root: String,

    /// Directory holding cached fingerprints (one file per job).
    #[arg(long, value_name = "PATH", default_value = ".hashes")]
    pub cache_dir: String,

    /// Root of a local artifact store. Existence checks are skipped when
    /// this is not set.
    #[arg(long, value_name = "PATH")]
    pub artifact_root: Option<String>,

    /// File to append the markdown run summary to.
    ///
    /// Falls back to the `GITHUB_STEP_SUMMARY` environment variable; the
    /// summary is skipped when neither is set.
    #[arg(long, value_name = "PATH")]
    pub summary_file: Option<String>,

    /// Treat every job as changed instead of asking git for a diff.
    ///
    /// Use this on push or manually dispatched builds, where "changed
    /// relative to what?" has no good answer.
    #[arg(long)]
    pub assume_changed: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STALECHECK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
