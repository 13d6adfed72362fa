// src/summary.rs

//! Human-readable markdown run summary.
//!
//! Appended to the CI step summary file when one is configured; the JSON on
//! stdout stays the machine-readable output.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::changes::ChangeSet;
use crate::decide::DecisionMap;
use crate::errors::Result;

const MAX_LISTED_CHANGES: usize = 10;

/// Where to write the summary: the CLI value if given, else the
/// `GITHUB_STEP_SUMMARY` environment variable, else nowhere.
pub fn summary_target(cli_value: Option<&str>) -> Option<PathBuf> {
    cli_value
        .map(PathBuf::from)
        .or_else(|| env::var_os("GITHUB_STEP_SUMMARY").map(PathBuf::from))
}

/// Append the run summary to `path`.
pub fn write_summary(
    path: &Path,
    change_set: &ChangeSet,
    decisions: &DecisionMap,
) -> Result<()> {
    let mut out = String::new();
    out.push_str("\n\n## Artifact check results\n\n");

    match change_set {
        ChangeSet::Known(files) if files.is_empty() => {
            out.push_str("Changed files:\n\nNone\n\n");
        }
        ChangeSet::Known(files) => {
            out.push_str("Changed files:\n\n");
            for file in files.iter().take(MAX_LISTED_CHANGES) {
                out.push_str(&format!("- {file}\n"));
            }
            if files.len() > MAX_LISTED_CHANGES {
                out.push_str("- ...\n");
            }
            out.push('\n');
        }
        ChangeSet::Unknown => {
            out.push_str(
                "Unable to determine changed files - assuming all files may \
                 have changed and recomputing fingerprints\n\n",
            );
        }
    }

    out.push_str("|Job|Changed|Fingerprint|Artifact Key|Exists|\n");
    out.push_str("|---|---|---|---|---|\n");
    for (job, decision) in decisions {
        out.push_str(&format!(
            "|{job}|{}|{}|{}|{}|\n",
            decision.changed, decision.fingerprint, decision.artifact_key, decision.exists
        ));
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening summary file {path:?}"))?;
    file.write_all(out.as_bytes())
        .with_context(|| format!("writing summary file {path:?}"))?;
    Ok(())
}
