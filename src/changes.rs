// src/changes.rs

//! The changed-file set for a run, and the git provider that produces it.

use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

/// The set of repository-relative paths considered changed for this run.
///
/// `Unknown` means the changes could not be determined (detached build,
/// manual dispatch, git failure); every job is then treated as changed and
/// cached fingerprints are bypassed. Deliberately a tagged variant rather
/// than an optional list, so "no changes" and "undeterminable" cannot be
/// conflated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSet {
    Known(Vec<String>),
    Unknown,
}

impl ChangeSet {
    pub fn is_unknown(&self) -> bool {
        matches!(self, ChangeSet::Unknown)
    }
}

/// Determine the changed files by diffing the working tree against
/// `base_ref` (`git diff --name-only <base_ref>`).
///
/// Any failure to run git, or a non-zero exit, degrades to
/// [`ChangeSet::Unknown`] with a warning rather than aborting: the decision
/// loop has a defined conservative fallback for this collaborator.
pub fn git_changed_files(repo_root: &Path, base_ref: &str) -> ChangeSet {
    let output = Command::new("git")
        .arg("diff")
        .arg("--name-only")
        .arg(base_ref)
        .current_dir(repo_root)
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let files: Vec<String> = stdout
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string)
                .collect();
            info!(count = files.len(), base = %base_ref, "changed files from git");
            ChangeSet::Known(files)
        }
        Ok(out) => {
            warn!(
                status = %out.status,
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "git diff failed; assuming all files changed"
            );
            ChangeSet::Unknown
        }
        Err(err) => {
            warn!(error = %err, "could not run git; assuming all files changed");
            ChangeSet::Unknown
        }
    }
}
