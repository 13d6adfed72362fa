// src/lib.rs

pub mod cache;
pub mod changes;
pub mod cli;
pub mod decide;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod repo;
pub mod store;
pub mod summary;
pub mod workflow;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cache::DirFingerprintCache;
use crate::changes::ChangeSet;
use crate::cli::CliArgs;
use crate::decide::{decide_jobs, DecisionMap};
use crate::errors::Result;
use crate::filter::FilterCatalog;
use crate::repo::FsContentReader;
use crate::store::{ArtifactStore, LocalArtifactStore};

/// High-level entry point used by `main.rs`.
///
/// Wires together:
/// - filter catalog + workflow job list loading
/// - change detection (git, unless `--assume-changed`)
/// - repository listing and fingerprinting
/// - the fingerprint cache
/// - artifact existence checks and the run summary
///
/// Prints the decision map as pretty JSON on stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let catalog = FilterCatalog::load(&args.filter_file)?;
    info!(
        filters = catalog.len(),
        file = %args.filter_file,
        "loaded filter catalog"
    );

    let job_names = workflow::load_job_names(&args.workflow_file)?;
    info!(
        jobs = job_names.len(),
        file = %args.workflow_file,
        "loaded workflow job list"
    );

    let repo_root = PathBuf::from(&args.repo_root);

    let change_set = if args.assume_changed {
        info!("--assume-changed set; treating every job as changed");
        ChangeSet::Unknown
    } else {
        changes::git_changed_files(&repo_root, &args.base_ref)
    };

    let repo_files = repo::list_repo_files(&repo_root)?;
    debug!(files = repo_files.len(), "listed repository files");

    let reader = FsContentReader::new(&repo_root);
    let mut cache = DirFingerprintCache::new(&args.cache_dir);

    let mut decisions = decide_jobs(
        &catalog,
        &job_names,
        &change_set,
        &repo_files,
        &reader,
        &mut cache,
        &args.namespace,
    )?;

    if let Some(root) = &args.artifact_root {
        fill_existence(&LocalArtifactStore::new(root), &mut decisions)?;
    }

    if let Some(target) = summary::summary_target(args.summary_file.as_deref()) {
        summary::write_summary(&target, &change_set, &decisions)?;
    }

    println!("{}", serde_json::to_string_pretty(&decisions)?);
    Ok(())
}

/// Resolve each decision's artifact key against the store and record
/// whether the artifact already exists.
pub fn fill_existence(
    store: &dyn ArtifactStore,
    decisions: &mut DecisionMap,
) -> Result<()> {
    for (job, decision) in decisions.iter_mut() {
        decision.exists = store.exists(&decision.artifact_key)?;
        debug!(job = %job, exists = decision.exists, "artifact existence checked");
    }
    Ok(())
}
