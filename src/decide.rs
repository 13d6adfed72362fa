// src/decide.rs

//! The per-job staleness decision loop.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::FingerprintCache;
use crate::changes::ChangeSet;
use crate::errors::Result;
use crate::filter::FilterCatalog;
use crate::repo::ContentReader;

/// Decision record for one job.
///
/// `exists` starts false and is filled in by the artifact-store check; the
/// decision loop derives the key but does not resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDecision {
    pub changed: bool,
    pub fingerprint: String,
    pub artifact_key: String,
    pub exists: bool,
}

/// Decisions keyed by job name, in job-list order.
pub type DecisionMap = IndexMap<String, JobDecision>;

/// Decide, for every job in `job_names` (in order), whether its artifact
/// must be rebuilt, and under which key it should be looked up.
///
/// Per job:
/// 1. resolve its filter; jobs with no matching filter are excluded, not
///    errors;
/// 2. an [`ChangeSet::Unknown`] change set marks every job changed,
///    otherwise the filter's relevance check decides;
/// 3. unchanged jobs reuse the cached fingerprint when one exists; anything
///    else is fingerprinted from `repo_files` content;
/// 4. the fingerprint is written back to the cache either way, so the
///    backing store is refreshed every run;
/// 5. the artifact key is `<namespace>/<job>_<fingerprint>`.
///
/// A content-read failure during fingerprinting aborts the whole run; no
/// partial decision map is returned.
pub fn decide_jobs(
    catalog: &FilterCatalog,
    job_names: &[String],
    change_set: &ChangeSet,
    repo_files: &[String],
    reader: &dyn ContentReader,
    cache: &mut dyn FingerprintCache,
    namespace: &str,
) -> Result<DecisionMap> {
    let mut decisions = DecisionMap::new();

    for job in job_names {
        let Some(filter) = catalog.resolve(job) else {
            debug!(job = %job, "no filter matches job; excluded from decisions");
            continue;
        };

        let changed = match change_set {
            ChangeSet::Unknown => true,
            ChangeSet::Known(paths) => filter.is_relevant(paths),
        };

        let cached = if changed { None } else { cache.get(job)? };
        let fingerprint = match cached {
            Some(fp) => {
                debug!(job = %job, fingerprint = %fp, "reusing cached fingerprint");
                fp
            }
            None => filter.fingerprint_from_content(repo_files, reader)?,
        };

        cache.set(job, &fingerprint)?;

        let artifact_key = format!("{namespace}/{job}_{fingerprint}");
        info!(
            job = %job,
            changed,
            fingerprint = %fingerprint,
            key = %artifact_key,
            "job decided"
        );

        decisions.insert(
            job.clone(),
            JobDecision {
                changed,
                fingerprint,
                artifact_key,
                exists: false,
            },
        );
    }

    Ok(decisions)
}
