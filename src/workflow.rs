// src/workflow.rs

//! Job list extraction from a workflow file.
//!
//! The workflow is a YAML document with a `jobs` mapping; its keys, in
//! declared order, are the job names the decision loop iterates.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::errors::{Result, StalecheckError};

#[derive(Debug, Deserialize)]
struct WorkflowFile {
    #[serde(default)]
    jobs: Option<IndexMap<String, serde_yaml::Value>>,
}

/// Load the workflow file at `path` and return its job names in declared
/// order. A missing or non-mapping `jobs` section is a fatal config error;
/// an empty mapping yields an empty list.
pub fn load_job_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| {
        StalecheckError::ConfigError(format!(
            "reading workflow file {}: {err}",
            path.display()
        ))
    })?;

    let workflow: WorkflowFile = serde_yaml::from_str(&contents).map_err(|err| {
        StalecheckError::ConfigError(format!(
            "parsing workflow file {}: {err}",
            path.display()
        ))
    })?;

    let jobs = workflow.jobs.ok_or_else(|| {
        StalecheckError::ConfigError(format!(
            "workflow file {} has no jobs section",
            path.display()
        ))
    })?;

    let names: Vec<String> = jobs.into_keys().collect();
    debug!(jobs = names.len(), file = %path.display(), "loaded workflow job list");
    Ok(names)
}
