// src/filter/catalog.rs

//! Loading and validation of the filter catalog.
//!
//! The catalog is a YAML list:
//!
//! ```yaml
//! - name: "^build$"
//!   files: ["^src/.*\\.ts$"]
//!   skip-if:
//!     all-files-match-any: ["^docs/.*"]
//! ```
//!
//! Deserialization produces [`RawFilterEntry`] values; validation turns each
//! into a [`Filter`] via `TryFrom`. Any invalid entry aborts the whole load,
//! so a loaded catalog is fully validated or does not exist.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{Result, StalecheckError};
use crate::filter::pattern::PathPattern;
use crate::filter::skip::SkipCondition;
use crate::filter::Filter;

/// One catalog entry as it appears on disk, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFilterEntry {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub files: Option<Vec<String>>,

    #[serde(default, rename = "skip-if")]
    pub skip_if: Option<RawSkipIf>,
}

/// The `skip-if` block of a catalog entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSkipIf {
    #[serde(default, rename = "all-files-match-any")]
    pub all_files_match_any: Vec<String>,
}

impl TryFrom<RawFilterEntry> for Filter {
    type Error = StalecheckError;

    fn try_from(raw: RawFilterEntry) -> Result<Filter> {
        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                StalecheckError::ConfigError(
                    "filter entry is missing a name".to_string(),
                )
            })?;

        let files = raw.files.unwrap_or_default();
        if files.is_empty() {
            return Err(StalecheckError::ConfigError(format!(
                "filter '{name}' has a missing or empty files list"
            )));
        }
        let patterns = files.into_iter().map(PathPattern::new).collect();

        // A `skip-if` block without patterns behaves as if absent.
        let skip_if = match raw.skip_if {
            Some(raw_skip) if !raw_skip.all_files_match_any.is_empty() => {
                Some(SkipCondition::new(
                    raw_skip
                        .all_files_match_any
                        .into_iter()
                        .map(PathPattern::new)
                        .collect(),
                ))
            }
            _ => None,
        };

        Filter::new(name, patterns, skip_if)
    }
}

/// Ordered collection of filters; order determines match precedence.
#[derive(Debug, Default)]
pub struct FilterCatalog {
    filters: Vec<Filter>,
}

impl FilterCatalog {
    /// Load and validate a catalog from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| {
            StalecheckError::ConfigError(format!(
                "reading filter catalog {}: {err}",
                path.display()
            ))
        })?;
        Self::parse(&contents).map_err(|err| match err {
            StalecheckError::ConfigError(msg) => StalecheckError::ConfigError(
                format!("filter catalog {}: {msg}", path.display()),
            ),
            other => other,
        })
    }

    /// Parse and validate a catalog from YAML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let raw: Vec<RawFilterEntry> =
            serde_yaml::from_str(contents).map_err(|err| {
                StalecheckError::ConfigError(format!("not a filter list: {err}"))
            })?;
        if raw.is_empty() {
            return Err(StalecheckError::ConfigError(
                "filter list is empty".to_string(),
            ));
        }
        Self::from_entries(raw)
    }

    /// Validate raw entries into a catalog. Fails on the first bad entry.
    pub fn from_entries(entries: Vec<RawFilterEntry>) -> Result<Self> {
        let filters = entries
            .into_iter()
            .map(Filter::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { filters })
    }

    /// Build a catalog from already-validated filters.
    pub fn from_filters(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// First filter in catalog order whose name expression matches
    /// `job_name`, if any. Later entries are never consulted once a match
    /// is found.
    pub fn resolve(&self, job_name: &str) -> Option<&Filter> {
        let found = self
            .filters
            .iter()
            .find(|f| f.matches_job_name(job_name));
        if let Some(filter) = found {
            debug!(
                job = %job_name,
                filter = %filter.name_expression(),
                "resolved filter"
            );
        }
        found
    }
}
