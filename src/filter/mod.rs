// src/filter/mod.rs

//! Filter matching and fingerprint computation.
//!
//! A [`Filter`] binds a job-name regex to a set of path patterns and an
//! optional skip condition. It answers two questions for the decision loop:
//!
//! - is any changed file relevant to this job? ([`Filter::is_relevant`])
//! - what is the content fingerprint of everything this job depends on?
//!   ([`Filter::fingerprint_from_content`] /
//!   [`Filter::fingerprint_from_object_ids`])

use std::cell::OnceCell;
use std::io::Read;

use regex::Regex;
use sha1::{Digest, Sha1};
use tracing::debug;

use crate::errors::{Result, StalecheckError};
use crate::repo::ContentReader;

pub mod catalog;
pub mod pattern;
pub mod skip;

pub use catalog::FilterCatalog;
pub use pattern::PathPattern;
pub use skip::SkipCondition;

/// A repository-relative path together with a precomputed content
/// identifier (e.g. a git blob id).
///
/// Input to [`Filter::fingerprint_from_object_ids`], which hashes the
/// identifier instead of reading file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileObjectId {
    pub path: String,
    pub object_id: String,
}

/// One filter from the catalog: a job-name regex, an ordered list of file
/// patterns and an optional skip condition.
///
/// The computed fingerprint is memoized on the filter and is
/// input-independent after the first call: a `Filter` is built per run and
/// fingerprinted at most once by the decision loop, against one consistent
/// repository state. Callers that invoke a fingerprint method twice with
/// different inputs get the first digest back.
#[derive(Debug)]
pub struct Filter {
    name_expression: String,
    name_regex: Regex,
    files: Vec<PathPattern>,
    skip_if: Option<SkipCondition>,
    fingerprint: OnceCell<String>,
}

impl Filter {
    /// Build a filter, validating everything that must not fail later:
    /// the name regex compiles, the file-pattern list is non-empty, and
    /// every file and skip pattern compiles.
    pub fn new(
        name_expression: impl Into<String>,
        files: Vec<PathPattern>,
        skip_if: Option<SkipCondition>,
    ) -> Result<Self> {
        let name_expression = name_expression.into();
        let name_regex = Regex::new(&name_expression).map_err(|source| {
            StalecheckError::PatternError {
                expression: name_expression.clone(),
                source,
            }
        })?;

        if files.is_empty() {
            return Err(StalecheckError::ConfigError(format!(
                "filter '{name_expression}' has no file patterns"
            )));
        }
        for pattern in &files {
            pattern.compile()?;
        }
        if let Some(skip) = &skip_if {
            for pattern in skip.patterns() {
                pattern.compile()?;
            }
        }

        Ok(Self {
            name_expression,
            name_regex,
            files,
            skip_if,
            fingerprint: OnceCell::new(),
        })
    }

    /// The raw job-name expression this filter was declared with.
    pub fn name_expression(&self) -> &str {
        &self.name_expression
    }

    /// Regex test of the job-name expression against `name`.
    pub fn matches_job_name(&self, name: &str) -> bool {
        self.name_regex.is_match(name)
    }

    /// True if `path` matches any of this filter's file patterns.
    pub fn matches_file(&self, path: &str) -> bool {
        self.files.iter().any(|pat| pat.matches(path))
    }

    /// Decide whether any of `paths` is relevant to this filter.
    ///
    /// One pass over the sequence: `matched` flips true on the first path
    /// matching a file pattern and is not re-checked after that; the skip
    /// state flips false on the first path that no skip pattern matches and
    /// is evaluated across the whole sequence.
    pub fn is_relevant(&self, paths: &[String]) -> bool {
        let skip_patterns: &[PathPattern] =
            self.skip_if.as_ref().map_or(&[], SkipCondition::patterns);

        let mut matched = false;
        let mut all_match_skip = !skip_patterns.is_empty();

        for path in paths {
            if !matched && self.matches_file(path) {
                matched = true;
            }
            if all_match_skip && !skip_patterns.iter().any(|pat| pat.matches(path)) {
                debug!(
                    filter = %self.name_expression,
                    path = %path,
                    "skip condition missed a changed file"
                );
                all_match_skip = false;
            }
        }

        debug!(
            filter = %self.name_expression,
            matched,
            skip_triggered = all_match_skip,
            "relevance evaluated"
        );
        matched && !all_match_skip
    }

    /// Fingerprint the repository content this filter covers.
    ///
    /// For each path in sequence order, the first matching file pattern
    /// claims it: the path's bytes and then its content bytes (streamed
    /// through `reader`) are fed into a SHA-1 digest, and no further
    /// patterns are consulted for that path. Paths matching no pattern
    /// contribute nothing.
    ///
    /// The hex digest is memoized; see the type-level note on memoization.
    /// Any read failure aborts without memoizing.
    pub fn fingerprint_from_content(
        &self,
        paths: &[String],
        reader: &dyn ContentReader,
    ) -> Result<String> {
        if let Some(existing) = self.fingerprint.get() {
            debug!(
                filter = %self.name_expression,
                fingerprint = %existing,
                "fingerprint already computed"
            );
            return Ok(existing.clone());
        }

        let mut hasher = Sha1::new();
        for path in paths {
            if !self.matches_file(path) {
                continue;
            }
            debug!(filter = %self.name_expression, path = %path, "hashing file");
            hasher.update(path.as_bytes());

            let mut content = reader.open(path)?;
            let mut buf = [0u8; 8192];
            loop {
                let n = content.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
            }
        }

        let digest = hex::encode(hasher.finalize());
        debug!(filter = %self.name_expression, fingerprint = %digest, "computed fingerprint");
        Ok(self.fingerprint.get_or_init(|| digest).clone())
    }

    /// Fingerprint from precomputed content identifiers instead of file
    /// content. Same attribution rules as [`fingerprint_from_content`], but
    /// the identifier bytes stand in for the content bytes, so no I/O
    /// happens and the digest differs from the content-based one.
    ///
    /// Shares the same memo cell as the content-based method.
    ///
    /// [`fingerprint_from_content`]: Filter::fingerprint_from_content
    pub fn fingerprint_from_object_ids(&self, files: &[FileObjectId]) -> String {
        if let Some(existing) = self.fingerprint.get() {
            debug!(
                filter = %self.name_expression,
                fingerprint = %existing,
                "fingerprint already computed"
            );
            return existing.clone();
        }

        let mut hasher = Sha1::new();
        for file in files {
            if !self.matches_file(&file.path) {
                continue;
            }
            debug!(filter = %self.name_expression, path = %file.path, "hashing object id");
            hasher.update(file.path.as_bytes());
            hasher.update(file.object_id.as_bytes());
        }

        let digest = hex::encode(hasher.finalize());
        debug!(filter = %self.name_expression, fingerprint = %digest, "computed fingerprint");
        self.fingerprint.get_or_init(|| digest).clone()
    }
}
