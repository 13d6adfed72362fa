// src/cache.rs

//! Persistent fingerprint cache, keyed by job name.
//!
//! The cache lets runs with no relevant changes reuse the previous
//! fingerprint instead of re-hashing the repository. Absence of an entry is
//! a normal state (first run, or a job added since the last write).

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use crate::errors::Result;

/// Abstract storage for per-job fingerprints.
pub trait FingerprintCache {
    fn get(&self, job: &str) -> Result<Option<String>>;
    fn set(&mut self, job: &str, fingerprint: &str) -> Result<()>;
}

/// Stores fingerprints as one file per job, `<dir>/<job>.hash`, holding the
/// bare fingerprint string.
#[derive(Debug, Clone)]
pub struct DirFingerprintCache {
    dir: PathBuf,
}

impl DirFingerprintCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, job: &str) -> PathBuf {
        self.dir.join(format!("{job}.hash"))
    }
}

impl FingerprintCache for DirFingerprintCache {
    fn get(&self, job: &str) -> Result<Option<String>> {
        let path = self.entry_path(job);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading cached fingerprint {path:?}"))?;
        Ok(Some(contents.trim().to_string()))
    }

    fn set(&mut self, job: &str, fingerprint: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating cache dir {:?}", self.dir))?;
        let path = self.entry_path(job);
        fs::write(&path, fingerprint)
            .with_context(|| format!("writing cached fingerprint {path:?}"))?;
        debug!(job = %job, fingerprint = %fingerprint, "stored fingerprint (dir)");
        Ok(())
    }
}

/// Stores fingerprints in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryFingerprintCache {
    map: HashMap<String, String>,
}

impl MemoryFingerprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FingerprintCache for MemoryFingerprintCache {
    fn get(&self, job: &str) -> Result<Option<String>> {
        Ok(self.map.get(job).cloned())
    }

    fn set(&mut self, job: &str, fingerprint: &str) -> Result<()> {
        self.map.insert(job.to_string(), fingerprint.to_string());
        debug!(job = %job, fingerprint = %fingerprint, "stored fingerprint (memory)");
        Ok(())
    }
}
