// src/store.rs

//! Artifact store boundary.
//!
//! The store itself (upload, download, the remote protocol) lives outside
//! this crate; the decision loop only needs to know whether an artifact is
//! already present under a derived key.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::errors::Result;

/// Existence checks against an artifact store.
pub trait ArtifactStore {
    fn exists(&self, key: &str) -> Result<bool>;
}

/// Store rooted at a local directory. An artifact is present when
/// `<root>/<key>/artifacts.zip` exists, mirroring the blob layout the
/// uploader writes.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.root.join(key).join("artifacts.zip").is_file())
    }
}

/// In-memory store for tests: a set of keys that "exist".
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactStore {
    keys: HashSet<String>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.keys.contains(key))
    }
}
