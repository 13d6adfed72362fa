// src/repo.rs

//! Repository file listing and streaming content access.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result as AnyResult};

use crate::errors::Result;

/// Streaming access to repository file content for fingerprinting.
///
/// Paths are repository-relative, forward-slash separated. The fingerprint
/// code never touches the filesystem directly, so hashing is testable
/// against an in-memory substitute.
pub trait ContentReader {
    fn open(&self, rel_path: &str) -> AnyResult<Box<dyn Read>>;
}

/// Reader backed by a real directory tree.
#[derive(Debug, Clone)]
pub struct FsContentReader {
    root: PathBuf,
}

impl FsContentReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentReader for FsContentReader {
    fn open(&self, rel_path: &str) -> AnyResult<Box<dyn Read>> {
        let path = self.root.join(rel_path);
        let file = fs::File::open(&path)
            .with_context(|| format!("opening file for fingerprinting: {path:?}"))?;
        Ok(Box::new(file))
    }
}

/// In-memory reader for tests: maps relative paths to content bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentReader {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryContentReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rel_path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(rel_path.into(), contents.into());
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl ContentReader for MemoryContentReader {
    fn open(&self, rel_path: &str) -> AnyResult<Box<dyn Read>> {
        let contents = self
            .files
            .get(rel_path)
            .with_context(|| format!("no such file: {rel_path}"))?;
        Ok(Box::new(Cursor::new(contents.clone())))
    }
}

/// Recursively list all files under `root`, skipping `.git`.
///
/// Returns sorted repository-relative paths with forward slashes, the same
/// shape the filter patterns are written against.
pub fn list_repo_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir)
            .with_context(|| format!("reading dir {dir:?}"))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("reading dir entry in {dir:?}"))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .with_context(|| format!("stat {path:?}"))?;
            if file_type.is_dir() {
                if entry.file_name() == ".git" {
                    continue;
                }
                stack.push(path);
            } else if file_type.is_file() {
                if let Ok(rel) = path.strip_prefix(root) {
                    files.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
    }

    files.sort();
    Ok(files)
}
