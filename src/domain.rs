//! Core domain types shared between the walker and the pipeline.

use std::path::{Path, PathBuf};

/// Directory names pruned regardless of patterns: dependency and VCS dirs.
pub const PRUNED_DIRS: &[&str] = &["node_modules", ".git"];

/// A file discovered during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Path relative to the repository root, forward slashes only.
    pub relative_path: String,
    pub size_bytes: u64,
    is_binary: Option<bool>,
}

impl FileEntry {
    pub fn new(path: PathBuf, relative_path: String, size_bytes: u64) -> Self {
        Self { path, relative_path, size_bytes, is_binary: None }
    }

    /// Binary flag, computed with `detect` on first use and cached.
    pub fn is_binary(&mut self, detect: impl FnOnce(&Path) -> bool) -> bool {
        if let Some(known) = self.is_binary {
            return known;
        }
        let detected = detect(&self.path);
        self.is_binary = Some(detected);
        detected
    }
}
