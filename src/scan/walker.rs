//! Depth-first repository walk feeding accepted files into the aggregator.

use crate::domain::{FileEntry, PRUNED_DIRS};
use crate::error::{Error, Result};
use crate::patterns::ExclusionMatcher;
use crate::render::ProcessingOutcome;
use crate::utils::encoding::BINARY_SAMPLE_SIZE;
use crate::utils::{is_binary_file, read_file_safe, relative_slash_path};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walks a checked-out repository and flattens every file that survives
/// the exclusion patterns and the size/binary checks.
pub struct TreeWalker<'a> {
    root_path: PathBuf,
    matcher: &'a ExclusionMatcher,
    max_file_bytes: u64,
    include_all: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root_path: PathBuf, matcher: &'a ExclusionMatcher) -> Self {
        Self { root_path, matcher, max_file_bytes: 104_857, include_all: false }
    }

    /// Set maximum file size in bytes
    pub fn max_file_bytes(mut self, max_bytes: u64) -> Self {
        self.max_file_bytes = max_bytes;
        self
    }

    /// Disable the size and binary checks
    pub fn include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    /// Walk the tree in filesystem order.
    ///
    /// Only a failure to list a directory aborts the walk; per-file failures
    /// are counted as skips.
    pub fn walk(&self) -> Result<ProcessingOutcome> {
        let mut outcome = ProcessingOutcome::new();

        let walker = WalkDir::new(&self.root_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_pruned(entry));

        for entry_result in walker {
            let entry = entry_result.map_err(|source| Error::ListDirectory {
                path: source.path().map(Path::to_path_buf).unwrap_or_else(|| self.root_path.clone()),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(relative_path) = relative_slash_path(&self.root_path, entry.path()) else {
                continue;
            };
            self.visit_file(entry.path(), relative_path, &mut outcome);
        }

        Ok(outcome.finish())
    }

    fn visit_file(&self, path: &Path, relative_path: String, outcome: &mut ProcessingOutcome) {
        if self.matcher.is_excluded(&relative_path) {
            tracing::debug!("Excluded by pattern: {}", relative_path);
            outcome.skip();
            return;
        }

        let size_bytes = match path.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                tracing::debug!("Failed to stat {}: {}", relative_path, e);
                outcome.skip();
                return;
            }
        };
        let mut file = FileEntry::new(path.to_path_buf(), relative_path, size_bytes);

        if !self.include_all {
            if file.size_bytes > self.max_file_bytes {
                tracing::debug!(
                    "Skipping {} ({} bytes > {} byte threshold)",
                    file.relative_path,
                    file.size_bytes,
                    self.max_file_bytes
                );
                outcome.skip();
                return;
            }
            if file.is_binary(|p| is_binary_file(p, BINARY_SAMPLE_SIZE)) {
                tracing::debug!("Skipping binary file {}", file.relative_path);
                outcome.skip();
                return;
            }
        }

        match read_file_safe(&file.path) {
            Ok(content) => outcome.append(&file.relative_path, file.size_bytes, &content),
            Err(e) => {
                tracing::debug!("Failed to read {}: {}", file.relative_path, e);
                outcome.skip();
            }
        }
    }
}

/// Dot-prefixed entries, dependency and VCS directories are never visited.
fn is_pruned(entry: &DirEntry) -> bool {
    let name = entry.file_name();
    // Raw bytes, so names that are not valid UTF-8 are still recognised
    if name.as_encoded_bytes().starts_with(b".") {
        return true;
    }
    entry.file_type().is_dir() && PRUNED_DIRS.iter().any(|pruned| name == *pruned)
}

/// Walk `root` with the given matcher and limits.
pub fn walk(
    root: &Path,
    matcher: &ExclusionMatcher,
    max_file_bytes: u64,
    include_all: bool,
) -> Result<ProcessingOutcome> {
    TreeWalker::new(root.to_path_buf(), matcher)
        .max_file_bytes(max_file_bytes)
        .include_all(include_all)
        .walk()
}
