//! Exclusion pattern loading from CLI flags, a pattern file, and default files.

use crate::error::{Error, Result};
use crate::patterns::{ExclusionSource, PatternSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default pattern files looked up in the repository root, first found wins.
pub const DEFAULT_PATTERN_FILES: &[&str] = &[".repo-to-text-ignore", "repo-to-text-ignore.txt"];

/// Gather exclusion patterns from every source into one set.
///
/// An unreadable `pattern_file` is fatal. Default pattern files are optional:
/// absence contributes nothing and other read failures are logged and ignored.
pub fn load_patterns(
    root: &Path,
    explicit: &[String],
    pattern_file: Option<&Path>,
) -> Result<PatternSet> {
    let mut patterns: PatternSet = explicit.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).collect();
    log_source(ExclusionSource::CliPattern, None, patterns.len());

    if let Some(path) = pattern_file {
        let content = fs::read_to_string(path)
            .map_err(|source| Error::PatternFileUnreadable { path: path.to_path_buf(), source })?;
        let from_file = parse_pattern_lines(&content);
        log_source(ExclusionSource::PatternFile, Some(path), from_file.len());
        patterns.union(from_file);
    }

    if let Some((path, from_default)) = load_default_patterns(root) {
        log_source(ExclusionSource::DefaultPatternFile, Some(&path), from_default.len());
        patterns.union(from_default);
    }

    tracing::debug!("Loaded {} exclusion patterns in total", patterns.len());
    Ok(patterns)
}

/// Parse pattern file content: one pattern per line, `#` comments and blank
/// lines skipped, surrounding whitespace trimmed.
pub fn parse_pattern_lines(content: &str) -> PatternSet {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn load_default_patterns(root: &Path) -> Option<(PathBuf, PatternSet)> {
    for name in DEFAULT_PATTERN_FILES {
        let path = root.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => return Some((path, parse_pattern_lines(&content))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                tracing::debug!("Ignoring default pattern file {}: {}", path.display(), e);
                return None;
            }
        }
    }
    None
}

fn log_source(source: ExclusionSource, path: Option<&Path>, count: usize) {
    match path {
        Some(path) => tracing::debug!("{} patterns from {} ({})", count, source, path.display()),
        None => tracing::debug!("{} patterns from {}", count, source),
    }
}
