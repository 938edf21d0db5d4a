//! Exclusion decisions for single relative paths.
//!
//! Positive patterns exclude, `!`-prefixed patterns re-include. A path is
//! excluded only when it matches at least one positive pattern and no
//! negative pattern. Patterns without a `/` match the basename at any depth.

use crate::patterns::PatternSet;
use crate::utils::normalize_path;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Compiled form of a [`PatternSet`].
///
/// Malformed patterns are reported with `warn!` while compiling and then
/// behave as if they never match.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    positives: Option<GlobSet>,
    negatives: Option<GlobSet>,
}

impl ExclusionMatcher {
    pub fn new(patterns: &PatternSet) -> Self {
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for pattern in patterns.iter() {
            match pattern.strip_prefix('!') {
                Some(body) if !body.is_empty() => negative.push(expand_pattern(body)),
                Some(_) => {}
                None => positive.push(expand_pattern(pattern)),
            }
        }

        Self { positives: compile(&positive), negatives: compile(&negative) }
    }

    /// Matcher that excludes nothing.
    pub fn empty() -> Self {
        Self { positives: None, negatives: None }
    }

    pub fn is_excluded(&self, relative_path: &str) -> bool {
        let Some(positives) = &self.positives else {
            return false;
        };

        let path = normalize_path(relative_path);
        if !positives.is_match(&path) {
            return false;
        }

        match &self.negatives {
            Some(negatives) if negatives.is_match(&path) => {
                tracing::debug!("{} re-included by negation pattern", path);
                false
            }
            _ => true,
        }
    }
}

/// One-shot form of [`ExclusionMatcher::is_excluded`].
pub fn is_excluded(relative_path: &str, patterns: &PatternSet) -> bool {
    if patterns.is_empty() {
        return false;
    }
    ExclusionMatcher::new(patterns).is_excluded(relative_path)
}

/// Anchor separator-free patterns at any depth.
fn expand_pattern(pattern: &str) -> String {
    if pattern.contains('/') {
        pattern.to_string()
    } else {
        format!("**/{}", pattern)
    }
}

/// Build a glob set, skipping patterns that fail to compile.
/// Returns `None` when nothing usable remains.
fn compile(patterns: &[String]) -> Option<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let mut added = 0usize;

    for pattern in patterns {
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => {
                builder.add(glob);
                added += 1;
            }
            Err(e) => tracing::warn!("Ignoring invalid exclude pattern '{}': {}", pattern, e),
        }
    }

    if added == 0 {
        return None;
    }

    match builder.build() {
        Ok(set) => Some(set),
        Err(e) => {
            tracing::warn!("Failed to compile exclude patterns: {}", e);
            None
        }
    }
}
