//! Ordered, deduplicated collection of exclusion patterns.

use std::collections::HashSet;
use std::fmt;

/// Where a pattern came from. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionSource {
    CliPattern,
    PatternFile,
    DefaultPatternFile,
}

impl fmt::Display for ExclusionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExclusionSource::CliPattern => "cli-pattern",
            ExclusionSource::PatternFile => "pattern-file",
            ExclusionSource::DefaultPatternFile => "default-pattern-file",
        };
        f.write_str(label)
    }
}

/// Set of glob patterns that keeps first-seen order and drops duplicates.
///
/// Patterns prefixed with `!` are negations; the prefix is kept verbatim so
/// `foo` and `!foo` are distinct members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<String>,
    seen: HashSet<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pattern. Returns `false` if it was already present.
    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into();
        if self.seen.contains(&pattern) {
            return false;
        }
        self.seen.insert(pattern.clone());
        self.patterns.push(pattern);
        true
    }

    /// Union `other` into `self`, keeping `self`'s order first.
    pub fn union(&mut self, other: PatternSet) {
        self.extend(other.patterns);
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.seen.contains(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}

impl<S: Into<String>> Extend<S> for PatternSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for pattern in iter {
            self.insert(pattern);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for PatternSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = PatternSet::new();
        set.extend(iter);
        set
    }
}
