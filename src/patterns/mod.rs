//! Exclusion patterns: loading, merging, and matching.

pub mod loader;
pub mod matcher;
pub mod set;

pub use loader::{load_patterns, parse_pattern_lines, DEFAULT_PATTERN_FILES};
pub use matcher::{is_excluded, ExclusionMatcher};
pub use set::{ExclusionSource, PatternSet};
