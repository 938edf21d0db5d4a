//! repo-to-text: flatten a repository into a single text file
//!
//! The library fetches a repository snapshot, walks its tree, drops files
//! matched by exclusion patterns (or too large, or binary), and concatenates
//! the rest behind `File:`/`Size:` headers.

pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod patterns;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod utils;

pub use config::{load_config, Config};
pub use error::{Error, Result};
pub use patterns::{is_excluded, load_patterns, ExclusionMatcher, PatternSet};
pub use pipeline::{flatten_context, flatten_directory, flatten_repository, FlattenSummary, Stage};
pub use render::ProcessingOutcome;
pub use scan::walk;
