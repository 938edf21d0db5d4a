//! Error types for repo-to-text.
//!
//! Every fatal condition funnels into [`Error`]. Per-file problems (a stat or
//! read failure, a malformed glob) are recovered where they happen and never
//! show up here.

use std::path::PathBuf;
use thiserror::Error;

/// Hint printed under clone failures.
pub const FETCH_HINT: &str = "\
  - check your network connection
  - make sure the repository exists and is public
  - double-check the owner/repo spelling and the requested ref";

/// Main error type for repo-to-text operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The repository reference is missing or cannot be turned into a URL.
    #[error("Invalid repository reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    /// Cloning or checking out the repository failed.
    #[error("Failed to fetch {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint:\n{}", h)).unwrap_or_default())]
    Fetch { url: String, message: String, hint: Option<String> },

    /// The clone succeeded but contains no files.
    #[error("Repository {url} is empty")]
    EmptyRepository { url: String },

    /// The temporary download directory could not be created.
    #[error("Failed to create temporary directory {path}: {source}")]
    TempDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicitly requested pattern file could not be read.
    #[error("Failed to read exclude pattern file {path}: {source}")]
    PatternFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory's entries could not be listed during the walk.
    #[error("Failed to list directory {path}: {source}")]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The flattened output could not be persisted.
    #[error("Failed to write output to {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be assembled.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// A configuration value is outside its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Build a [`Error::Fetch`] carrying the standard troubleshooting hint.
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Fetch { url: url.into(), message: message.into(), hint: Some(FETCH_HINT.to_string()) }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_includes_multiline_hint() {
        let err = Error::fetch("https://github.com/a/b.git", "repository not found");
        let rendered = err.to_string();
        assert!(rendered.starts_with("Failed to fetch https://github.com/a/b.git: repository not found"));
        assert!(rendered.contains("hint:"));
        assert!(rendered.contains("network connection"));
        assert!(rendered.lines().count() > 2);
    }

    #[test]
    fn pattern_file_error_keeps_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::PatternFileUnreadable { path: PathBuf::from("ignore.txt"), source: io };
        assert!(err.to_string().contains("ignore.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
