//! Shared helpers: encoding-aware reads, path normalization, size formatting.

pub mod encoding;
pub mod format;
pub mod paths;

pub use encoding::{is_binary_file, read_file_safe};
pub use format::format_size;
pub use paths::{normalize_path, relative_slash_path};
