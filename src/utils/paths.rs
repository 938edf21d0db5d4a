//! Path normalization

use std::path::Path;

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes
    path.replace('\\', "/")
}

/// Path of `path` relative to `root`, with forward slashes.
///
/// Returns `None` when `path` does not live under `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(normalize_path(&rel.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn backslashes_become_forward_slashes() {
        assert_eq!(normalize_path(r"src\components\Button.js"), "src/components/Button.js");
        assert_eq!(normalize_path("already/fine.rs"), "already/fine.rs");
    }

    #[test]
    fn relative_path_strips_root() {
        let root = PathBuf::from("/tmp/repo");
        let file = root.join("src").join("index.js");
        assert_eq!(relative_slash_path(&root, &file).as_deref(), Some("src/index.js"));
        assert_eq!(relative_slash_path(&root, Path::new("/elsewhere/a.rs")), None);
    }
}
