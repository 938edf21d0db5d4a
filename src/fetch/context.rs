//! Scoped ownership of a fetched repository directory

use std::path::PathBuf;

/// A repository checkout on disk.
///
/// When `is_temp` is set the directory is deleted exactly once, when the
/// context is dropped, on every exit path.
#[derive(Debug)]
pub struct RepoContext {
    pub root_path: PathBuf,
    pub is_temp: bool,
}

impl RepoContext {
    pub fn new(root_path: PathBuf, is_temp: bool) -> Self {
        Self { root_path, is_temp }
    }
}

impl Drop for RepoContext {
    fn drop(&mut self) {
        if self.is_temp && self.root_path.exists() {
            match std::fs::remove_dir_all(&self.root_path) {
                Ok(()) => tracing::debug!("Removed temporary directory {}", self.root_path.display()),
                Err(e) => tracing::warn!(
                    "Failed to remove temporary directory {}: {}",
                    self.root_path.display(),
                    e
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RepoContext;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn temp_context_removes_directory_on_drop() {
        let tmp = TempDir::new().expect("tmp");
        let dir = tmp.path().join("clone");
        fs::create_dir_all(dir.join("src")).expect("mkdir");
        fs::write(dir.join("src/lib.rs"), "").expect("write");

        drop(RepoContext::new(dir.clone(), true));
        assert!(!dir.exists());
    }

    #[test]
    fn non_temp_context_keeps_directory() {
        let tmp = TempDir::new().expect("tmp");
        drop(RepoContext::new(tmp.path().to_path_buf(), false));
        assert!(tmp.path().exists());
    }
}
