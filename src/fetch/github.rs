//! Anonymous repository cloning with git2

use crate::error::{Error, Result};
use crate::fetch::RepoContext;
use git2::{FetchOptions, ObjectType, Repository};
use std::env;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Clone `url` into a fresh temporary directory.
///
/// The returned [`RepoContext`] owns the directory; it is removed when the
/// context is dropped, including when this function fails part way.
pub fn clone_repository(url: &str, ref_: Option<&str>) -> Result<RepoContext> {
    clone_into(url, ref_, build_temp_repo_dir())
}

fn clone_into(url: &str, ref_: Option<&str>, temp_dir: PathBuf) -> Result<RepoContext> {
    std::fs::create_dir_all(&temp_dir)
        .map_err(|source| Error::TempDir { path: temp_dir.clone(), source })?;
    let context = RepoContext::new(temp_dir, true);

    tracing::info!("Cloning {} into {}", url, context.root_path.display());

    if let Some(reference) = ref_ {
        // Specific ref: try shallow clone targeting the branch first, fall back to full clone.
        let repo = shallow_clone(url, &context.root_path, Some(reference))
            .or_else(|e| {
                tracing::debug!("Shallow clone of {} failed ({}), retrying full clone", reference, e);
                full_clone(url, &context.root_path)
            })?;
        checkout_ref(&repo, url, reference)?;
    } else {
        shallow_clone(url, &context.root_path, None).or_else(|e| {
            tracing::debug!("Shallow clone failed ({}), retrying full clone", e);
            full_clone(url, &context.root_path)
        })?;
    }

    ensure_not_empty(&context.root_path, url)?;
    Ok(context)
}

/// Shallow clone (depth=1), optionally targeting a branch name.
fn shallow_clone(url: &str, dest: &Path, branch: Option<&str>) -> Result<Repository> {
    let mut fo = FetchOptions::new();
    fo.depth(1);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fo);
    if let Some(branch) = branch {
        builder.branch(branch);
    }

    builder.clone(url, dest).map_err(|e| Error::fetch(url, e.message()))
}

fn full_clone(url: &str, dest: &Path) -> Result<Repository> {
    // A failed shallow attempt can leave a partial checkout behind
    clear_directory(dest);
    Repository::clone(url, dest).map_err(|e| Error::fetch(url, e.message()))
}

fn checkout_ref(repo: &Repository, url: &str, reference: &str) -> Result<()> {
    let object = repo
        .revparse_single(reference)
        .or_else(|_| repo.revparse_single(&format!("origin/{reference}")))
        .map_err(|e| Error::fetch(url, format!("cannot resolve ref '{reference}': {}", e.message())))?;

    repo.checkout_tree(&object, None).map_err(|e| {
        Error::fetch(url, format!("cannot check out ref '{reference}': {}", e.message()))
    })?;

    let commit = object.peel(ObjectType::Commit).map_err(|e| {
        Error::fetch(url, format!("ref '{reference}' is not a commit: {}", e.message()))
    })?;
    repo.set_head_detached(commit.id()).map_err(|e| {
        Error::fetch(url, format!("cannot detach HEAD at '{reference}': {}", e.message()))
    })?;

    Ok(())
}

/// A clone with nothing besides `.git` is treated as a fetch failure.
fn ensure_not_empty(root: &Path, url: &str) -> Result<()> {
    let has_content = std::fs::read_dir(root)
        .map_err(|e| Error::fetch(url, format!("cannot read clone directory: {e}")))?
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name() != ".git");

    if has_content {
        Ok(())
    } else {
        Err(Error::EmptyRepository { url: url.to_string() })
    }
}

fn clear_directory(dir: &Path) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let _ = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
        }
    }
}

fn build_temp_repo_dir() -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let pid = std::process::id();
    env::temp_dir().join(format!("repo-to-text-{pid}-{nanos}"))
}

/// Initialise a git repository in `dir` with one commit holding `files`,
/// returning a `file://` URL for it.
#[cfg(test)]
pub(crate) fn init_local_repository(dir: &Path, files: &[(&str, &str)]) -> String {
    let repo = Repository::init(dir).expect("init");
    let mut index = repo.index().expect("index");
    for (rel, content) in files {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        std::fs::write(&path, content).expect("write");
        index.add_path(Path::new(rel)).expect("add");
    }
    index.write().expect("write index");
    let tree_id = index.write_tree().expect("tree");
    let tree = repo.find_tree(tree_id).expect("find tree");
    let sig = git2::Signature::now("Test", "test@example.com").expect("sig");
    repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[]).expect("commit");

    format!("file://{}", dir.display())
}
