//! Repository fetching

use crate::error::Result;

pub mod context;
pub mod github;
pub mod reference;

pub use context::RepoContext;
pub use reference::RepoReference;

/// Clone a parsed reference into a temporary directory.
///
/// An explicit `ref_` wins over a branch embedded in a `/tree/<ref>` URL.
pub fn fetch_repository(reference: &RepoReference, ref_: Option<&str>) -> Result<RepoContext> {
    let git_ref = ref_.or(reference.git_ref.as_deref());
    github::clone_repository(&reference.clone_url(), git_ref)
}
