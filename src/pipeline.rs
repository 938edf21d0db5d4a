//! End-to-end flattening: fetch, load patterns, walk, write.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{fetch_repository, RepoContext, RepoReference};
use crate::patterns::{load_patterns, ExclusionMatcher};
use crate::render::{write_output, OutputTarget, ProcessingOutcome};
use crate::scan::TreeWalker;
use std::path::Path;

/// Milestones reported while a repository is flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Fetching(String),
    Processing,
    Writing(OutputTarget),
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub bytes_written: usize,
    pub target: OutputTarget,
}

/// Flatten an already materialized directory.
pub fn flatten_directory(root: &Path, config: &Config) -> Result<ProcessingOutcome> {
    let patterns = load_patterns(root, &config.exclude, config.exclude_file.as_deref())?;
    let matcher = ExclusionMatcher::new(&patterns);

    TreeWalker::new(root.to_path_buf(), &matcher)
        .max_file_bytes(config.threshold_bytes())
        .include_all(config.include_all)
        .walk()
}

/// Fetch `reference`, flatten it, and write the result.
///
/// The temporary clone is removed before this returns, whether or not the
/// run succeeded.
pub fn flatten_repository(
    reference: &str,
    config: &Config,
    mut on_stage: impl FnMut(&Stage),
) -> Result<FlattenSummary> {
    config.validate()?;
    let parsed = RepoReference::parse(reference)?;

    on_stage(&Stage::Fetching(parsed.clone_url()));
    let context = fetch_repository(&parsed, config.git_ref.as_deref())?;

    flatten_context(context, &parsed, config, on_stage)
}

/// Flatten an already fetched checkout and write the result.
///
/// Takes ownership of `context`, so a temporary checkout is gone by the
/// time this returns, on success and on every error.
pub fn flatten_context(
    context: RepoContext,
    parsed: &RepoReference,
    config: &Config,
    mut on_stage: impl FnMut(&Stage),
) -> Result<FlattenSummary> {
    on_stage(&Stage::Processing);
    let outcome = flatten_directory(&context.root_path, config)?;

    let target = match &config.output {
        Some(path) => OutputTarget::from_path(path),
        None => OutputTarget::File(parsed.default_output_name().into()),
    };
    on_stage(&Stage::Writing(target.clone()));
    write_output(&target, &outcome.content)?;

    drop(context);
    Ok(FlattenSummary {
        files_processed: outcome.files_processed,
        files_skipped: outcome.files_skipped,
        bytes_written: outcome.content.len(),
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fetch::github::{clone_repository, init_local_repository};
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    #[test]
    fn pattern_file_excludes_tests_and_dist() {
        let tmp = TempDir::new().expect("tmp");
        let repo = tmp.path().join("repo");
        write(&repo, "src/components/Button.test.js", "test('x')");
        write(&repo, "src/components/Button.js", "export default 1;");
        write(&repo, "dist/bundle.js", "var a;");
        write(&repo, "README.md", "# demo");

        let pattern_file = tmp.path().join("exclude.txt");
        fs::write(&pattern_file, "*.test.js\n\n# build output\ndist/*\n").expect("write patterns");

        let config = Config { exclude_file: Some(pattern_file), ..Config::default() };
        let outcome = flatten_directory(&repo, &config).expect("flatten");

        assert!(!outcome.content.contains("Button.test.js"));
        assert!(!outcome.content.contains("dist/bundle.js"));
        assert!(outcome.content.contains("File: src/components/Button.js"));
        assert!(outcome.content.contains("File: README.md"));
        assert_eq!(outcome.files_skipped, 2);
    }

    #[test]
    fn default_pattern_file_in_repo_root_is_used() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        write(root, "repo-to-text-ignore.txt", "*.lock\n");
        write(root, "Cargo.lock", "lock");
        write(root, "src/main.rs", "fn main() {}");

        let outcome = flatten_directory(root, &Config::default()).expect("flatten");
        assert!(!outcome.content.contains("File: Cargo.lock"));
        assert!(outcome.content.contains("File: src/main.rs"));
        // The plain-text pattern file is an ordinary file and gets embedded
        assert!(outcome.content.contains("File: repo-to-text-ignore.txt"));
    }

    #[test]
    fn threshold_applies_unless_include_all() {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        write(root, "big.txt", &"x".repeat(200_000));
        write(root, "small.txt", "tiny");

        let outcome = flatten_directory(root, &Config::default()).expect("flatten");
        assert_eq!(outcome.files_processed, 1);
        assert_eq!(outcome.files_skipped, 1);

        let config = Config { include_all: true, ..Config::default() };
        let outcome = flatten_directory(root, &config).expect("flatten");
        assert_eq!(outcome.files_processed, 2);
    }

    #[test]
    fn unreadable_pattern_file_aborts() {
        let tmp = TempDir::new().expect("tmp");
        write(tmp.path(), "a.txt", "a");
        let config =
            Config { exclude_file: Some(tmp.path().join("missing.txt")), ..Config::default() };

        let err = flatten_directory(tmp.path(), &config).expect_err("should fail");
        assert!(matches!(err, Error::PatternFileUnreadable { .. }));
    }

    #[test]
    fn invalid_reference_fails_before_fetching() {
        let mut stages = Vec::new();
        let err = flatten_repository("not a repo", &Config::default(), |s| stages.push(s.clone()))
            .expect_err("should fail");
        assert!(matches!(err, Error::InvalidReference { .. }));
        assert!(stages.is_empty());
    }

    #[test]
    fn invalid_threshold_fails_before_fetching() {
        let config = Config { threshold_mb: -0.5, ..Config::default() };
        let err = flatten_repository("owner/repo", &config, |_| {}).expect_err("should fail");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    fn local_clone(upstream: &TempDir) -> RepoContext {
        let url = init_local_repository(
            upstream.path(),
            &[("README.md", "# demo\n"), ("src/lib.rs", "pub fn demo() {}\n")],
        );
        clone_repository(&url, None).expect("clone")
    }

    #[test]
    fn flatten_context_writes_output_and_removes_clone() {
        let upstream = TempDir::new().expect("upstream");
        let out = TempDir::new().expect("out");
        let context = local_clone(&upstream);
        let root = context.root_path.clone();
        let parsed = RepoReference::parse("owner/demo").expect("reference");
        let output = out.path().join("demo.txt");
        let config = Config { output: Some(output.clone()), ..Config::default() };

        let mut stages = Vec::new();
        let summary = flatten_context(context, &parsed, &config, |s| stages.push(s.clone()))
            .expect("flatten");

        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.target, OutputTarget::File(output.clone()));
        assert_eq!(stages.len(), 2);
        let written = fs::read_to_string(&output).expect("read output");
        assert!(written.contains("File: README.md"));
        assert!(written.contains("File: src/lib.rs"));
        assert!(!written.contains(".git"));
        assert!(!root.exists(), "clone should be removed after a successful run");
    }

    #[test]
    fn unreadable_pattern_file_removes_clone() {
        let upstream = TempDir::new().expect("upstream");
        let out = TempDir::new().expect("out");
        let context = local_clone(&upstream);
        let root = context.root_path.clone();
        let parsed = RepoReference::parse("owner/demo").expect("reference");
        let config = Config {
            exclude_file: Some(out.path().join("missing.txt")),
            output: Some(out.path().join("demo.txt")),
            ..Config::default()
        };

        let err = flatten_context(context, &parsed, &config, |_| {}).expect_err("should fail");

        assert!(matches!(err, Error::PatternFileUnreadable { .. }));
        assert!(!root.exists(), "clone should be removed when patterns fail to load");
        assert!(!out.path().join("demo.txt").exists());
    }

    #[test]
    fn failed_write_removes_clone() {
        let upstream = TempDir::new().expect("upstream");
        let out = TempDir::new().expect("out");
        let context = local_clone(&upstream);
        let root = context.root_path.clone();
        let parsed = RepoReference::parse("owner/demo").expect("reference");
        // An existing directory cannot be written as a file
        let config = Config { output: Some(out.path().to_path_buf()), ..Config::default() };

        let err = flatten_context(context, &parsed, &config, |_| {}).expect_err("should fail");

        assert!(matches!(err, Error::WriteOutput { .. }));
        assert!(!root.exists(), "clone should be removed when the write fails");
    }
}
