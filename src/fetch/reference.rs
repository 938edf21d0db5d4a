//! Repository reference parsing.
//!
//! Accepted forms:
//! - `https://github.com/owner/repo`, with optional `.git`, trailing slash or `/tree/<ref>`
//! - `github.com/owner/repo` (scheme added)
//! - `owner/repo` (GitHub shorthand)
//! - `git@host:owner/repo.git` and `ssh://git@host/owner/repo` (rewritten to HTTPS)

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_HOST: &str = "github.com";

static HTTP_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?)://([^/\s]+)/([^/\s]+)/([^/\s]+?)(?:\.git)?(?:/tree/(\S+?))?/?$")
        .expect("valid http url regex")
});

static SCP_SSH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([^:/\s]+):([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
        .expect("valid scp regex")
});

static SSH_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ssh://(?:[^@/\s]+@)?([^/:\s]+)(?::\d+)?/([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
        .expect("valid ssh url regex")
});

static BARE_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+)/([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
        .expect("valid host regex")
});

static SHORTHAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?$").expect("valid shorthand regex")
});

/// A parsed repository reference that can be cloned anonymously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReference {
    pub scheme: String,
    pub host: String,
    pub owner: String,
    pub name: String,
    /// Branch taken from a `/tree/<ref>` URL.
    pub git_ref: Option<String>,
}

impl RepoReference {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "a repository URL or owner/repo is required"));
        }

        let parsed = if let Some(caps) = HTTP_URL.captures(trimmed) {
            Self::from_parts(&caps[1], &caps[2], &caps[3], &caps[4], caps.get(5).map(|m| m.as_str()))
        } else if let Some(caps) = SCP_SSH.captures(trimmed) {
            Self::from_parts("https", &caps[1], &caps[2], &caps[3], None)
        } else if let Some(caps) = SSH_URL.captures(trimmed) {
            Self::from_parts("https", &caps[1], &caps[2], &caps[3], None)
        } else if let Some(caps) = BARE_HOST.captures(trimmed) {
            Self::from_parts("https", &caps[1], &caps[2], &caps[3], None)
        } else if let Some(caps) = SHORTHAND.captures(trimmed) {
            Self::from_parts("https", DEFAULT_HOST, &caps[1], &caps[2], None)
        } else {
            return Err(invalid(
                input,
                "expected https://host/owner/repo, owner/repo, or git@host:owner/repo",
            ));
        };

        for part in [&parsed.owner, &parsed.name] {
            if part == "." || part == ".." {
                return Err(invalid(input, "owner and repository names must be real path segments"));
            }
        }
        Ok(parsed)
    }

    fn from_parts(scheme: &str, host: &str, owner: &str, name: &str, git_ref: Option<&str>) -> Self {
        Self {
            scheme: scheme.to_string(),
            host: host.to_ascii_lowercase(),
            owner: owner.to_string(),
            name: name.to_string(),
            git_ref: git_ref.map(str::to_string),
        }
    }

    /// Canonical anonymous clone URL, e.g. `https://github.com/owner/repo.git`.
    pub fn clone_url(&self) -> String {
        format!("{}://{}/{}/{}.git", self.scheme, self.host, self.owner, self.name)
    }

    /// Default output file name, `<repo>.txt`.
    pub fn default_output_name(&self) -> String {
        format!("{}.txt", self.name)
    }
}

fn invalid(reference: &str, reason: &str) -> Error {
    Error::InvalidReference { reference: reference.to_string(), reason: reason.to_string() }
}
