//! Layered configuration loading
//!
//! Precedence, lowest first: built-in defaults, config file, `REPO_TO_TEXT_*`
//! environment variables. CLI flags are applied on top by [`super::merge`].

use crate::error::{Error, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration keys.
pub const ENV_PREFIX: &str = "REPO_TO_TEXT_";

/// Config files discovered in the working directory, first found wins.
pub const CONFIG_CANDIDATES: &[&str] =
    &["repo-to-text.toml", ".repo-to-text.toml", "repo-to-text.yml", ".repo-to-text.yml"];

const DEFAULT_THRESHOLD_MB: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum embeddable file size in megabytes.
    pub threshold_mb: f64,
    /// Disable size and binary filtering.
    pub include_all: bool,
    /// Exclusion glob patterns.
    pub exclude: Vec<String>,
    /// File with one exclusion pattern per line.
    pub exclude_file: Option<PathBuf>,
    /// Output path; `-` for stdout.
    pub output: Option<PathBuf>,
    /// Branch, tag, or commit to check out.
    pub git_ref: Option<String>,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold_mb: DEFAULT_THRESHOLD_MB,
            include_all: false,
            exclude: Vec::new(),
            exclude_file: None,
            output: None,
            git_ref: None,
            debug: false,
        }
    }
}

impl Config {
    /// Size threshold in bytes (`threshold_mb * 1024 * 1024`, truncated).
    pub fn threshold_bytes(&self) -> u64 {
        (self.threshold_mb * 1024.0 * 1024.0) as u64
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold_mb.is_finite() || self.threshold_mb < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "threshold must be a non-negative number of MB, got {}",
                self.threshold_mb
            )));
        }
        Ok(())
    }
}

/// Load configuration from an explicit file or one discovered in `search_dir`.
///
/// Problems with an explicit file are fatal; a broken auto-discovered file
/// is reported with `warn!` and skipped.
pub fn load_config(config_path: Option<&Path>, search_dir: &Path) -> Result<Config> {
    let base = Figment::from(Serialized::defaults(Config::default()));

    let config = match config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            extract(with_env(with_file(base, path)?))?
        }
        None => match discover_config(search_dir) {
            Some(path) => {
                let layered = with_file(base.clone(), &path)
                    .and_then(|figment| extract(with_env(figment)));
                match layered {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring auto-discovered config {}: {}",
                            path.display(),
                            e
                        );
                        extract(with_env(base))?
                    }
                }
            }
            None => extract(with_env(base))?,
        },
    };

    config.validate()?;
    Ok(config)
}

/// Extract a `Config`, anchoring a relative `exclude_file` that came from a
/// config file at that file's directory.
fn extract(figment: Figment) -> Result<Config> {
    let mut config = figment.extract::<Config>()?;

    let config_dir = figment
        .find_metadata("exclude_file")
        .and_then(|metadata| metadata.source.as_ref())
        .and_then(|source| source.file_path())
        .and_then(Path::parent);
    if let (Some(dir), Some(exclude_file)) = (config_dir, config.exclude_file.as_mut()) {
        if exclude_file.is_relative() {
            *exclude_file = dir.join(&*exclude_file);
        }
    }

    Ok(config)
}

fn with_file(figment: Figment, path: &Path) -> Result<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        other => Err(Error::InvalidConfig(format!(
            "unsupported config extension '.{}' for file {}",
            other,
            path.display()
        ))),
    }
}

fn with_env(figment: Figment) -> Figment {
    figment.merge(Env::prefixed(ENV_PREFIX))
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES.iter().map(|name| search_dir.join(name)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_when_nothing_is_configured() {
        Jail::expect_with(|jail| {
            let cfg = load_config(None, jail.directory()).expect("config");
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.threshold_bytes(), 104_857);
            Ok(())
        });
    }

    #[test]
    fn discovered_toml_file_is_applied() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "repo-to-text.toml",
                "threshold_mb = 2.0\nexclude = [\"*.lock\", \"dist/*\"]\n",
            )?;
            let cfg = load_config(None, jail.directory()).expect("config");
            assert_eq!(cfg.threshold_bytes(), 2 * 1024 * 1024);
            assert_eq!(cfg.exclude, vec!["*.lock".to_string(), "dist/*".to_string()]);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".repo-to-text.yml", "include_all: false\nthreshold_mb: 1.0\n")?;
            jail.set_env("REPO_TO_TEXT_INCLUDE_ALL", "true");

            let cfg = load_config(None, jail.directory()).expect("config");
            assert!(cfg.include_all);
            assert_eq!(cfg.threshold_mb, 1.0);
            Ok(())
        });
    }

    #[test]
    fn broken_discovered_file_is_ignored() {
        Jail::expect_with(|jail| {
            jail.create_file("repo-to-text.toml", "threshold_mb = \"lots\"\n")?;
            let cfg = load_config(None, jail.directory()).expect("soft failure");
            assert_eq!(cfg.threshold_mb, 0.1);
            Ok(())
        });
    }

    #[test]
    fn broken_explicit_file_is_fatal() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "threshold_mb = \"lots\"\n")?;
            let path = jail.directory().join("custom.toml");
            assert!(load_config(Some(&path), jail.directory()).is_err());
            Ok(())
        });
    }

    #[test]
    fn missing_or_unsupported_explicit_file_is_fatal() {
        Jail::expect_with(|jail| {
            let missing = jail.directory().join("missing.toml");
            assert!(matches!(
                load_config(Some(&missing), jail.directory()),
                Err(Error::InvalidConfig(_))
            ));

            jail.create_file("settings.ini", "threshold_mb = 1\n")?;
            let ini = jail.directory().join("settings.ini");
            assert!(matches!(load_config(Some(&ini), jail.directory()), Err(Error::InvalidConfig(_))));
            Ok(())
        });
    }

    #[test]
    fn exclude_file_is_relative_to_config_file() {
        Jail::expect_with(|jail| {
            std::fs::create_dir_all(jail.directory().join("conf")).expect("mkdir conf");
            jail.create_file("conf/custom.toml", "exclude_file = \"ignore.txt\"\n")?;
            let path = jail.directory().join("conf/custom.toml");

            let cfg = load_config(Some(&path), jail.directory()).expect("config");
            assert_eq!(cfg.exclude_file, Some(jail.directory().join("conf").join("ignore.txt")));
            Ok(())
        });
    }

    #[test]
    fn exclude_file_from_env_is_left_as_given() {
        Jail::expect_with(|jail| {
            jail.create_file("repo-to-text.toml", "exclude_file = \"ignore.txt\"\n")?;
            jail.set_env("REPO_TO_TEXT_EXCLUDE_FILE", "patterns/env.txt");

            let cfg = load_config(None, jail.directory()).expect("config");
            assert_eq!(cfg.exclude_file, Some(PathBuf::from("patterns/env.txt")));
            Ok(())
        });
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let cfg = Config { threshold_mb: -1.0, ..Config::default() };
        assert!(cfg.validate().is_err());
        let cfg = Config { threshold_mb: f64::NAN, ..Config::default() };
        assert!(cfg.validate().is_err());
    }
}
