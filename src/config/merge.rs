//! CLI flags layered over the loaded configuration.

use crate::config::Config;
use std::path::PathBuf;

/// Values given on the command line. `None`/`false`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threshold_mb: Option<f64>,
    pub include_all: bool,
    pub exclude: Vec<String>,
    pub exclude_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub git_ref: Option<String>,
    pub debug: bool,
}

/// Apply CLI values on top of `config`.
///
/// Scalars replace, flags can only switch on, and exclusion patterns from
/// the command line are appended after configured ones.
pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(threshold) = cli.threshold_mb {
        config.threshold_mb = threshold;
    }
    config.include_all |= cli.include_all;
    config.debug |= cli.debug;
    config.exclude.extend(cli.exclude);
    if cli.exclude_file.is_some() {
        config.exclude_file = cli.exclude_file;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }
    if cli.git_ref.is_some() {
        config.git_ref = cli.git_ref;
    }
    config
}
