//! Command-line interface for repo-to-text

use anyhow::Result;
use clap::{ArgAction, Parser};
use console::{style, Term};
use repo_to_text::config::{load_config, merge_cli_with_config, CliOverrides};
use repo_to_text::utils::format_size;
use repo_to_text::{flatten_repository, FlattenSummary};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

mod progress;

use progress::StageSpinner;

/// Flatten a remote repository into a single text file
#[derive(Parser, Debug)]
#[command(name = "repo-to-text")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Repository URL, owner/repo shorthand, or git@host:owner/repo
    #[arg(value_name = "REPOSITORY")]
    repository: Option<String>,

    /// Output file (use '-' for stdout) [default: <repo>.txt]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Skip files larger than this many MB [default: 0.1]
    #[arg(short, long, value_name = "MB")]
    threshold: Option<f64>,

    /// Include files regardless of size or binary content
    #[arg(long)]
    include_all: bool,

    /// Exclude files matching this glob (repeatable, '!' negates)
    #[arg(short, long, value_name = "PATTERN", action = ArgAction::Append)]
    exclude: Vec<String>,

    /// Read exclude patterns from a file, one per line
    #[arg(short = 'x', long, value_name = "FILE")]
    exclude_file: Option<PathBuf>,

    /// Branch, tag, or commit to check out
    #[arg(long = "ref", value_name = "REF")]
    git_ref: Option<String>,

    /// Path to a config file (repo-to-text.toml or .repo-to-text.yml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            threshold_mb: self.threshold,
            include_all: self.include_all,
            exclude: self.exclude.clone(),
            exclude_file: self.exclude_file.clone(),
            output: self.output.clone(),
            git_ref: self.git_ref.clone(),
            debug: self.debug,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // `debug = true` from a config file or the environment is applied after loading.
    let (filter, filter_handle) = reload::Layer::new(log_filter(cli.debug));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();

    let cwd = std::env::current_dir()?;
    let config = merge_cli_with_config(load_config(cli.config.as_deref(), &cwd)?, cli.overrides());
    if config.debug && !cli.debug {
        let _ = filter_handle.reload(log_filter(true));
    }
    tracing::debug!("Effective configuration: {:?}", config);

    let reference = cli.repository.as_deref().unwrap_or_default();
    let spinner = StageSpinner::new(Term::stderr().is_term() && !config.debug);
    let result = flatten_repository(reference, &config, |stage| spinner.update(stage));
    spinner.finish();

    let summary = result?;
    print_summary(&summary);
    Ok(())
}

/// RUST_LOG in the environment always takes precedence; debug falls back to DEBUG.
fn log_filter(debug: bool) -> EnvFilter {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    EnvFilter::from_default_env().add_directive(level.into())
}

fn print_summary(summary: &FlattenSummary) {
    let headline = if summary.files_processed == 0 {
        style("No files were processed").yellow().bold()
    } else {
        style("Done").green().bold()
    };
    eprintln!(
        "{} {} files processed, {} skipped, {} written to {}",
        headline,
        summary.files_processed,
        summary.files_skipped,
        format_size(summary.bytes_written as u64),
        summary.target
    );
}
