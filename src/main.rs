//! repo-to-text: flatten a remote repository into one text file
//!
//! Clones the repository into a temporary directory, filters its files with
//! exclusion patterns plus size and binary checks, and writes the remaining
//! contents behind per-file headers.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
