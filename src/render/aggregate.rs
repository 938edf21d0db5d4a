//! Concatenation of accepted files into one delimited text buffer.

use crate::utils::format_size;

/// Width of the `=` rule framing each file header.
pub const DELIMITER_WIDTH: usize = 80;

/// Totals and content produced by one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingOutcome {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub content: String,
}

impl ProcessingOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one file block and count it as processed.
    pub fn append(&mut self, relative_path: &str, size_bytes: u64, content: &str) {
        let rule = "=".repeat(DELIMITER_WIDTH);
        self.content.push('\n');
        self.content.push_str(&rule);
        self.content.push('\n');
        self.content.push_str(&format!("File: {}\n", relative_path));
        self.content.push_str(&format!("Size: {}\n", format_size(size_bytes)));
        self.content.push_str(&rule);
        self.content.push_str("\n\n");
        self.content.push_str(content);
        self.content.push('\n');
        self.files_processed += 1;
    }

    pub fn skip(&mut self) {
        self.files_skipped += 1;
    }

    /// Close out the walk, warning when nothing was embedded.
    pub fn finish(self) -> Self {
        if self.no_files_processed() {
            tracing::warn!("No files were processed ({} skipped)", self.files_skipped);
        } else {
            tracing::info!(
                "Processed {} files, skipped {}",
                self.files_processed,
                self.files_skipped
            );
        }
        self
    }

    pub fn no_files_processed(&self) -> bool {
        self.files_processed == 0
    }
}
