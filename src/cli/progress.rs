//! Terminal spinner shown while fetching and walking.

use indicatif::{ProgressBar, ProgressStyle};
use repo_to_text::Stage;
use std::time::Duration;

/// Spinner that is only drawn on an interactive stderr.
pub struct StageSpinner {
    bar: Option<ProgressBar>,
}

impl StageSpinner {
    pub fn new(enabled: bool) -> Self {
        let bar = enabled.then(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
                bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏✓"));
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        Self { bar }
    }

    pub fn update(&self, stage: &Stage) {
        if let Some(bar) = &self.bar {
            bar.set_message(stage_message(stage));
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for StageSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}

fn stage_message(stage: &Stage) -> String {
    match stage {
        Stage::Fetching(url) => format!("Cloning {url}"),
        Stage::Processing => "Processing files".to_string(),
        Stage::Writing(target) => format!("Writing {target}"),
    }
}
