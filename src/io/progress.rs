//! Progress display for collapse attempts

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Attempts: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks retries of the collapse loop for a single synthesis run
pub struct AttemptProgress {
    bar: ProgressBar,
}

impl AttemptProgress {
    /// Create a progress bar sized to the attempt budget
    pub fn new(max_attempts: usize) -> Self {
        let bar = ProgressBar::new(max_attempts as u64);
        bar.set_style(ATTEMPT_STYLE.clone());
        Self { bar }
    }

    /// Record one finished attempt
    pub fn record_attempt(&self) {
        self.bar.inc(1);
    }

    /// Close the bar after a successful collapse
    pub fn finish_success(&self, attempt: usize) {
        self.bar
            .finish_with_message(format!("collapsed on attempt {attempt}"));
    }

    /// Close the bar after exhausting the attempt budget
    pub fn finish_failure(&self) {
        self.bar.finish_with_message("no attempt converged");
    }
}
