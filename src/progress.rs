//! Progress display for toolchain downloads
//!
//! Provides visual feedback on stderr while an archive is transferred, using indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for a download
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet mode)
    enabled: bool,
    /// Current progress bar
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Start a byte progress bar; a zero total falls back to a spinner
    pub fn start(&mut self, total_bytes: u64, message: &str) {
        if !self.enabled {
            return;
        }

        let bar = if total_bytes == 0 {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                    .template("{spinner:.cyan} {msg} {bytes}")
                    .expect("Invalid template"),
            );
            spinner
        } else {
            let bar = ProgressBar::new(total_bytes);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                    )
                    .expect("Invalid template")
                    .progress_chars("█▓▒░"),
            );
            bar
        };
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Advance by the number of bytes just written
    pub fn inc(&self, bytes: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(bytes);
        }
    }

    /// Finish and clear the current progress bar
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}
