//! Loading indicator shown while a question is in flight.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Indicatif spinner on stderr. Hidden automatically when stderr is not a TTY.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn start(msg: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} {msg} ({elapsed})")
            .map(|s| s.tick_chars("-\\|/ "))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        Self { pb }
    }

    /// Replace the message without restarting the timer.
    pub fn message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }

    /// Remove the spinner line before the result is printed.
    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}
