use crate::ui;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Tracks the steps of one CLI operation, with a spinner for the slow one
pub struct ProgressTracker {
    operation_name: String,
    start_time: Instant,
    spinner: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressTracker {
    /// Create a new progress tracker with the given operation name
    pub fn new(operation_name: &str) -> Self {
        ui::section_header(operation_name);
        Self {
            operation_name: operation_name.to_string(),
            start_time: Instant::now(),
            spinner: None,
            quiet: false,
        }
    }

    /// Tracker that prints nothing, for machine-readable output
    pub fn quiet(operation_name: &str) -> Self {
        Self {
            operation_name: operation_name.to_string(),
            start_time: Instant::now(),
            spinner: None,
            quiet: true,
        }
    }

    /// Start a step that shows a spinner until it is finished
    pub fn start_spinner(&mut self, message: &str) {
        self.finish_spinner();
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    /// Stop the spinner and report the step as done
    pub fn complete_step(&mut self, message: &str) {
        self.finish_spinner();
        if !self.quiet {
            ui::success_message(message);
        }
    }

    /// Stop the spinner and report the step as failed
    pub fn fail_step(&mut self, message: &str) {
        self.finish_spinner();
        if !self.quiet {
            ui::warning_message(message);
        }
    }

    /// Complete the operation
    pub fn complete(&mut self) {
        self.finish_spinner();
        if self.quiet {
            return;
        }
        ui::success_message(&format!(
            "{} completed in {}",
            self.operation_name,
            format_duration(self.start_time.elapsed())
        ));
    }

    fn finish_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish_spinner();
    }
}

/// Format a duration in a human-readable way
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let seconds = duration.as_secs();
    if seconds == 0 {
        format!("{millis} ms")
    } else if seconds < 60 {
        format!("{seconds} seconds")
    } else {
        format!("{} minutes {} seconds", seconds / 60, seconds % 60)
    }
}
