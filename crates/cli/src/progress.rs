//! Progress indicators

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use typegate_core::ProgressSink;

/// A single pipeline step backed by an indicatif spinner.
///
/// Create with [`Step::new`], then call [`Step::finish`] or [`Step::skip`]
/// when the work completes.  On a non-TTY the spinner draws nothing, but the
/// finish/skip lines are still emitted via `eprintln!`.
pub struct Step {
    pb: ProgressBar,
    label: String,
}

impl Step {
    /// Start a new spinner step with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("{}...", label));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { pb, label }
    }

    /// Finish successfully: prints `"  label... done (summary)"`.
    pub fn finish(&self, summary: &str) {
        self.pb.finish_and_clear();
        eprintln!("  {}... {} ({})", self.label, "done".green(), summary);
    }

    /// Finish as skipped / not-applicable: prints `"  {msg}"` dimmed.
    pub fn skip(&self, msg: &str) {
        self.pb.finish_and_clear();
        eprintln!("  {}", msg.dimmed());
    }

    /// Abandon after a failure: prints `"  label... failed"`.
    pub fn fail(&self) {
        self.pb.finish_and_clear();
        eprintln!("  {}... {}", self.label, "failed".red());
    }
}

/// Drives one [`Step`] per stage reported by the runner.
#[derive(Default)]
pub struct StepProgress {
    current: RefCell<Option<Step>>,
}

impl StepProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for StepProgress {
    fn stage_started(&self, label: &str) {
        if let Some(previous) = self.current.replace(Some(Step::new(label))) {
            previous.fail();
        }
    }

    fn stage_finished(&self, summary: &str) {
        if let Some(step) = self.current.take() {
            step.finish(summary);
        }
    }

    fn stage_skipped(&self, message: &str) {
        match self.current.take() {
            Some(step) => step.skip(message),
            None => eprintln!("  {}", message.dimmed()),
        }
    }
}

impl Drop for StepProgress {
    // A stage still running here was interrupted by an error.
    fn drop(&mut self) {
        if let Some(step) = self.current.get_mut().take() {
            step.fail();
        }
    }
}
