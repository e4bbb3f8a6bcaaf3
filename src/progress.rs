//! Terminal progress for a conversion run.

use indicatif::ProgressBar;
use vcal2ics_core::event::DecodeWarning;
use vcal2ics_core::{ConvertObserver, ConvertSummary, EventOutcome};

use crate::render::{Render, render_event};
use crate::utils::create_progress_bar;

/// Draws a progress bar over the discovered events and prints a line for
/// every event that needs attention.
#[derive(Default)]
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{}", line),
        }
    }
}

impl ConvertObserver for ProgressReporter {
    fn on_start(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        match create_progress_bar(total) {
            Ok(bar) => self.bar = Some(bar),
            Err(e) => tracing::debug!(error = %e, "progress bar unavailable"),
        }
    }

    fn on_decode_warning(&mut self, index: usize, warning: &DecodeWarning) {
        self.println(format!("   #{} {}", index, warning.render()));
    }

    fn on_event(&mut self, index: usize, total: usize, outcome: &EventOutcome) {
        if !outcome.is_converted() {
            self.println(render_event(index, total, outcome));
        }

        if let Some(bar) = &self.bar {
            if let EventOutcome::Converted { summary } = outcome {
                bar.set_message(summary.clone());
            }
            bar.inc(1);
        }
    }

    fn on_finish(&mut self, _summary: &ConvertSummary) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
