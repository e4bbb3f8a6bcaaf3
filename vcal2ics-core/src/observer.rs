//! Progress callbacks for a conversion run.
//!
//! The converter never prints. Callers pass a [`ConvertObserver`] to receive
//! per-event outcomes and render them however they like; [`TracingObserver`]
//! forwards everything to `tracing`.

use crate::error::EventError;
use crate::event::DecodeWarning;

/// What happened to one discovered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Converted { summary: String },
    Skipped(EventError),
}

impl EventOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, EventOutcome::Converted { .. })
    }

    /// Human-readable reason, for skipped events only.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            EventOutcome::Converted { .. } => None,
            EventOutcome::Skipped(err) => Some(err.to_string()),
        }
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub discovered: usize,
    pub converted: usize,
    /// `(index, reason)` for every dropped event
    pub skipped: Vec<(usize, EventError)>,
    /// Placeholder substitutions in converted events
    pub decode_warnings: usize,
}

/// Receives progress from [`crate::Converter`]. All methods default to no-ops.
pub trait ConvertObserver {
    fn on_start(&mut self, _total: usize) {}

    fn on_decode_warning(&mut self, _index: usize, _warning: &DecodeWarning) {}

    fn on_event(&mut self, _index: usize, _total: usize, _outcome: &EventOutcome) {}

    fn on_finish(&mut self, _summary: &ConvertSummary) {}
}

/// Logs progress through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ConvertObserver for TracingObserver {
    fn on_start(&mut self, total: usize) {
        tracing::info!(total, "found events");
    }

    fn on_decode_warning(&mut self, index: usize, warning: &DecodeWarning) {
        tracing::warn!(event = index, field = %warning.field, error = %warning.error, "decode error");
    }

    fn on_event(&mut self, index: usize, total: usize, outcome: &EventOutcome) {
        match outcome {
            EventOutcome::Converted { summary } => {
                tracing::debug!(event = index, total, summary = %summary, "converted");
            }
            EventOutcome::Skipped(err) => {
                tracing::warn!(event = index, total, error = %err, "skipping event");
            }
        }
    }

    fn on_finish(&mut self, summary: &ConvertSummary) {
        tracing::info!(
            converted = summary.converted,
            discovered = summary.discovered,
            "conversion finished"
        );
    }
}
