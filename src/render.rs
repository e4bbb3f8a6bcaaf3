//! TUI rendering traits for vcal2ics types.
//!
//! Extension traits that add colored terminal rendering to
//! vcal2ics-core types using owo_colors.

use owo_colors::OwoColorize;
use vcal2ics_core::event::DecodeWarning;
use vcal2ics_core::{ConvertSummary, EventOutcome};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Outcome of one event, prefixed with its `index/total` position
pub fn render_event(index: usize, total: usize, outcome: &EventOutcome) -> String {
    let position = format!("{}/{}", index, total);
    format!("{} {}", position.dimmed(), outcome.render())
}

impl Render for EventOutcome {
    fn render(&self) -> String {
        match self {
            EventOutcome::Converted { summary } => format!("{} {}", "✓".green(), summary),
            EventOutcome::Skipped(err) => {
                format!("{} {}", "✗ skipped:".red(), err.to_string().red())
            }
        }
    }
}

impl Render for DecodeWarning {
    fn render(&self) -> String {
        format!("{} {}", "⚠ decode error".yellow(), self.to_string().yellow())
    }
}

impl Render for ConvertSummary {
    fn render(&self) -> String {
        let counts = format!(
            "Converted {} of {} {}",
            self.converted,
            self.discovered,
            pluralize("event", self.discovered)
        );

        if self.skipped.is_empty() {
            counts.green().to_string()
        } else {
            let skipped = format!("({} skipped)", self.skipped.len());
            format!("{} {}", counts.yellow(), skipped.dimmed())
        }
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
