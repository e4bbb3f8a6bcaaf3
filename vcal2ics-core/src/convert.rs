//! Batch conversion of a whole input document.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::config::ConverterConfig;
use crate::error::{ConvertError, ConvertResult, EventError};
use crate::event::OutputEvent;
use crate::ics::{RawEventBlock, event_blocks, normalize, parse_block};
use crate::observer::{ConvertObserver, ConvertSummary, EventOutcome};
use crate::policy::NormalizePolicy;
use crate::stamp::{Stamper, SystemStamper};

/// Events produced by one run, in document order.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub events: Vec<OutputEvent>,
    pub summary: ConvertSummary,
}

/// Drives extract -> parse -> normalize over every VEVENT in a document.
///
/// A failing event is reported and dropped; it never stops the batch.
pub struct Converter<S: Stamper = SystemStamper> {
    policy: NormalizePolicy,
    stamper: S,
}

impl Converter<SystemStamper> {
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.policy(), SystemStamper::new(&config.uid_domain))
    }
}

impl Default for Converter<SystemStamper> {
    fn default() -> Self {
        Self::new(NormalizePolicy::default(), SystemStamper::default())
    }
}

impl<S: Stamper> Converter<S> {
    pub fn new(policy: NormalizePolicy, stamper: S) -> Self {
        Self { policy, stamper }
    }

    pub fn policy(&self) -> &NormalizePolicy {
        &self.policy
    }

    /// Read and convert a file. Only an unreadable input is an error.
    pub fn convert_file(
        &self,
        path: &Path,
        observer: &mut dyn ConvertObserver,
    ) -> ConvertResult<Conversion> {
        let input = std::fs::read_to_string(path).map_err(|source| ConvertError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.convert_str(&input, observer))
    }

    pub fn convert_str(&self, input: &str, observer: &mut dyn ConvertObserver) -> Conversion {
        let blocks = event_blocks(input);
        let total = blocks.clone().count();
        observer.on_start(total);

        let mut events = Vec::new();
        let mut summary = ConvertSummary {
            discovered: total,
            ..ConvertSummary::default()
        };

        for block in blocks {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                self.convert_block(&block, &mut *observer, &mut summary)
            }))
            .unwrap_or_else(|payload| Err(EventError::Unexpected(panic_message(payload.as_ref()))));

            let outcome = match result {
                Ok(event) => {
                    let outcome = EventOutcome::Converted {
                        summary: event.summary().to_string(),
                    };
                    events.push(event);
                    summary.converted += 1;
                    outcome
                }
                Err(err) => {
                    summary.skipped.push((block.index, err.clone()));
                    EventOutcome::Skipped(err)
                }
            };

            observer.on_event(block.index, total, &outcome);
        }

        observer.on_finish(&summary);

        Conversion { events, summary }
    }

    fn convert_block(
        &self,
        block: &RawEventBlock<'_>,
        observer: &mut dyn ConvertObserver,
        summary: &mut ConvertSummary,
    ) -> Result<OutputEvent, EventError> {
        let parsed = parse_block(block, self.policy.fold_mode)?;
        let event = normalize(&parsed, &self.policy, &self.stamper)?;

        // Warnings only count for events that make it into the output
        for warning in &parsed.warnings {
            summary.decode_warnings += 1;
            observer.on_decode_warning(block.index, warning);
        }

        Ok(event)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "event processing panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DecodeWarning;
    use crate::stamp::FixedStamper;
    use chrono::{TimeZone, Utc};

    #[derive(Default)]
    struct Recorder {
        started: Option<usize>,
        outcomes: Vec<(usize, EventOutcome)>,
        warnings: Vec<(usize, String)>,
        finished: Option<ConvertSummary>,
    }

    impl ConvertObserver for Recorder {
        fn on_start(&mut self, total: usize) {
            self.started = Some(total);
        }

        fn on_decode_warning(&mut self, index: usize, warning: &DecodeWarning) {
            self.warnings.push((index, warning.field.clone()));
        }

        fn on_event(&mut self, index: usize, _total: usize, outcome: &EventOutcome) {
            self.outcomes.push((index, outcome.clone()));
        }

        fn on_finish(&mut self, summary: &ConvertSummary) {
            self.finished = Some(summary.clone());
        }
    }

    /// Panics on the second UID request.
    struct FlakyStamper(std::cell::Cell<u32>);

    impl Stamper for FlakyStamper {
        fn now(&self) -> chrono::DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        }

        fn uid(&self) -> String {
            let n = self.0.get() + 1;
            self.0.set(n);
            if n == 2 {
                panic!("uid source exhausted");
            }
            format!("flaky-{n}")
        }
    }

    fn converter() -> Converter<FixedStamper> {
        Converter::new(
            NormalizePolicy::default(),
            FixedStamper::new(Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap()),
        )
    }

    const INPUT: &str = "BEGIN:VCALENDAR\n\
        VERSION:1.0\n\
        BEGIN:VEVENT\n\
        SUMMARY:No start\n\
        END:VEVENT\n\
        BEGIN:VEVENT\n\
        DTSTART:not-a-date\n\
        END:VEVENT\n\
        BEGIN:VEVENT\n\
        DTSTART:20250101T090000Z\n\
        SUMMARY;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:=ZZ\n\
        END:VEVENT\n\
        END:VCALENDAR\n";

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let mut recorder = Recorder::default();
        let conversion = converter().convert_str(INPUT, &mut recorder);

        assert_eq!(conversion.events.len(), 1);
        assert_eq!(recorder.started, Some(3));
        assert_eq!(
            recorder.outcomes,
            vec![
                (1, EventOutcome::Skipped(EventError::MissingRequiredField("DTSTART"))),
                (
                    2,
                    EventOutcome::Skipped(EventError::MalformedTimestamp("not-a-date".to_string()))
                ),
                (
                    3,
                    EventOutcome::Converted {
                        summary: "(decode error)".to_string()
                    }
                ),
            ]
        );
        assert_eq!(recorder.warnings, vec![(3, "SUMMARY".to_string())]);

        let summary = recorder.finished.unwrap();
        assert_eq!(summary.discovered, 3);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.decode_warnings, 1);
        assert_eq!(summary.skipped.len(), 2);
    }

    #[test]
    fn test_skipped_event_reports_no_decode_warnings() {
        let input = "BEGIN:VEVENT\n\
                     DTSTART:2025119T090000Z\n\
                     SUMMARY;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:=ZZ\n\
                     END:VEVENT\n";
        let mut recorder = Recorder::default();
        let conversion = converter().convert_str(input, &mut recorder);

        assert!(conversion.events.is_empty());
        assert!(recorder.warnings.is_empty());
        assert_eq!(conversion.summary.decode_warnings, 0);
        assert_eq!(
            conversion.summary.skipped,
            vec![(1, EventError::MalformedTimestamp("2025119T090000Z".to_string()))]
        );
    }

    #[test]
    fn test_panic_is_contained_to_one_event() {
        let input = "BEGIN:VEVENT\nDTSTART:20250101T090000Z\nEND:VEVENT\n\
                     BEGIN:VEVENT\nDTSTART:20250102T090000Z\nEND:VEVENT\n\
                     BEGIN:VEVENT\nDTSTART:20250103T090000Z\nEND:VEVENT\n";
        let converter = Converter::new(
            NormalizePolicy::default(),
            FlakyStamper(std::cell::Cell::new(0)),
        );
        let mut recorder = Recorder::default();
        let conversion = converter.convert_str(input, &mut recorder);

        assert_eq!(conversion.events.len(), 2);
        assert_eq!(
            recorder.outcomes[1],
            (
                2,
                EventOutcome::Skipped(EventError::Unexpected("uid source exhausted".to_string()))
            )
        );
        assert!(recorder.outcomes[2].1.is_converted());
    }

    #[test]
    fn test_diagnostic_only_for_skipped() {
        let skipped = EventOutcome::Skipped(EventError::MissingRequiredField("DTSTART"));
        assert_eq!(skipped.diagnostic().as_deref(), Some("missing required field DTSTART"));

        let converted = EventOutcome::Converted {
            summary: "Lunch".to_string(),
        };
        assert_eq!(converted.diagnostic(), None);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let result = converter().convert_file(
            Path::new("/nonexistent/vcal2ics/input.vcs"),
            &mut Recorder::default(),
        );
        assert!(matches!(result, Err(ConvertError::ReadInput { .. })));
    }
}
