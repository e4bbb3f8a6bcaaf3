//! Turns parsed fields into a well-formed VEVENT.

use chrono::{Duration, NaiveDateTime};

use super::fold::{fold_line, unfold};
use crate::error::EventError;
use crate::event::{OutputEvent, ParsedEvent};
use crate::policy::{LEADING_FIELDS, NormalizePolicy};
use crate::stamp::{Stamper, UTC_FORMAT};

/// Length of a synthesized event when the source has no DTEND.
const DEFAULT_DURATION_HOURS: i64 = 1;

/// Build the output event.
///
/// Order: DTSTART, SUMMARY, DESCRIPTION, LOCATION, remaining fields as
/// discovered, then synthesized DTEND, DTSTAMP, UID and TRANSP for whichever
/// of those the source lacks. Lines matching a strip prefix are dropped.
pub fn normalize(
    parsed: &ParsedEvent,
    policy: &NormalizePolicy,
    stamper: &dyn Stamper,
) -> Result<OutputEvent, EventError> {
    let fields = &parsed.fields;
    let fold = |line: String| fold_line(&line, policy.fold_mode);

    let dtstart = fields
        .get("DTSTART")
        .ok_or(EventError::MissingRequiredField("DTSTART"))?;

    let mut lines = vec!["BEGIN:VEVENT".to_string(), dtstart.to_string()];

    let summary_line = match fields.get("SUMMARY") {
        Some(line) => line.to_string(),
        None => fold(format!("SUMMARY:{}", policy.default_summary)),
    };
    let summary = property_value(&summary_line);
    lines.push(summary_line);

    for name in ["DESCRIPTION", "LOCATION"] {
        if let Some(line) = fields.get(name) {
            lines.push(line.to_string());
        }
    }

    for (name, line) in fields.iter() {
        if LEADING_FIELDS.contains(&name) {
            continue;
        }
        if policy.is_stripped(line) {
            tracing::debug!(field = name, "stripping legacy field");
            continue;
        }
        lines.push(line.to_string());
    }

    if !fields.contains("DTEND") {
        let dtend = one_hour_after(&parsed.dtstart_raw)?;
        lines.push(fold(format!("DTEND:{dtend}")));
    }

    if !fields.contains("DTSTAMP") {
        let now = stamper.now().format(UTC_FORMAT);
        lines.push(format!("DTSTAMP:{now}"));
    }

    if !fields.contains("UID") {
        lines.push(fold(format!("UID:{}", stamper.uid())));
    }

    if !fields.contains("TRANSP") {
        lines.push("TRANSP:OPAQUE".to_string());
    }

    lines.push("END:VEVENT".to_string());

    Ok(OutputEvent::new(lines, summary))
}

/// Parse a `YYYYMMDDTHHMMSSZ` timestamp and add the default duration.
fn one_hour_after(raw: &str) -> Result<String, EventError> {
    // chrono accepts short fields, so the fixed width is checked first
    let start = Some(raw)
        .filter(|s| is_utc_basic_format(s))
        .and_then(|s| s.strip_suffix('Z'))
        .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%S").ok())
        .ok_or_else(|| EventError::MalformedTimestamp(raw.to_string()))?;

    let end = start
        .checked_add_signed(Duration::hours(DEFAULT_DURATION_HOURS))
        .ok_or_else(|| EventError::Unexpected(format!("DTEND out of range for {raw}")))?;

    Ok(end.and_utc().format(UTC_FORMAT).to_string())
}

fn is_utc_basic_format(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 16
        && bytes[8] == b'T'
        && bytes[15] == b'Z'
        && bytes[..8].iter().chain(&bytes[9..15]).all(u8::is_ascii_digit)
}

fn property_value(line: &str) -> String {
    let line = unfold(line);
    match line.split_once(':') {
        Some((_, value)) => value.to_string(),
        None => String::new(),
    }
}
