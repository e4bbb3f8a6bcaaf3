//! Event records produced while converting.
//!
//! A raw block becomes a [`ParsedEvent`] (fields keyed by property name),
//! which the normalizer turns into an immutable [`OutputEvent`].

use std::fmt;

use crate::error::DecodeError;

/// Insertion-ordered property map with last-write-wins semantics.
///
/// Re-inserting a name replaces the stored line but keeps the position
/// where the name was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, line: impl Into<String>) {
        let name = name.into();
        let line = line.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = line,
            None => self.entries.push((name, line)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, line)| line.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate `(name, line)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, l)| (n.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A field whose quoted-printable value could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeWarning {
    pub field: String,
    pub error: DecodeError,
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// Fields of one VEVENT block after reassembly and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    /// Serialized, folded lines keyed by property name
    pub fields: FieldMap,
    /// Value of the DTSTART line, parameters stripped
    pub dtstart_raw: String,
    pub warnings: Vec<DecodeWarning>,
}

/// A normalized VEVENT, from `BEGIN:VEVENT` to `END:VEVENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEvent {
    lines: Vec<String>,
    summary: String,
}

impl OutputEvent {
    pub(crate) fn new(lines: Vec<String>, summary: String) -> Self {
        Self { lines, summary }
    }

    /// Serialized lines; long lines contain embedded CRLF + space folds.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Summary text as emitted (still ICS-escaped).
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Look up the first emitted line for a property, unfolded.
    pub fn property(&self, name: &str) -> Option<String> {
        self.lines
            .iter()
            .find(|line| property_name(line) == name)
            .map(|line| crate::ics::unfold(line))
    }
}

impl fmt::Display for OutputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            write!(f, "{}\r\n", line)?;
        }
        Ok(())
    }
}

/// Property name of a content line: everything before the first `;` or `:`.
pub fn property_name(line: &str) -> &str {
    let end = line.find([';', ':']).unwrap_or(line.len());
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_map_last_write_wins_keeps_position() {
        let mut fields = FieldMap::new();
        fields.insert("DTSTART", "DTSTART:20250101T090000Z");
        fields.insert("CLASS", "CLASS:PUBLIC");
        fields.insert("DTSTART", "DTSTART:20250202T090000Z");

        let names: Vec<&str> = fields.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["DTSTART", "CLASS"]);
        assert_eq!(fields.get("DTSTART"), Some("DTSTART:20250202T090000Z"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_property_name() {
        assert_eq!(property_name("SUMMARY:Lunch"), "SUMMARY");
        assert_eq!(property_name("DTSTART;TZID=Asia/Tokyo:20250101T090000"), "DTSTART");
        assert_eq!(property_name("X-DCM-GPS"), "X-DCM-GPS");
    }

    #[test]
    fn test_output_event_display_uses_crlf() {
        let event = OutputEvent::new(
            vec!["BEGIN:VEVENT".to_string(), "END:VEVENT".to_string()],
            "Untitled Event".to_string(),
        );
        assert_eq!(event.to_string(), "BEGIN:VEVENT\r\nEND:VEVENT\r\n");
    }
}
