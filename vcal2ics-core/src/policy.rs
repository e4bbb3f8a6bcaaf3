//! Field classification tables used by the parser and normalizer.

use std::borrow::Cow;

use crate::ics::FoldMode;

/// Fields that legacy exports encode as quoted-printable text.
pub static ENCODED_TEXT_FIELDS: &[&str] = &["SUMMARY", "DESCRIPTION", "LOCATION"];

/// Fields emitted first, in this order, ahead of everything else.
pub static LEADING_FIELDS: &[&str] = &["DTSTART", "SUMMARY", "DESCRIPTION", "LOCATION"];

/// Line prefixes of legacy and vendor fields that have no reliable iCalendar
/// equivalent. Matched literally against the serialized line, so
/// `TZ:+09:00` only removes that exact offset.
pub static STRIPPED_PREFIXES: &[&str] = &[
    "TZ:+09:00",
    "CATEGORIES:",
    "AALARM:",
    "DALARM:",
    "RRULE:",
    "STATUS:",
    "DUE:",
    "X-DCM-",
];

pub const DEFAULT_SUMMARY: &str = "Untitled Event";

/// Normalization settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizePolicy {
    pub strip_prefixes: Vec<Cow<'static, str>>,
    pub default_summary: String,
    pub fold_mode: FoldMode,
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        Self {
            strip_prefixes: STRIPPED_PREFIXES.iter().copied().map(Cow::Borrowed).collect(),
            default_summary: DEFAULT_SUMMARY.to_string(),
            fold_mode: FoldMode::default(),
        }
    }
}

impl NormalizePolicy {
    /// Add prefixes on top of the built-in list.
    pub fn with_extra_prefixes<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in extra {
            let prefix = prefix.into();
            if !prefix.is_empty() && !self.strip_prefixes.iter().any(|p| *p == prefix) {
                self.strip_prefixes.push(Cow::Owned(prefix));
            }
        }
        self
    }

    pub fn is_stripped(&self, line: &str) -> bool {
        self.strip_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_ref()))
    }
}

/// Whether a property name (with parameters) marks a quoted-printable text field.
///
/// `SUMMARY;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE` qualifies, plain
/// `SUMMARY` does not.
pub fn is_encoded_text_field(name_with_params: &str) -> bool {
    let mut parts = name_with_params.split(';');
    let base = parts.next().unwrap_or_default();
    ENCODED_TEXT_FIELDS.contains(&base)
        && parts.any(|param| param.eq_ignore_ascii_case("ENCODING=QUOTED-PRINTABLE"))
}
