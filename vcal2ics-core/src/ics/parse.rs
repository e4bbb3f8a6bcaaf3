//! Field parsing and reassembly for raw VEVENT blocks.

use tracing::debug;

use super::extract::RawEventBlock;
use super::fold::{FoldMode, fold_line};
use super::quoted_printable::{DECODE_ERROR_PLACEHOLDER, decode_field};
use crate::error::EventError;
use crate::event::{DecodeWarning, FieldMap, ParsedEvent, property_name};
use crate::policy::is_encoded_text_field;

/// Parse one block into its fields.
///
/// Quoted-printable text fields are joined across soft line breaks,
/// decoded and stored under their bare name. Everything else is stored as
/// its original (unfolded, then refolded) line. Fails when the block has no
/// DTSTART.
pub fn parse_block(block: &RawEventBlock<'_>, fold_mode: FoldMode) -> Result<ParsedEvent, EventError> {
    let lines: Vec<&str> = block.text.lines().collect();

    let mut fields = FieldMap::new();
    let mut dtstart_raw = None;
    let mut warnings = Vec::new();
    let mut nested_depth = 0usize;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with([' ', '\t']) {
            debug!(event = block.index, line, "dropping orphan continuation line");
            continue;
        }

        let Some((name, value)) = line.split_once(':') else {
            debug!(event = block.index, line, "dropping line without a property value");
            continue;
        };

        if name.is_empty() {
            debug!(event = block.index, line, "dropping line without a property name");
            continue;
        }

        // Embedded components (VALARM and friends) are not carried over
        match (name, value.trim()) {
            ("BEGIN", "VEVENT") | ("END", "VEVENT") => {
                debug!(event = block.index, line, "ignoring stray VEVENT marker");
                continue;
            }
            ("BEGIN", component) => {
                debug!(event = block.index, component, "dropping nested component");
                nested_depth += 1;
                continue;
            }
            ("END", component) => {
                if nested_depth > 0 {
                    nested_depth -= 1;
                } else {
                    debug!(event = block.index, component, "ignoring unmatched END marker");
                }
                continue;
            }
            _ if nested_depth > 0 => continue,
            _ => {}
        }

        if is_encoded_text_field(name) {
            let mut encoded = value.trim_end().to_string();
            while encoded.ends_with('=') && i < lines.len() {
                encoded.pop();
                encoded.push_str(lines[i].trim());
                i += 1;
            }

            let base = property_name(name);
            let text = match decode_field(base, &encoded) {
                Ok(text) => text,
                Err(error) => {
                    warnings.push(DecodeWarning {
                        field: base.to_string(),
                        error,
                    });
                    DECODE_ERROR_PLACEHOLDER.to_string()
                }
            };

            fields.insert(base, fold_line(&format!("{base}:{text}"), fold_mode));
            continue;
        }

        let mut logical = line.to_string();
        while i < lines.len() && lines[i].starts_with([' ', '\t']) {
            logical.push_str(&lines[i][1..]);
            i += 1;
        }

        if name.starts_with("DTSTART") {
            let raw = logical.split_once(':').map(|(_, v)| v).unwrap_or_default();
            dtstart_raw = Some(raw.trim().to_string());
            fields.insert("DTSTART", fold_line(&logical, fold_mode));
        } else {
            fields.insert(property_name(&logical), fold_line(&logical, fold_mode));
        }
    }

    let dtstart_raw = dtstart_raw.ok_or(EventError::MissingRequiredField("DTSTART"))?;

    Ok(ParsedEvent {
        fields,
        dtstart_raw,
        warnings,
    })
}
