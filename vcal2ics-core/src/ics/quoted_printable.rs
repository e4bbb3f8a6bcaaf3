//! Quoted-printable decoding for legacy vCalendar text fields.
//!
//! vCalendar 1.0 exports carry non-ASCII text as `=XX` escapes
//! (`SUMMARY;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:=E4=BC=9A=E8=AD=B0`).
//! Decoded text is re-escaped as an iCalendar TEXT value.

use crate::error::DecodeError;

/// Text emitted in place of a value that failed to decode.
pub const DECODE_ERROR_PLACEHOLDER: &str = "(decode error)";

const HEX_DECODE: [i8; 256] = {
    let mut t = [-1i8; 256];
    let mut i = 0u8;
    while i < 10 {
        t[(b'0' + i) as usize] = i as i8;
        i += 1;
    }
    let mut i = 0u8;
    while i < 6 {
        t[(b'A' + i) as usize] = (10 + i) as i8;
        t[(b'a' + i) as usize] = (10 + i) as i8;
        i += 1;
    }
    t
};

/// Decode a quoted-printable value into UTF-8 text.
///
/// Soft line breaks must already be joined. A lone `=` at the very end is
/// treated as a dangling soft break and dropped.
pub fn decode(encoded: &str) -> Result<String, DecodeError> {
    let src = encoded.as_bytes();
    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;

    while pos < src.len() {
        let b = src[pos];
        if b != b'=' {
            out.push(b);
            pos += 1;
            continue;
        }

        match src.len() - pos {
            1 => {
                pos += 1;
            }
            2 => return Err(DecodeError::InvalidEscape { position: pos }),
            _ => {
                let hi = HEX_DECODE[src[pos + 1] as usize];
                let lo = HEX_DECODE[src[pos + 2] as usize];
                if hi < 0 || lo < 0 {
                    return Err(DecodeError::InvalidEscape { position: pos });
                }
                out.push(((hi as u8) << 4) | lo as u8);
                pos += 3;
            }
        }
    }

    Ok(String::from_utf8(out)?)
}

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Escapes backslash, comma, semicolon and newlines. Bare CRs are dropped.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Decode and escape one field value.
pub fn decode_field(field_name: &str, encoded: &str) -> Result<String, DecodeError> {
    let decoded = decode(encoded)?;
    tracing::trace!(field = field_name, decoded = %decoded, "decoded quoted-printable value");
    Ok(escape_text(&decoded))
}
