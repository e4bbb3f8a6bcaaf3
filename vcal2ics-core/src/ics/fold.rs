//! Content line folding.

use serde::{Deserialize, Serialize};

/// Maximum length of a physical line, continuation space included.
pub const MAX_LINE_LEN: usize = 75;

/// How line length is measured when folding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldMode {
    /// Count Unicode scalar values. Keeps the layout legacy converters
    /// produced; a line of non-ASCII text can exceed 75 octets.
    #[default]
    Chars,
    /// Count UTF-8 octets as RFC 5545 §3.1 requires.
    Octets,
}

impl FoldMode {
    fn width(self, c: char) -> usize {
        match self {
            FoldMode::Chars => 1,
            FoldMode::Octets => c.len_utf8(),
        }
    }

    fn len(self, s: &str) -> usize {
        match self {
            FoldMode::Chars => s.chars().count(),
            FoldMode::Octets => s.len(),
        }
    }
}

/// Folds a logical line into CRLF + space separated segments.
///
/// Never splits inside a character in either mode.
pub fn fold_line(line: &str, mode: FoldMode) -> String {
    if mode.len(line) <= MAX_LINE_LEN {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_LEN * 3);
    let mut current_len = 0;
    let mut first_segment = true;

    for c in line.chars() {
        let char_len = mode.width(c);

        let effective_max = if first_segment {
            MAX_LINE_LEN
        } else {
            MAX_LINE_LEN - 1
        };

        if current_len + char_len > effective_max {
            result.push_str("\r\n ");
            current_len = 0;
            first_segment = false;
        }

        result.push(c);
        current_len += char_len;
    }

    result
}

/// Reverses [`fold_line`]: removes every CRLF (or LF) followed by one space or tab.
pub fn unfold(text: &str) -> String {
    text.replace("\r\n ", "")
        .replace("\r\n\t", "")
        .replace("\n ", "")
        .replace("\n\t", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_unchanged() {
        let line = "SUMMARY:Lunch";
        assert_eq!(fold_line(line, FoldMode::Chars), line);

        let exact = "X".repeat(75);
        assert_eq!(fold_line(&exact, FoldMode::Chars), exact);
    }

    #[test]
    fn test_fold_at_75() {
        let line = "X".repeat(80);
        let folded = fold_line(&line, FoldMode::Chars);

        let segments: Vec<&str> = folded.split("\r\n").collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 75);
        assert_eq!(segments[1], format!(" {}", "X".repeat(5)));
    }

    #[test]
    fn test_continuations_never_exceed_75_with_space() {
        let line = format!("DESCRIPTION:{}", "abcdefghij".repeat(40));
        let folded = fold_line(&line, FoldMode::Chars);

        for (i, segment) in folded.split("\r\n").enumerate() {
            assert!(segment.chars().count() <= MAX_LINE_LEN, "Segment {} too long: {}", i, segment);
            if i > 0 {
                assert!(segment.starts_with(' '));
            }
        }
    }

    #[test]
    fn test_fold_is_idempotent_over_unfold() {
        let line = format!("LOCATION:{}", "Conference room B, 3rd floor; ".repeat(8));
        let once = fold_line(&line, FoldMode::Chars);
        let twice = fold_line(&unfold(&once), FoldMode::Chars);

        assert_eq!(once, twice);
        assert_eq!(unfold(&once), line);
    }

    #[test]
    fn test_chars_mode_counts_characters() {
        // 70 three-octet characters: 75 chars with the prefix, 215 octets
        let line = format!("NOTE:{}", "日".repeat(70));
        assert_eq!(fold_line(&line, FoldMode::Chars), line);
    }

    #[test]
    fn test_octets_mode_respects_utf8() {
        let line = format!("SUMMARY:{}", "日".repeat(40));
        let folded = fold_line(&line, FoldMode::Octets);

        assert!(folded.contains("\r\n "));
        for segment in folded.split("\r\n") {
            assert!(segment.len() <= MAX_LINE_LEN, "Segment too long: {} octets", segment.len());
        }
        assert_eq!(unfold(&folded), line);
    }
}
