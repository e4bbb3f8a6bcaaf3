//! VEVENT block extraction from loosely delimited text.

const BEGIN_MARKER: &str = "BEGIN:VEVENT";
const END_MARKER: &str = "END:VEVENT";

/// Text between one `BEGIN:VEVENT` and the next `END:VEVENT`, markers excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEventBlock<'a> {
    /// 1-based position in the document
    pub index: usize,
    pub text: &'a str,
}

/// Lazy iterator over the VEVENT blocks of a document.
///
/// Matches the first `END:VEVENT` after each `BEGIN:VEVENT`. An unterminated
/// trailing block is silently ignored.
#[derive(Debug, Clone)]
pub struct EventBlocks<'a> {
    rest: &'a str,
    next_index: usize,
}

impl<'a> Iterator for EventBlocks<'a> {
    type Item = RawEventBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.find(BEGIN_MARKER)? + BEGIN_MARKER.len();
        let body = &self.rest[start..];

        let Some(end) = body.find(END_MARKER) else {
            self.rest = "";
            return None;
        };

        self.rest = &body[end + END_MARKER.len()..];
        self.next_index += 1;

        Some(RawEventBlock {
            index: self.next_index,
            text: &body[..end],
        })
    }
}

/// Scan `input` for VEVENT blocks.
pub fn event_blocks(input: &str) -> EventBlocks<'_> {
    EventBlocks {
        rest: input,
        next_index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_blocks_in_order() {
        let input = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:One\nEND:VEVENT\n\
                     BEGIN:VEVENT\nSUMMARY:Two\nEND:VEVENT\nEND:VCALENDAR\n";

        let blocks: Vec<_> = event_blocks(input).collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].index, 1);
        assert_eq!(blocks[0].text, "\nSUMMARY:One\n");
        assert_eq!(blocks[1].index, 2);
        assert_eq!(blocks[1].text, "\nSUMMARY:Two\n");
    }

    #[test]
    fn test_no_wrapper_and_surrounding_noise() {
        let input = "garbage before BEGIN:VEVENT\nDTSTART:20250101T090000Z\nEND:VEVENT trailing";
        let blocks: Vec<_> = event_blocks(input).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "\nDTSTART:20250101T090000Z\n");
    }

    #[test]
    fn test_unterminated_block_is_ignored() {
        let input = "BEGIN:VEVENT\nSUMMARY:Done\nEND:VEVENT\nBEGIN:VEVENT\nSUMMARY:Cut off";
        let blocks: Vec<_> = event_blocks(input).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "\nSUMMARY:Done\n");
    }

    #[test]
    fn test_stray_begin_is_swallowed_into_block() {
        let input = "BEGIN:VEVENT\nA:1\nBEGIN:VEVENT\nB:2\nEND:VEVENT\n";
        let blocks: Vec<_> = event_blocks(input).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "\nA:1\nBEGIN:VEVENT\nB:2\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(event_blocks("").count(), 0);
        assert_eq!(event_blocks("BEGIN:VCALENDAR\nEND:VCALENDAR").count(), 0);
    }

    #[test]
    fn test_clone_counts_without_consuming() {
        let input = "BEGIN:VEVENT\nEND:VEVENT\nBEGIN:VEVENT\nEND:VEVENT";
        let blocks = event_blocks(input);
        assert_eq!(blocks.clone().count(), 2);
        assert_eq!(blocks.count(), 2);
    }
}
