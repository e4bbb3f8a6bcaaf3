//! Legacy vCalendar reading and iCalendar writing.
//!
//! The pipeline for one document is extract -> parse -> normalize;
//! [`crate::convert`] drives it over a whole file.

mod extract;
mod fold;
mod normalize;
mod parse;
pub mod quoted_printable;

pub use extract::{EventBlocks, RawEventBlock, event_blocks};
pub use fold::{FoldMode, MAX_LINE_LEN, fold_line, unfold};
pub use normalize::normalize;
pub use parse::parse_block;
