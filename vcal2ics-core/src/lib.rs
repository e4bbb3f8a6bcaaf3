//! Core of vcal2ics: converts legacy vCalendar exports into iCalendar.
//!
//! This crate provides everything except the terminal front end:
//! - `ics` module for block extraction, field parsing, decoding, folding and normalization
//! - `Converter` for running the pipeline over a document, reporting through `ConvertObserver`
//! - `output` module for aggregate and per-event calendar files

pub mod config;
pub mod convert;
pub mod error;
pub mod event;
pub mod ics;
pub mod observer;
pub mod output;
pub mod policy;
pub mod stamp;

pub use config::ConverterConfig;
pub use convert::{Conversion, Converter};
pub use error::{ConvertError, ConvertResult, DecodeError, EventError};
pub use event::{OutputEvent, ParsedEvent};
pub use observer::{ConvertObserver, ConvertSummary, EventOutcome, TracingObserver};
