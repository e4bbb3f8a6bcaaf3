//! Error types for vcal2ics.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Could not read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write output {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for fatal conversion errors.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that drop a single event without stopping the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("missing required field {0}")]
    MissingRequiredField(&'static str),

    #[error("DTSTART value '{0}' does not match YYYYMMDDTHHMMSSZ")]
    MalformedTimestamp(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// A quoted-printable payload that could not be decoded.
///
/// Never fatal: the field is emitted with placeholder text instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed escape sequence at byte {position}")]
    InvalidEscape { position: usize },

    #[error("decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
