//! CSV error types

use std::string::FromUtf8Error;

use cf_core::data::DataError;
use thiserror::Error;

/// CSV reading and writing errors
#[derive(Debug, Error)]
pub enum IoError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] FromUtf8Error),

    /// Inference or frame assembly rejected the parsed text
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// A record does not have as many fields as the first one
    #[error("Record on line {line} has {actual} fields, expected {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        actual: usize,
    },

    /// Malformed quoting under strict quote handling
    #[error("Malformed quote on line {line}")]
    Quote { line: u64 },

    #[error("Separator {0:?} is not a single-byte ASCII character")]
    InvalidSeparator(char),
}
