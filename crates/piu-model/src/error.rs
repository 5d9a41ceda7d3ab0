use std::path::PathBuf;
use thiserror::Error;

/// Failure to decode a note chart. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to read chart file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid time value {text:?} on line {line}")]
    InvalidNumber { line: usize, text: String },

    #[error("Missing end time on line {line}")]
    MissingField { line: usize },

    #[error("Unexpected token {text:?} on line {line}")]
    UnexpectedToken { line: usize, text: String },

    #[error("Column {column} is not terminated by '*'")]
    MissingTerminator { column: usize },

    #[error("Note on line {line} ends before it starts ({start} > {end})")]
    InvertedInterval { line: usize, start: i64, end: i64 },

    #[error("Note on line {line} starts before the previous note in its column ends")]
    Unsorted { line: usize },

    #[error("Chart contains no columns")]
    EmptyChart,
}
