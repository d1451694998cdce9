//! Benchmark errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort a benchmark run
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("I/O error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Power log is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Line {line}: missing value for column '{column}'")]
    MissingField { line: usize, column: String },

    #[error("Line {line}: invalid number '{value}' in column '{column}'")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    Config { key: String, message: String },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, BenchError>;
