//! Error handling for report extraction and processing.
//!
//! Covers CSV feed shape problems, configuration failures and I/O. Decode
//! outcomes are not errors: they travel as data inside
//! [`ReportMetadata`](crate::models::ReportMetadata).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetafError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error(
        "Column {index} does not match the expected header '{expected}' (found {}{})",
        .found.as_deref().unwrap_or("no column"),
        .located_at.map(|i| format!("; the header is at column {i}")).unwrap_or_default()
    )]
    ColumnMismatch {
        index: usize,
        expected: String,
        found: Option<String>,
        /// Where the expected header actually is, when the row has it
        located_at: Option<usize>,
    },

    #[error("No CSV header row found (expected a '{expected}' column)")]
    MissingHeaderRow { expected: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl MetafError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the error concerns one record only, so the caller can skip
    /// it and carry on with the rest of the feed.
    pub fn is_record_level(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

pub type Result<T> = std::result::Result<T, MetafError>;
