//! Storage traits and error types
//!
//! This module defines the sink interface that every persistence backend
//! implements and the errors those backends report.

use crate::record::ArticleRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed stored record: {0}")]
    MalformedRecord(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// What a sink did with one flush
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushReport {
    /// Rows written
    pub rows: usize,

    /// Where they went (file path or database path)
    pub location: String,
}

/// A destination for the records collected during a run
///
/// A failed flush leaves the in-memory records untouched, so the caller can
/// still try the remaining sinks.
pub trait RecordSink {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Writes every record, returning what was written where
    fn flush(&mut self, records: &[ArticleRecord]) -> StorageResult<FlushReport>;
}
