//! Unified error type for span storage operations

use thiserror::Error;

use crate::logstore::LogstoreError;

/// Unified error type for span storage operations
///
/// Wraps logstore client failures while keeping reader-level failures
/// (projection, lookup, configuration) distinguishable for callers.
#[derive(Error, Debug)]
pub enum SpanstoreError {
    /// A log record lacked a column the projection required
    #[error("Log record {index} is missing field {field}")]
    MissingField { field: String, index: usize },

    /// No log records exist for the requested trace
    #[error("Trace {trace_id} not found")]
    TraceNotFound { trace_id: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logstore client error, surfaced unmodified
    #[error("Logstore error: {0}")]
    Logstore(#[from] LogstoreError),
}
