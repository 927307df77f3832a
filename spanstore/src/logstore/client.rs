//! Logstore client trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::logstore::error::LogstoreError;
use crate::logstore::record::LogRecord;

/// One search request against the log store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLogsRequest {
    /// Query predicate; the empty string matches everything
    pub query: String,
    /// Start of the search window (inclusive)
    pub from: DateTime<Utc>,
    /// End of the search window (exclusive)
    pub to: DateTime<Utc>,
    /// Maximum number of rows to return
    pub lines: u32,
    /// Row offset into the full result set
    pub offset: u32,
    /// Return newest rows first
    pub reverse: bool,
}

/// Client for the log store's search endpoint
///
/// Implementations translate the request to the store's SDK and map
/// failures into [`LogstoreError`] without retrying; the reader surfaces
/// them to the caller as-is.
#[async_trait]
pub trait LogstoreClient: Send + Sync {
    /// Execute one search and return the matching rows in store order
    async fn get_logs(&self, request: &GetLogsRequest) -> Result<Vec<LogRecord>, LogstoreError>;
}
