//! Logstore access layer
//!
//! The log store is a remote search service holding one span per row. This
//! module defines the client boundary ([`LogstoreClient`]), the row shape
//! ([`LogRecord`]), and column projection over returned rows.

mod client;
mod error;
mod record;

pub use client::{GetLogsRequest, LogstoreClient};
pub use error::LogstoreError;
pub use record::{LogRecord, RawTrace, column_values};
