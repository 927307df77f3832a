//! # logspan-spanstore
//!
//! Trace span storage over a remote log store.
//!
//! Spans are stored one per row in a log search service. This crate compiles
//! trace searches into the store's textual query language and reads results
//! back as raw rows:
//!
//! - [`query`]: predicate compilation ([`PredicateBuilder`])
//! - [`logstore`]: the client boundary and column projection
//! - [`reader`]: [`SpanReader`], the trace-storage read operations
//!
//! The log-store client itself lives outside this crate: implement
//! [`LogstoreClient`] against the store's SDK and hand it to
//! [`SpanReader::new`].

pub mod core;
pub mod error;
pub mod logstore;
pub mod query;
pub mod reader;

pub use crate::core::config::ReaderConfig;
pub use crate::error::SpanstoreError;
pub use crate::logstore::{
    GetLogsRequest, LogRecord, LogstoreClient, LogstoreError, RawTrace, column_values,
};
pub use crate::query::{PredicateBuilder, TraceQuery, where_predicate};
pub use crate::reader::SpanReader;
