//! Logstore client error types

use thiserror::Error;

/// Errors surfaced by a logstore client
///
/// The reader never retries or reinterprets these; they pass through to the
/// caller untouched.
#[derive(Error, Debug)]
pub enum LogstoreError {
    /// The log service accepted the request and rejected it
    #[error("Service error {status} ({code}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    /// The request never completed (connection, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service replied with a body the client could not interpret
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
