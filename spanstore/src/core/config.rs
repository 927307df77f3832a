//! Reader configuration

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_MAX_LINES, DEFAULT_MAX_LOOKBACK_MINUTES};
use crate::error::SpanstoreError;

/// Configuration for the span reader
///
/// Immutable after construction. `SpanReader::new` validates it once and
/// rejects unusable values up front.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Lookback window in minutes, used to bound searches without an
    /// explicit start-time range
    pub max_lookback_minutes: u64,

    /// Maximum number of rows requested per logstore search
    pub max_lines: u32,

    /// Double single quotes inside literal values when building query
    /// predicates. Off by default: values are interpolated verbatim.
    pub escape_values: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_lookback_minutes: DEFAULT_MAX_LOOKBACK_MINUTES,
            max_lines: DEFAULT_MAX_LINES,
            escape_values: false,
        }
    }
}

impl ReaderConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SpanstoreError> {
        if self.max_lookback_minutes == 0 {
            return Err(SpanstoreError::Config(
                "max_lookback_minutes must be greater than 0".to_string(),
            ));
        }
        if self.max_lines == 0 {
            return Err(SpanstoreError::Config(
                "max_lines must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Lookback window as a duration
    pub fn max_lookback(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.max_lookback_minutes as i64)
    }
}
