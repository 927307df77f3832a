//! Span field identifiers
//!
//! The logstore span schema mixes two kinds of field names: plain top-level
//! fields (`operationName`, `duration`) and namespaced fields
//! (`process.serviceName`, `tags.*`). Namespaced names must be double-quoted
//! when they appear in a query expression; plain names appear bare. The
//! quoting rule is carried per field so clause builders never decide it
//! inline.

use std::borrow::Cow;

/// A named field in the logstore span schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanField {
    name: Cow<'static, str>,
    reserved: bool,
}

/// Trace identifier column
pub const TRACE_ID: SpanField = SpanField {
    name: Cow::Borrowed("traceID"),
    reserved: false,
};

/// Service name column, namespaced under `process`
pub const SERVICE_NAME: SpanField = SpanField {
    name: Cow::Borrowed("process.serviceName"),
    reserved: true,
};

/// Operation name column
pub const OPERATION_NAME: SpanField = SpanField {
    name: Cow::Borrowed("operationName"),
    reserved: false,
};

/// Span duration column, in nanoseconds
pub const DURATION: SpanField = SpanField {
    name: Cow::Borrowed("duration"),
    reserved: false,
};

impl SpanField {
    /// Field for one span tag; tag columns live under the `tags.` namespace
    pub fn tag(key: &str) -> SpanField {
        SpanField {
            name: Cow::Owned(format!("tags.{}", key)),
            reserved: true,
        }
    }

    /// Raw field name as it appears in log records
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier text for embedding in a query expression
    pub fn render(&self) -> String {
        if self.reserved {
            format!("\"{}\"", self.name)
        } else {
            self.name.to_string()
        }
    }
}
