//! Log records and column projection

use std::collections::HashMap;

use crate::error::SpanstoreError;

/// One row returned by the log store: field name to string value
///
/// Rows are schemaless; every span attribute the writer flattened into the
/// row appears here as a string.
pub type LogRecord = HashMap<String, String>;

/// All rows belonging to one trace, undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrace {
    /// Trace identifier shared by every record
    pub trace_id: String,
    /// Rows in the order the log store returned them
    pub records: Vec<LogRecord>,
}

/// Project one column out of an ordered slice of records.
///
/// The projection is strictly 1:1: output index `i` holds the column value
/// of input record `i`, and the output length always equals the input
/// length. A record lacking the column fails the whole projection with
/// [`SpanstoreError::MissingField`]; no partial result is returned.
pub fn column_values(records: &[LogRecord], column: &str) -> Result<Vec<String>, SpanstoreError> {
    let mut values = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match record.get(column) {
            Some(value) => values.push(value.clone()),
            None => {
                return Err(SpanstoreError::MissingField {
                    field: column.to_string(),
                    index,
                });
            }
        }
    }
    Ok(values)
}
