//! Trace query compilation
//!
//! Translates structured trace searches into the log store's textual query
//! language. The grammar is small: `where`, `and`, `=`, `<=`, double-quoted
//! field identifiers, single-quoted literal values, and decimal nanosecond
//! durations.
//!
//! ## Usage
//!
//! ```
//! use logspan_spanstore::query::{PredicateBuilder, TraceQuery};
//!
//! let query = TraceQuery {
//!     service_name: Some("checkout".to_string()),
//!     operation_name: Some("charge".to_string()),
//!     ..Default::default()
//! };
//! let predicate = PredicateBuilder::new().compile(&query);
//! assert_eq!(
//!     predicate,
//!     r#"where "process.serviceName" = 'checkout' and operationName = 'charge'"#
//! );
//! ```

pub mod fields;

mod builder;
mod types;

pub use builder::{PredicateBuilder, where_predicate};
pub use types::TraceQuery;
