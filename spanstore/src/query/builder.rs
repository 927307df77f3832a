//! Trace search predicate builder
//!
//! Compiles structured trace search parameters into the log store's textual
//! query language. A predicate is a flat `and`-joined conjunction such as
//! `where "process.serviceName" = 'auth' and 1000000 <= duration`; the
//! empty string is the match-everything predicate.

use chrono::Duration;

use crate::query::fields::{self, SpanField};
use crate::query::types::TraceQuery;

/// Compiles trace searches into logstore query predicates
///
/// Literal values are interpolated verbatim by default, so a single quote
/// embedded in a service name, operation name, or tag value produces a
/// syntactically broken predicate. [`PredicateBuilder::with_escaping`]
/// doubles single quotes inside values instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredicateBuilder {
    escape_values: bool,
}

impl PredicateBuilder {
    /// Builder that interpolates literal values verbatim
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that doubles single quotes inside literal values
    pub fn with_escaping() -> Self {
        Self { escape_values: true }
    }

    /// Compile a trace search into a predicate.
    ///
    /// Clause order is fixed: service name, operation name, duration
    /// bounds, then one clause per tag in ascending key order. Compiling
    /// the same query twice yields byte-identical output. A query with no
    /// present filter compiles to the empty string.
    pub fn compile(&self, query: &TraceQuery) -> String {
        let mut clauses = Vec::with_capacity(3 + query.tags.len());
        clauses.push(self.service_name_clause(query.service_name.as_deref().unwrap_or("")));
        clauses.push(self.operation_name_clause(query.operation_name.as_deref().unwrap_or("")));
        clauses.push(self.duration_clause(
            duration_nanos(query.duration_min),
            duration_nanos(query.duration_max),
        ));
        for (key, value) in &query.tags {
            clauses.push(self.tag_clause(key, value));
        }
        where_predicate(clauses)
    }

    /// Service name clause, or the empty string when the name is empty
    pub fn service_name_clause(&self, service: &str) -> String {
        if service.is_empty() {
            return String::new();
        }
        self.equals_clause(&fields::SERVICE_NAME, service)
    }

    /// Operation name clause, or the empty string when the name is empty
    pub fn operation_name_clause(&self, operation: &str) -> String {
        if operation.is_empty() {
            return String::new();
        }
        self.equals_clause(&fields::OPERATION_NAME, operation)
    }

    /// Duration-bound clause over nanosecond bounds; a zero bound is absent.
    ///
    /// Emits `min <= duration`, `duration <= max`, or both joined with
    /// ` and `. Spans with a duration of exactly zero cannot be selected
    /// through this clause.
    pub fn duration_clause(&self, min_nanos: i64, max_nanos: i64) -> String {
        let field = fields::DURATION.render();
        match (min_nanos != 0, max_nanos != 0) {
            (true, true) => format!("{} <= {} and {} <= {}", min_nanos, field, field, max_nanos),
            (true, false) => format!("{} <= {}", min_nanos, field),
            (false, true) => format!("{} <= {}", field, max_nanos),
            (false, false) => String::new(),
        }
    }

    /// Exact-match clause for one tag
    pub fn tag_clause(&self, key: &str, value: &str) -> String {
        self.equals_clause(&SpanField::tag(key), value)
    }

    /// Equality clause for one field, rendered per the field's quoting rule
    pub fn equals_clause(&self, field: &SpanField, value: &str) -> String {
        format!("{} = {}", field.render(), self.literal(value))
    }

    fn literal(&self, value: &str) -> String {
        if self.escape_values {
            format!("'{}'", value.replace('\'', "''"))
        } else {
            format!("'{}'", value)
        }
    }
}

/// Join clauses into a `where` predicate.
///
/// Empty clauses are skipped; the rest are joined with ` and ` and prefixed
/// with `where `. No remaining clauses yields the empty string, the
/// match-everything predicate. `and` never appears at either end.
pub fn where_predicate<I>(clauses: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let present: Vec<String> = clauses.into_iter().filter(|c| !c.is_empty()).collect();
    if present.is_empty() {
        return String::new();
    }
    format!("where {}", present.join(" and "))
}

/// Nanosecond count for an optional duration bound; absent maps to zero.
/// Durations past the i64 nanosecond range clamp to `i64::MAX`.
fn duration_nanos(duration: Option<Duration>) -> i64 {
    duration.map_or(0, |d| d.num_nanoseconds().unwrap_or(i64::MAX))
}
