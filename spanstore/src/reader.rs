//! Span reader
//!
//! Trace-storage read operations over a remote log store. The reader
//! compiles each search into a query predicate, bounds it with the
//! configured lookback window when the caller gives no time range, and
//! projects columns out of the returned rows. Rows come back undecoded.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::config::ReaderConfig;
use crate::error::SpanstoreError;
use crate::logstore::{GetLogsRequest, LogRecord, LogstoreClient, RawTrace, column_values};
use crate::query::{PredicateBuilder, TraceQuery, fields, where_predicate};

/// Reads traces, services, and operations from a remote log store
///
/// Immutable after construction; all methods take `&self` and are safe to
/// call concurrently. Each operation issues exactly one logstore search,
/// except [`SpanReader::find_traces`] which issues one per matched trace.
pub struct SpanReader {
    client: Arc<dyn LogstoreClient>,
    config: ReaderConfig,
    builder: PredicateBuilder,
}

impl std::fmt::Debug for SpanReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanReader")
            .field("config", &self.config)
            .finish()
    }
}

impl SpanReader {
    /// Create a reader over a logstore client, validating the configuration
    pub fn new(
        client: Arc<dyn LogstoreClient>,
        config: ReaderConfig,
    ) -> Result<Self, SpanstoreError> {
        config.validate()?;
        let builder = if config.escape_values {
            PredicateBuilder::with_escaping()
        } else {
            PredicateBuilder::new()
        };
        tracing::debug!(
            max_lookback_minutes = config.max_lookback_minutes,
            max_lines = config.max_lines,
            escape_values = config.escape_values,
            "Initializing span reader"
        );
        Ok(Self {
            client,
            config,
            builder,
        })
    }

    /// All service names seen within the lookback window, sorted and unique
    pub async fn get_services(&self) -> Result<Vec<String>, SpanstoreError> {
        let logs = self.search(String::new(), None, None).await?;
        let services = column_values(&logs, fields::SERVICE_NAME.name())?;
        Ok(sorted_unique(services))
    }

    /// Operation names recorded for one service, sorted and unique
    ///
    /// An empty service name matches every operation in the window.
    pub async fn get_operations(&self, service: &str) -> Result<Vec<String>, SpanstoreError> {
        let query = where_predicate([self.builder.service_name_clause(service)]);
        let logs = self.search(query, None, None).await?;
        let operations = column_values(&logs, fields::OPERATION_NAME.name())?;
        Ok(sorted_unique(operations))
    }

    /// Trace ids matching a search, newest first
    ///
    /// Duplicates are dropped, keeping each id's first occurrence.
    pub async fn find_trace_ids(&self, query: &TraceQuery) -> Result<Vec<String>, SpanstoreError> {
        let predicate = self.builder.compile(query);
        let logs = self
            .search(predicate, query.start_time_min, query.start_time_max)
            .await?;
        let trace_ids = column_values(&logs, fields::TRACE_ID.name())?;
        Ok(dedup_first_seen(trace_ids))
    }

    /// All rows of one trace, in store order
    pub async fn get_trace(&self, trace_id: &str) -> Result<RawTrace, SpanstoreError> {
        let query = where_predicate([self.builder.equals_clause(&fields::TRACE_ID, trace_id)]);
        let records = self.search(query, None, None).await?;
        if records.is_empty() {
            return Err(SpanstoreError::TraceNotFound {
                trace_id: trace_id.to_string(),
            });
        }
        Ok(RawTrace {
            trace_id: trace_id.to_string(),
            records,
        })
    }

    /// Traces matching a search, in [`SpanReader::find_trace_ids`] order
    ///
    /// A trace that disappears between the id search and the row fetch is
    /// skipped. Every other failure aborts the whole search.
    pub async fn find_traces(&self, query: &TraceQuery) -> Result<Vec<RawTrace>, SpanstoreError> {
        let trace_ids = self.find_trace_ids(query).await?;
        let mut traces = Vec::with_capacity(trace_ids.len());
        for trace_id in trace_ids {
            match self.get_trace(&trace_id).await {
                Ok(trace) => traces.push(trace),
                Err(SpanstoreError::TraceNotFound { .. }) => {
                    tracing::warn!(trace_id = %trace_id, "Trace vanished between search and fetch");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(traces)
    }

    /// Issue one logstore search, bounding an unspecified time range with
    /// the lookback window anchored at the range end.
    async fn search(
        &self,
        query: String,
        start_time_min: Option<DateTime<Utc>>,
        start_time_max: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogRecord>, SpanstoreError> {
        let to = start_time_max.unwrap_or_else(Utc::now);
        let from = start_time_min.unwrap_or_else(|| to - self.config.max_lookback());
        let request = GetLogsRequest {
            query,
            from,
            to,
            lines: self.config.max_lines,
            offset: 0,
            reverse: true,
        };
        tracing::debug!(
            query = %request.query,
            from = %request.from,
            to = %request.to,
            "Searching logstore"
        );
        let logs = self.client.get_logs(&request).await?;
        tracing::debug!(rows = logs.len(), "Logstore search returned");
        Ok(logs)
    }
}

/// Sort values and drop duplicates
fn sorted_unique(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values.dedup();
    values
}

/// Drop duplicate values, keeping each one's first occurrence in order
fn dedup_first_seen(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(v.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    use crate::logstore::LogstoreError;

    /// Client double that replays canned responses and records every request
    struct MockClient {
        responses: Mutex<VecDeque<Result<Vec<LogRecord>, LogstoreError>>>,
        requests: Mutex<Vec<GetLogsRequest>>,
    }

    impl MockClient {
        fn new(responses: Vec<Result<Vec<LogRecord>, LogstoreError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<GetLogsRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LogstoreClient for MockClient {
        async fn get_logs(
            &self,
            request: &GetLogsRequest,
        ) -> Result<Vec<LogRecord>, LogstoreError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn record(fields: &[(&str, &str)]) -> LogRecord {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn reader(client: Arc<MockClient>) -> SpanReader {
        SpanReader::new(client, ReaderConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ReaderConfig {
            max_lookback_minutes: 0,
            ..Default::default()
        };
        let err = SpanReader::new(MockClient::new(Vec::new()), config).unwrap_err();
        assert!(matches!(err, SpanstoreError::Config(_)));
    }

    #[tokio::test]
    async fn test_get_services_sorted_unique() {
        let client = MockClient::new(vec![Ok(vec![
            record(&[("process.serviceName", "web")]),
            record(&[("process.serviceName", "auth")]),
            record(&[("process.serviceName", "web")]),
        ])]);
        let reader = reader(client.clone());

        let services = reader.get_services().await.unwrap();
        assert_eq!(services, vec!["auth", "web"]);

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "");
        assert_eq!(requests[0].lines, 100);
        assert_eq!(requests[0].offset, 0);
        assert!(requests[0].reverse);
        assert_eq!(requests[0].to - requests[0].from, Duration::minutes(1440));
    }

    #[tokio::test]
    async fn test_get_operations_builds_service_predicate() {
        let client = MockClient::new(vec![Ok(vec![
            record(&[("operationName", "op1")]),
            record(&[("operationName", "op0")]),
            record(&[("operationName", "op1")]),
        ])]);
        let reader = reader(client.clone());

        let operations = reader.get_operations("svc1").await.unwrap();
        assert_eq!(operations, vec!["op0", "op1"]);
        assert_eq!(
            client.requests()[0].query,
            r#"where "process.serviceName" = 'svc1'"#
        );
    }

    #[tokio::test]
    async fn test_get_operations_empty_service_matches_all() {
        let client = MockClient::new(vec![Ok(vec![record(&[("operationName", "op0")])])]);
        let reader = reader(client.clone());

        reader.get_operations("").await.unwrap();
        assert_eq!(client.requests()[0].query, "");
    }

    #[tokio::test]
    async fn test_find_trace_ids_first_seen_order() {
        let client = MockClient::new(vec![Ok(vec![
            record(&[("traceID", "t2")]),
            record(&[("traceID", "t1")]),
            record(&[("traceID", "t2")]),
            record(&[("traceID", "t3")]),
        ])]);
        let reader = reader(client.clone());

        let query = TraceQuery {
            service_name: Some("s".to_string()),
            ..Default::default()
        };
        let trace_ids = reader.find_trace_ids(&query).await.unwrap();
        assert_eq!(trace_ids, vec!["t2", "t1", "t3"]);
        assert_eq!(
            client.requests()[0].query,
            r#"where "process.serviceName" = 's'"#
        );
    }

    #[tokio::test]
    async fn test_find_trace_ids_uses_explicit_time_range() {
        let client = MockClient::new(vec![Ok(Vec::new())]);
        let reader = reader(client.clone());

        let from = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap();
        let query = TraceQuery {
            start_time_min: Some(from),
            start_time_max: Some(to),
            ..Default::default()
        };
        reader.find_trace_ids(&query).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].from, from);
        assert_eq!(requests[0].to, to);
    }

    #[tokio::test]
    async fn test_lookback_window_from_config() {
        let client = MockClient::new(vec![Ok(Vec::new())]);
        let config = ReaderConfig {
            max_lookback_minutes: 15,
            ..Default::default()
        };
        let reader = SpanReader::new(client.clone(), config).unwrap();

        reader.find_trace_ids(&TraceQuery::default()).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests[0].query, "");
        assert_eq!(requests[0].to - requests[0].from, Duration::minutes(15));
    }

    #[tokio::test]
    async fn test_find_trace_ids_missing_column() {
        let client = MockClient::new(vec![Ok(vec![
            record(&[("traceID", "t1")]),
            record(&[("operationName", "op0")]),
        ])]);
        let reader = reader(client);

        let err = reader
            .find_trace_ids(&TraceQuery::default())
            .await
            .unwrap_err();
        match err {
            SpanstoreError::MissingField { field, index } => {
                assert_eq!(field, "traceID");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_get_trace_returns_records() {
        let client = MockClient::new(vec![Ok(vec![
            record(&[("traceID", "feadc6183f6a"), ("operationName", "op0")]),
            record(&[("traceID", "feadc6183f6a"), ("operationName", "op1")]),
        ])]);
        let reader = reader(client.clone());

        let trace = reader.get_trace("feadc6183f6a").await.unwrap();
        assert_eq!(trace.trace_id, "feadc6183f6a");
        assert_eq!(trace.records.len(), 2);
        assert_eq!(
            client.requests()[0].query,
            "where traceID = 'feadc6183f6a'"
        );
    }

    #[tokio::test]
    async fn test_get_trace_not_found() {
        let client = MockClient::new(vec![Ok(Vec::new())]);
        let reader = reader(client);

        let err = reader.get_trace("missing").await.unwrap_err();
        match err {
            SpanstoreError::TraceNotFound { trace_id } => assert_eq!(trace_id, "missing"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_find_traces_fetches_each_trace() {
        let client = MockClient::new(vec![
            Ok(vec![
                record(&[("traceID", "t1")]),
                record(&[("traceID", "t2")]),
            ]),
            Ok(vec![
                record(&[("traceID", "t1"), ("operationName", "op0")]),
                record(&[("traceID", "t1"), ("operationName", "op1")]),
            ]),
            Ok(vec![record(&[("traceID", "t2"), ("operationName", "op0")])]),
        ]);
        let reader = reader(client.clone());

        let traces = reader.find_traces(&TraceQuery::default()).await.unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].trace_id, "t1");
        assert_eq!(traces[0].records.len(), 2);
        assert_eq!(traces[1].trace_id, "t2");
        assert_eq!(traces[1].records.len(), 1);

        let requests = client.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].query, "where traceID = 't1'");
        assert_eq!(requests[2].query, "where traceID = 't2'");
    }

    #[tokio::test]
    async fn test_find_traces_skips_vanished_trace() {
        let client = MockClient::new(vec![
            Ok(vec![
                record(&[("traceID", "t1")]),
                record(&[("traceID", "t2")]),
            ]),
            Ok(Vec::new()),
            Ok(vec![record(&[("traceID", "t2"), ("operationName", "op0")])]),
        ]);
        let reader = reader(client);

        let traces = reader.find_traces(&TraceQuery::default()).await.unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].trace_id, "t2");
    }

    #[tokio::test]
    async fn test_client_error_passes_through() {
        let client = MockClient::new(vec![Err(LogstoreError::Service {
            status: 400,
            code: "ParameterInvalid".to_string(),
            message: "query syntax error".to_string(),
        })]);
        let reader = reader(client);

        let err = reader.get_services().await.unwrap_err();
        match err {
            SpanstoreError::Logstore(LogstoreError::Service { status, code, message }) => {
                assert_eq!(status, 400);
                assert_eq!(code, "ParameterInvalid");
                assert_eq!(message, "query syntax error");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_escape_values_config_flows_to_predicates() {
        let client = MockClient::new(vec![Ok(Vec::new())]);
        let config = ReaderConfig {
            escape_values: true,
            ..Default::default()
        };
        let reader = SpanReader::new(client.clone(), config).unwrap();

        let query = TraceQuery {
            service_name: Some("O'Hare".to_string()),
            ..Default::default()
        };
        reader.find_trace_ids(&query).await.unwrap();

        assert_eq!(
            client.requests()[0].query,
            r#"where "process.serviceName" = 'O''Hare'"#
        );
    }
}
