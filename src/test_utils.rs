//! Test utilities: an in-process transport that records what would have been sent.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::SqlMiddlewareHttpError;
use crate::http::{ClientConfig, RunSqlRequest, RunSqlResponse, SqlTransport};

/// A request as seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub credential: Option<String>,
    pub body: RunSqlRequest,
}

/// Transport that answers from a queue of canned replies and keeps every request.
///
/// When the queue is empty it answers `{"result": null}`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    replies: Mutex<VecDeque<Result<RunSqlResponse, SqlMiddlewareHttpError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    calls: AtomicUsize,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply whose `result` is `result`.
    pub fn push_result(&self, result: JsonValue) {
        self.push_reply(Ok(RunSqlResponse::with_result(result)));
    }

    /// Queue a non-2xx reply.
    pub fn push_status(&self, status: u16, status_text: &str) {
        self.push_reply(Err(SqlMiddlewareHttpError::HttpStatus {
            status,
            status_text: status_text.to_string(),
        }));
    }

    pub fn push_reply(&self, reply: Result<RunSqlResponse, SqlMiddlewareHttpError>) {
        self.replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push_back(reply);
    }

    /// Number of `run_sql` calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// SQL text of every request, in order.
    #[must_use]
    pub fn sent_sql(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.body.args.sql)
            .collect()
    }
}

#[async_trait]
impl SqlTransport for RecordingTransport {
    async fn run_sql(
        &self,
        config: &ClientConfig,
        request: &RunSqlRequest,
    ) -> Result<RunSqlResponse, SqlMiddlewareHttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(RecordedRequest {
                endpoint: config.endpoint_url().to_string(),
                credential: config.credential().map(str::to_string),
                body: request.clone(),
            });
        self.replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(RunSqlResponse::with_result(JsonValue::Null)))
    }
}
