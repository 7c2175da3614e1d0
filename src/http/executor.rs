use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use super::config::ClientConfig;
use crate::error::SqlMiddlewareHttpError;

/// Header carrying the configured credential.
pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Request type understood by the gateway.
pub const RUN_SQL: &str = "run_sql";

/// Body of `POST {host}/v2/query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSqlRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub args: RunSqlArgs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSqlArgs {
    pub source: String,
    pub sql: String,
}

impl RunSqlRequest {
    #[must_use]
    pub fn new(source: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            kind: RUN_SQL.to_string(),
            args: RunSqlArgs {
                source: source.into(),
                sql: sql.into(),
            },
        }
    }
}

/// Decoded gateway reply.
///
/// `result` is `None` when the key is absent and `Some(Null)` when it is an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunSqlResponse {
    #[serde(default, deserialize_with = "present")]
    pub result: Option<JsonValue>,
    #[serde(default)]
    pub result_type: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

impl RunSqlResponse {
    /// Reply with the given `result` payload.
    #[must_use]
    pub fn with_result(result: JsonValue) -> Self {
        Self {
            result: Some(result),
            result_type: None,
        }
    }
}

/// One request/response exchange with the gateway.
///
/// Implementations perform exactly one attempt per call and must not retry.
#[async_trait]
pub trait SqlTransport: Send + Sync {
    /// Send `request` to the endpoint in `config`.
    ///
    /// # Errors
    /// `HttpStatus` for a non-2xx reply, `TransportError` when the exchange fails, and
    /// `DecodeError` when the body is not the expected JSON.
    async fn run_sql(
        &self,
        config: &ClientConfig,
        request: &RunSqlRequest,
    ) -> Result<RunSqlResponse, SqlMiddlewareHttpError>;
}

/// Send already-inlined SQL to the gateway.
///
/// # Errors
/// Propagates transport failures unchanged.
pub async fn execute_sql(
    transport: &dyn SqlTransport,
    config: &ClientConfig,
    sql: &str,
) -> Result<RunSqlResponse, SqlMiddlewareHttpError> {
    let request = RunSqlRequest::new(config.source(), sql);
    tracing::debug!(
        endpoint = config.endpoint_url(),
        source = config.source(),
        sql_len = sql.len(),
        "sending run_sql"
    );
    let response = transport.run_sql(config, &request).await?;
    tracing::debug!(result_type = ?response.result_type, "run_sql answered");
    Ok(response)
}

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::header::CONTENT_TYPE;

    use super::{ADMIN_SECRET_HEADER, RunSqlRequest, RunSqlResponse, SqlTransport};
    use crate::error::SqlMiddlewareHttpError;
    use crate::http::config::ClientConfig;

    /// Transport backed by a shared `reqwest::Client` (keep-alive, no retries).
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }

        /// Transport whose requests give up after `timeout`.
        ///
        /// # Errors
        /// Returns `SqlMiddlewareHttpError::ReqwestError` if the HTTP client cannot be built.
        pub fn with_timeout(timeout: Duration) -> Result<Self, SqlMiddlewareHttpError> {
            let client = reqwest::Client::builder().timeout(timeout).build()?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl SqlTransport for ReqwestTransport {
        async fn run_sql(
            &self,
            config: &ClientConfig,
            request: &RunSqlRequest,
        ) -> Result<RunSqlResponse, SqlMiddlewareHttpError> {
            let mut builder = self
                .client
                .post(config.endpoint_url())
                .header(CONTENT_TYPE, "application/json")
                .json(request);
            if let Some(secret) = config.credential() {
                builder = builder.header(ADMIN_SECRET_HEADER, secret);
            }

            let response = builder.send().await.map_err(|e| {
                SqlMiddlewareHttpError::TransportError(format!(
                    "request to {} failed: {e}",
                    config.endpoint_url()
                ))
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(SqlMiddlewareHttpError::HttpStatus {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }

            let body = response.bytes().await.map_err(|e| {
                SqlMiddlewareHttpError::TransportError(format!("failed to read response body: {e}"))
            })?;
            Ok(serde_json::from_slice(&body)?)
        }
    }
}
