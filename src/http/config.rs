use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use crate::dialect::DialectKind;
use crate::error::SqlMiddlewareHttpError;
use crate::pool::HttpClient;

use super::executor::SqlTransport;

/// Path appended to the configured host to reach the SQL execution endpoint.
pub const ENDPOINT_PATH: &str = "/v2/query";

/// Data source named in every request unless overridden.
pub const DEFAULT_SOURCE: &str = "default";

static URL_SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/]+").expect("static regex compiles")
});

/// Validated, immutable gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint_url: String,
    credential: Option<String>,
    source: String,
}

impl ClientConfig {
    /// Validate options and resolve the dialect.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` if the host is missing, blank or not an
    /// absolute URL, or if the dialect name is not supported.
    pub fn validate(opts: &HttpOptions) -> Result<(Self, DialectKind), SqlMiddlewareHttpError> {
        let host = opts.host.as_deref().map(str::trim).unwrap_or_default();
        if host.is_empty() {
            return Err(SqlMiddlewareHttpError::ConfigError(
                "connection.host must be set to the gateway endpoint".to_string(),
            ));
        }
        if !URL_SCHEME.is_match(host) {
            return Err(SqlMiddlewareHttpError::ConfigError(format!(
                "connection.host must be an absolute URL such as http://localhost:8080, got {host}"
            )));
        }

        let dialect = match opts.dialect.as_deref() {
            Some(name) => DialectKind::from_name(name)?,
            None => DialectKind::default(),
        };

        let source = opts
            .source
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        Ok((
            Self {
                endpoint_url: format!("{}{ENDPOINT_PATH}", host.trim_end_matches('/')),
                credential: opts.password.clone().filter(|p| !p.is_empty()),
                source,
            },
            dialect,
        ))
    }

    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Options for configuring a gateway client.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub host: Option<String>,
    pub password: Option<String>,
    pub dialect: Option<String>,
    pub source: Option<String>,
}

impl HttpOptions {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Fluent builder for gateway options.
#[derive(Debug, Clone)]
pub struct HttpOptionsBuilder {
    opts: HttpOptions,
}

impl HttpOptionsBuilder {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            opts: HttpOptions::new(host),
        }
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.opts.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn dialect(mut self, dialect: impl Into<String>) -> Self {
        self.opts.dialect = Some(dialect.into());
        self
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.opts.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn finish(self) -> HttpOptions {
        self.opts
    }

    /// Build a client backed by the default `reqwest` transport.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` if validation fails.
    #[cfg(feature = "reqwest")]
    pub fn build(self) -> Result<HttpClient, SqlMiddlewareHttpError> {
        HttpClient::new_http(self.finish())
    }

    /// Build a client that sends requests through `transport`.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` if validation fails.
    pub fn build_with_transport(
        self,
        transport: Arc<dyn SqlTransport>,
    ) -> Result<HttpClient, SqlMiddlewareHttpError> {
        HttpClient::new_http_with_transport(self.finish(), transport)
    }
}

/// Construction options in the shape the query builder hands over:
/// `{ "connection": { "host": "...", "password": "..." }, "dialect": "pg" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientOptions {
    pub connection: ConnectionSpec,
    #[serde(default)]
    pub dialect: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// The `connection` entry of [`ClientOptions`]. Only the object form is usable.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConnectionSpec {
    Params(ConnectionParams),
    Url(String),
    Other(JsonValue),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionParams {
    #[serde(default)]
    pub host: Option<String>,
    /// Non-string values are ignored and treated as no credential.
    #[serde(default, deserialize_with = "string_or_none")]
    pub password: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Some(s),
        _ => None,
    })
}

impl ClientOptions {
    /// Parse options from loosely-typed JSON.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` if `value` is not an object or lacks a
    /// `connection` entry.
    pub fn from_json(value: JsonValue) -> Result<Self, SqlMiddlewareHttpError> {
        if !value.is_object() {
            return Err(SqlMiddlewareHttpError::ConfigError(
                "client options must be an object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| {
            SqlMiddlewareHttpError::ConfigError(format!("invalid client options: {e}"))
        })
    }
}

impl TryFrom<ClientOptions> for HttpOptions {
    type Error = SqlMiddlewareHttpError;

    fn try_from(options: ClientOptions) -> Result<Self, Self::Error> {
        let params = match options.connection {
            ConnectionSpec::Params(params) => params,
            ConnectionSpec::Url(_) => {
                return Err(SqlMiddlewareHttpError::ConfigError(
                    "connection must be an object".to_string(),
                ));
            }
            ConnectionSpec::Other(other) => {
                return Err(SqlMiddlewareHttpError::ConfigError(if other.is_object() {
                    "connection.host must be a string".to_string()
                } else {
                    "connection must be an object".to_string()
                }));
            }
        };
        Ok(HttpOptions {
            host: params.host,
            password: params.password,
            dialect: options.dialect,
            source: options.source,
        })
    }
}

impl HttpClient {
    #[must_use]
    pub fn http_builder(host: impl Into<String>) -> HttpOptionsBuilder {
        HttpOptionsBuilder::new(host)
    }

    /// Initializer for `HttpClient` using the default `reqwest` transport.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` if validation fails.
    #[cfg(feature = "reqwest")]
    pub fn new_http(opts: HttpOptions) -> Result<Self, SqlMiddlewareHttpError> {
        Self::new_http_with_transport(opts, Arc::new(super::executor::ReqwestTransport::new()))
    }

    /// Initializer for `HttpClient` with a caller-supplied transport.
    ///
    /// Validation runs first; the transport is never touched when it fails.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` if validation fails.
    pub fn new_http_with_transport(
        opts: HttpOptions,
        transport: Arc<dyn SqlTransport>,
    ) -> Result<Self, SqlMiddlewareHttpError> {
        let (config, dialect) = ClientConfig::validate(&opts)?;
        tracing::debug!(
            endpoint = config.endpoint_url(),
            dialect = ?dialect,
            authenticated = config.credential().is_some(),
            "configured gateway client"
        );
        Ok(HttpClient::from_parts(config, dialect, transport))
    }

    /// Initializer from query-builder style options.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` if the connection is not an object or
    /// validation fails.
    pub fn from_client_options(
        options: ClientOptions,
        transport: Arc<dyn SqlTransport>,
    ) -> Result<Self, SqlMiddlewareHttpError> {
        Self::new_http_with_transport(HttpOptions::try_from(options)?, transport)
    }

    /// Initializer from loosely-typed JSON options.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` for any malformed or invalid option.
    pub fn from_json_options(
        value: JsonValue,
        transport: Arc<dyn SqlTransport>,
    ) -> Result<Self, SqlMiddlewareHttpError> {
        Self::from_client_options(ClientOptions::from_json(value)?, transport)
    }
}
