use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlMiddlewareHttpError {
    #[cfg(feature = "reqwest")]
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    DecodeError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parameter conversion error: {0}")]
    ParameterError(String),

    /// The gateway answered with a non-2xx status.
    #[error("Error: {status} {status_text}")]
    HttpStatus { status: u16, status_text: String },

    #[error("Transport error: {0}")]
    TransportError(String),
}

impl SqlMiddlewareHttpError {
    /// Whether this error was raised before anything was sent to the gateway.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::ConfigError(_) | Self::ParameterError(_))
    }
}
