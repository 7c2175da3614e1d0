mod connection;

pub use connection::PseudoConnection;

use std::sync::Arc;

use crate::dialect::{DialectKind, SqlDialect};
use crate::error::SqlMiddlewareHttpError;
use crate::http::{ClientConfig, SqlTransport};

/// Gateway client: validated configuration, dialect strategy and transport.
///
/// Cloning is cheap and clones share the same transport. The configuration is immutable, so
/// any number of calls may run concurrently without locking; nothing limits or orders them.
#[derive(Clone)]
pub struct HttpClient {
    config: Arc<ClientConfig>,
    dialect: DialectKind,
    transport: Arc<dyn SqlTransport>,
}

// Manual Debug implementation because the transport is a trait object
impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("dialect", &self.dialect)
            .field("transport", &"<SqlTransport>")
            .finish()
    }
}

impl HttpClient {
    pub(crate) fn from_parts(
        config: ClientConfig,
        dialect: DialectKind,
        transport: Arc<dyn SqlTransport>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            dialect,
            transport,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn dialect_kind(&self) -> DialectKind {
        self.dialect
    }

    #[must_use]
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        self.dialect.strategy()
    }

    pub(crate) fn transport(&self) -> &dyn SqlTransport {
        self.transport.as_ref()
    }

    /// Hand out a fresh pseudo-connection.
    ///
    /// # Errors
    /// This function currently never returns an error but maintains Result for API consistency.
    #[allow(clippy::unused_async)]
    pub async fn acquire_connection(&self) -> Result<PseudoConnection, SqlMiddlewareHttpError> {
        Ok(PseudoConnection::new())
    }

    /// Return a pseudo-connection. Nothing is cleaned up.
    ///
    /// # Errors
    /// This function currently never returns an error but maintains Result for API consistency.
    #[allow(clippy::unused_async)]
    pub async fn release_connection(
        &self,
        _conn: PseudoConnection,
    ) -> Result<(), SqlMiddlewareHttpError> {
        Ok(())
    }
}
