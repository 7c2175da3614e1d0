use crate::error::SqlMiddlewareHttpError;
use crate::http::{build_result_set, execute_sql, inline_query, is_skipped};
use crate::pool::{HttpClient, PseudoConnection};
use crate::query::RawQuery;
use crate::results::ExecutionResult;

use super::response::{QueryResponse, post_process};

impl HttpClient {
    /// Run one statement and post-process its result for the caller.
    ///
    /// Bindings are inlined with the client's dialect, transaction-control statements are
    /// answered locally with [`QueryResponse::Skipped`], and everything else makes exactly one
    /// gateway request.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use sql_middleware_http::prelude::*;
    ///
    /// # async fn demo() -> Result<(), SqlMiddlewareHttpError> {
    /// let client = HttpClient::http_builder("http://localhost:1337")
    ///     .password("nhost-admin-secret")
    ///     .dialect("pg")
    ///     .build()?;
    /// let conn = client.acquire_connection().await?;
    /// let names = client
    ///     .query(&conn, RawQuery::select("select name from test").pluck("name"))
    ///     .await?;
    /// client.release_connection(conn).await?;
    /// # let _ = names;
    /// # Ok(()) }
    /// ```
    ///
    /// # Errors
    /// `ParameterError` if the bindings cannot be inlined, and any transport error unchanged.
    pub async fn query(
        &self,
        conn: &PseudoConnection,
        query: RawQuery,
    ) -> Result<QueryResponse, SqlMiddlewareHttpError> {
        let post_op = query.post_op().cloned();
        let returning = query.returning_fields().is_some();

        match self.execute_raw(conn, query).await? {
            None => Ok(QueryResponse::Skipped),
            Some(result) => Ok(post_process(
                self.process_response(result),
                post_op.as_ref(),
                returning,
            )),
        }
    }

    /// Run one statement and return the normalized result without post-processing.
    ///
    /// Returns `Ok(None)` for a transaction-control statement, which never reaches the gateway.
    ///
    /// # Errors
    /// `ParameterError` if the bindings cannot be inlined, and any transport error unchanged.
    pub async fn execute_raw(
        &self,
        _conn: &PseudoConnection,
        query: RawQuery,
    ) -> Result<Option<ExecutionResult>, SqlMiddlewareHttpError> {
        let query = inline_query(query, self.dialect())?;
        if is_skipped(&query) {
            return Ok(None);
        }

        let response = execute_sql(self.transport(), self.config(), query.sql()).await?;
        Ok(Some(build_result_set(response, query.command())))
    }

    /// Acquire a pseudo-connection, run `query`, release the connection.
    ///
    /// # Errors
    /// Same as [`HttpClient::query`].
    pub async fn run(&self, query: RawQuery) -> Result<QueryResponse, SqlMiddlewareHttpError> {
        let conn = self.acquire_connection().await?;
        let response = self.query(&conn, query).await;
        self.release_connection(conn).await?;
        response
    }

    /// Identity hook applied to every normalized result.
    #[must_use]
    pub fn process_response<T>(&self, response: T) -> T {
        response
    }
}
