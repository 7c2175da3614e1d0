//! Run query-builder SQL against a `run_sql` HTTP gateway.
//!
//! The client stands in for a native database driver when the only reachable "database" is a
//! gateway that accepts literal SQL over `POST {host}/v2/query` and answers with tabular JSON.
//! It inlines bindings with the configured dialect, answers transaction-control statements
//! locally, sends one request per statement and reshapes the reply into rows and fields.
//!
//! Transactions are not atomic under this client: `BEGIN;`, `COMMIT;`, `ROLLBACK`,
//! `SAVEPOINT` and `RELEASE SAVEPOINT` never reach the gateway, and every statement commits
//! on its own.

pub mod dialect;
pub mod error;
pub mod executor;
pub mod http;
pub mod inline;
pub mod pool;
pub mod prelude;
pub mod query;
pub mod results;
pub mod tx_outcome;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use dialect::{DialectKind, SqlDialect};
pub use error::SqlMiddlewareHttpError;
pub use executor::QueryResponse;
pub use pool::{HttpClient, PseudoConnection};
pub use query::{PostOp, QueryMethod, RawQuery};
pub use results::{CustomDbRow, ExecutionResult, FieldDescriptor, ResultShape};
pub use types::RowValues;
