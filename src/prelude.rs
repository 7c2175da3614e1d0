//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::dialect::{DialectKind, SqlDialect};
pub use crate::error::SqlMiddlewareHttpError;
pub use crate::executor::QueryResponse;
pub use crate::http::{ClientOptions, HttpOptions, HttpOptionsBuilder, SqlTransport};
pub use crate::inline::inline_bindings;
pub use crate::pool::{HttpClient, PseudoConnection};
pub use crate::query::{PostOp, QueryMethod, RawQuery};
pub use crate::results::{CustomDbRow, ExecutionResult, FieldDescriptor, ResultShape};
pub use crate::tx_outcome::{TxBoundary, TxOutcome};
pub use crate::types::RowValues;

#[cfg(feature = "reqwest")]
pub use crate::http::ReqwestTransport;
