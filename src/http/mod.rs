//! Gateway backend: SQL over `POST {host}/v2/query`.
//!
//! Mirrors the layout of a native backend:
//! - `config`: option parsing, validation and client construction
//! - `params`: binding inlining (the gateway takes literal SQL only)
//! - `transaction`: transaction-control statements answered locally
//! - `executor`: the HTTP exchange
//! - `query`: result normalization

pub mod config;
pub mod executor;
pub mod params;
pub mod query;
pub mod transaction;

pub use config::{
    ClientConfig, ClientOptions, ConnectionParams, ConnectionSpec, DEFAULT_SOURCE, ENDPOINT_PATH,
    HttpOptions, HttpOptionsBuilder,
};
#[cfg(feature = "reqwest")]
pub use executor::ReqwestTransport;
pub use executor::{
    ADMIN_SECRET_HEADER, RunSqlArgs, RunSqlRequest, RunSqlResponse, SqlTransport, execute_sql,
};
pub use params::inline_query;
pub use query::build_result_set;
pub use transaction::{TRANSACTION_COMMANDS, is_skipped, is_transaction_command};
