//! SQL dialect strategies used to render bound values as literals.
//!
//! The gateway only accepts literal SQL text, so every binding is rendered by the dialect the
//! client was configured with. Each strategy is a stateless static; the client holds a
//! `&'static dyn SqlDialect` picked from the registry below.
//! - `postgres`: Postgres and wire-compatible engines (the gateway default)
//! - `mysql`: MySQL / MariaDB backslash escaping
//! - `sqlite`: SQLite quoting
//! - `mssql`: SQL Server `N'..'` strings and bracketed identifiers

use std::fmt::Write as _;

use clap::ValueEnum;

use crate::error::SqlMiddlewareHttpError;
use crate::types::RowValues;

mod mssql;
mod mysql;
mod postgres;
mod sqlite;

pub use mssql::Mssql;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

/// Dialect names accepted in client configuration. Lookup is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum DialectKind {
    /// Postgres and wire-compatible engines. Used when no dialect is configured.
    #[default]
    #[value(name = "pg", aliases = ["postgres", "postgresql", "pgnative", "redshift", "cockroachdb"])]
    Postgres,
    /// MySQL / MariaDB.
    #[value(name = "mysql", aliases = ["mysql2"])]
    MySql,
    /// SQLite.
    #[value(name = "sqlite3", aliases = ["sqlite", "better-sqlite3"])]
    Sqlite,
    /// Microsoft SQL Server.
    #[value(name = "mssql")]
    Mssql,
}

impl DialectKind {
    /// Resolve a configured dialect name.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ConfigError` when the name is not a supported dialect.
    pub fn from_name(name: &str) -> Result<Self, SqlMiddlewareHttpError> {
        <Self as ValueEnum>::from_str(name, false).map_err(|_| {
            SqlMiddlewareHttpError::ConfigError(format!(
                "Unknown configuration option 'dialect' value {name}. \
                 Note that it is case-sensitive; supported values are: {}",
                Self::supported_names().join(", ")
            ))
        })
    }

    /// Every accepted name, aliases included.
    #[must_use]
    pub fn supported_names() -> Vec<String> {
        Self::value_variants()
            .iter()
            .filter_map(ValueEnum::to_possible_value)
            .flat_map(|pv| {
                pv.get_name_and_aliases()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// The static strategy implementing this dialect.
    #[must_use]
    pub fn strategy(self) -> &'static dyn SqlDialect {
        match self {
            DialectKind::Postgres => &Postgres,
            DialectKind::MySql => &MySql,
            DialectKind::Sqlite => &Sqlite,
            DialectKind::Mssql => &Mssql,
        }
    }
}

/// Literal rendering rules for one SQL dialect.
///
/// Implementors supply the quoting primitives; `render_literal` stitches them together.
pub trait SqlDialect: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> DialectKind;

    /// Quote a string value as a literal, escaping as the dialect requires.
    fn quote_string(&self, value: &str) -> String;

    fn render_bool(&self, value: bool) -> &'static str;

    fn render_blob(&self, bytes: &[u8]) -> String;

    /// Quote a single identifier part (no dot splitting).
    fn quote_identifier_part(&self, part: &str) -> String;

    /// Whether a backslash escapes the next character inside a single-quoted string.
    fn backslash_escapes(&self) -> bool {
        false
    }

    /// Render a float literal.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ParameterError` for NaN or infinite values, which most
    /// dialects cannot express as literals.
    fn render_float(&self, value: f64) -> Result<String, SqlMiddlewareHttpError> {
        if value.is_finite() {
            Ok(value.to_string())
        } else {
            Err(SqlMiddlewareHttpError::ParameterError(format!(
                "{value} cannot be rendered as a {:?} literal",
                self.kind()
            )))
        }
    }

    /// Quote a possibly dotted identifier such as `schema.table`; `*` stays bare.
    fn quote_identifier(&self, ident: &str) -> String {
        ident
            .split('.')
            .map(|part| {
                if part == "*" {
                    part.to_string()
                } else {
                    self.quote_identifier_part(part)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Render a bound value as a self-contained SQL literal.
    ///
    /// # Errors
    /// Returns `SqlMiddlewareHttpError::ParameterError` if the value has no literal form.
    fn render_literal(&self, value: &RowValues) -> Result<String, SqlMiddlewareHttpError> {
        Ok(match value {
            RowValues::Null => "NULL".to_string(),
            RowValues::Int(i) => i.to_string(),
            RowValues::Float(f) => self.render_float(*f)?,
            RowValues::Bool(b) => self.render_bool(*b).to_string(),
            RowValues::Text(s) => self.quote_string(s),
            RowValues::Timestamp(dt) => self.quote_string(&dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            RowValues::JSON(json) => self.quote_string(&json.to_string()),
            RowValues::Blob(bytes) => self.render_blob(bytes),
        })
    }
}

pub(crate) fn hex_lower(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Wrap `value` in `open`..`close`, doubling any `close` character inside it.
pub(crate) fn wrap_doubling(value: &str, open: &str, close: char) -> String {
    let mut out = String::with_capacity(value.len() + open.len() + 1);
    out.push_str(open);
    for c in value.chars() {
        if c == close {
            out.push(c);
        }
        out.push(c);
    }
    out.push(close);
    out
}
