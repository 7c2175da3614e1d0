use crate::dialect::SqlDialect;
use crate::error::SqlMiddlewareHttpError;
use crate::inline::inline_bindings;
use crate::query::RawQuery;

/// Render every binding of `query` into its SQL text.
///
/// The returned descriptor carries the flattened SQL and an empty binding list; the gateway
/// only accepts literal SQL.
///
/// # Errors
/// Returns `SqlMiddlewareHttpError::ParameterError` if the bindings do not fit the placeholders.
pub fn inline_query(
    query: RawQuery,
    dialect: &dyn SqlDialect,
) -> Result<RawQuery, SqlMiddlewareHttpError> {
    let sql = inline_bindings(query.sql(), query.bound_values(), dialect)?.into_owned();
    Ok(query.into_inlined(sql))
}
