use crate::query::PostOp;
use crate::results::{CustomDbRow, ExecutionResult};
use crate::types::RowValues;

/// What a query hands back to the caller after method-specific post-processing.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    /// A transaction-control statement answered locally without contacting the gateway.
    Skipped,
    /// Rows of a SELECT, or the returned records of a statement with `RETURNING`.
    Rows(Vec<CustomDbRow>),
    /// The first row of a SELECT, if any.
    Row(Option<CustomDbRow>),
    /// One field projected across all rows, in row order.
    Plucked(Vec<RowValues>),
    /// Affected-row count of an UPDATE or DELETE.
    Count(usize),
    /// Anything else: the normalized result as is.
    Result(ExecutionResult),
}

impl QueryResponse {
    /// Rows carried by `Rows`, `Row` or `Result`.
    #[must_use]
    pub fn rows(&self) -> Option<&[CustomDbRow]> {
        match self {
            QueryResponse::Rows(rows) => Some(rows),
            QueryResponse::Row(row) => Some(row.as_slice()),
            QueryResponse::Result(result) => Some(&result.rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn count(&self) -> Option<usize> {
        if let QueryResponse::Count(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, QueryResponse::Skipped)
    }
}

/// Shape a normalized result for the caller.
///
/// SELECT results honour `first` and `pluck`; otherwise a requested `RETURNING` yields the
/// rows unchanged, UPDATE and DELETE yield their row count, and everything else is passed
/// through.
#[must_use]
pub fn post_process(
    result: ExecutionResult,
    post_op: Option<&PostOp>,
    returning: bool,
) -> QueryResponse {
    if result.command == "SELECT" {
        return match post_op {
            Some(PostOp::First) => QueryResponse::Row(result.rows.into_iter().next()),
            Some(PostOp::Pluck(field)) => QueryResponse::Plucked(
                result
                    .rows
                    .iter()
                    .map(|row| row.get(field).cloned().unwrap_or(RowValues::Null))
                    .collect(),
            ),
            None => QueryResponse::Rows(result.rows),
        };
    }
    if returning {
        return QueryResponse::Rows(result.rows);
    }
    match result.command.as_str() {
        "UPDATE" | "DELETE" => QueryResponse::Count(result.row_count),
        _ => QueryResponse::Result(result),
    }
}
