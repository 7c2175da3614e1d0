use crate::query::RawQuery;

/// Statement prefixes that open, close or mark a transaction.
///
/// The gateway runs each request in isolation, so these are never sent: transactions are not
/// atomic under this client.
pub const TRANSACTION_COMMANDS: [&str; 5] = [
    "BEGIN;",
    "COMMIT;",
    "ROLLBACK",
    "SAVEPOINT",
    "RELEASE SAVEPOINT",
];

/// Whether `sql` starts with a transaction-control prefix (exact, case-sensitive).
#[must_use]
pub fn is_transaction_command(sql: &str) -> bool {
    TRANSACTION_COMMANDS
        .iter()
        .any(|prefix| sql.starts_with(prefix))
}

/// Whether `query` must be answered locally as a no-op instead of reaching the gateway.
///
/// Only statements without a declared method qualify; the query builder issues transaction
/// control that way.
#[must_use]
pub fn is_skipped(query: &RawQuery) -> bool {
    if query.method().is_none() && is_transaction_command(query.sql()) {
        tracing::trace!(sql = query.sql(), "skipping transaction command");
        true
    } else {
        false
    }
}
