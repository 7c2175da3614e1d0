use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::executor::RunSqlResponse;
use crate::results::{CustomDbRow, ExecutionResult, FieldDescriptor, ResultShape};
use crate::types::RowValues;

/// Build an `ExecutionResult` from a gateway reply.
///
/// A tabular payload is `[[col, ...], [v, ...], ...]`: the first row names the columns and each
/// following row holds values positionally. A null payload is a command without data. Anything
/// else is logged and replaced by an empty result marked [`ResultShape::Degraded`] instead of
/// failing the call.
#[must_use]
pub fn build_result_set(response: RunSqlResponse, command: String) -> ExecutionResult {
    match response.result {
        Some(JsonValue::Null) => ExecutionResult::empty(command, ResultShape::Empty),
        Some(JsonValue::Array(table)) => match tabulate(table) {
            Ok((fields, rows)) => ExecutionResult {
                command,
                row_count: rows.len(),
                rows,
                fields,
                shape: ResultShape::Rows,
            },
            Err(reason) => degrade(command, reason, None),
        },
        Some(other) => degrade(command, "result is neither null nor a table", Some(&other)),
        None => degrade(command, "response has no result", None),
    }
}

fn degrade(command: String, reason: &str, payload: Option<&JsonValue>) -> ExecutionResult {
    match payload {
        Some(result) => {
            tracing::warn!(%command, reason, %result, "degrading to an empty result");
        }
        None => tracing::warn!(%command, reason, "degrading to an empty result"),
    }
    ExecutionResult::empty(command, ResultShape::Degraded)
}

fn tabulate(
    mut table: Vec<JsonValue>,
) -> Result<(Vec<FieldDescriptor>, Vec<CustomDbRow>), &'static str> {
    if table.is_empty() {
        return Err("tabular result has no header row");
    }
    let JsonValue::Array(header) = table.remove(0) else {
        return Err("header row is not a list");
    };

    let column_names: Vec<String> = header
        .into_iter()
        .map(|name| match name {
            JsonValue::String(s) => s,
            other => other.to_string(),
        })
        .collect();
    let fields = column_names
        .iter()
        .enumerate()
        .map(|(i, name)| FieldDescriptor {
            name: name.clone(),
            column_id: i + 1,
        })
        .collect();

    let index = Arc::new(crate::results::index_columns(&column_names));
    let column_names = Arc::new(column_names);

    let mut rows = Vec::with_capacity(table.len());
    for row in table {
        let JsonValue::Array(values) = row else {
            return Err("data row is not a list");
        };
        rows.push(CustomDbRow::with_index(
            Arc::clone(&column_names),
            values.into_iter().map(RowValues::from_json).collect(),
            Arc::clone(&index),
        ));
    }

    Ok((fields, rows))
}
