use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// A row from a gateway query result
///
/// Column names are shared across every row of a result; values are stored in column
/// order so the row reads both as an ordered record and as a name-to-value mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomDbRow {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, one per column
    pub rows: Vec<RowValues>,
    column_index_cache: Arc<HashMap<String, usize>>,
}

impl CustomDbRow {
    /// Create a new row, building its own name lookup.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        let cache = Arc::new(index_columns(&column_names));
        Self::with_index(column_names, rows, cache)
    }

    /// Create a row that reuses a lookup already built for its column names.
    ///
    /// The value list is padded with `Null` or truncated to the column count.
    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        mut rows: Vec<RowValues>,
        column_index_cache: Arc<HashMap<String, usize>>,
    ) -> Self {
        rows.resize(column_names.len(), RowValues::Null);
        Self {
            column_names,
            rows,
            column_index_cache,
        }
    }

    /// Get the index of a column by name
    ///
    /// With duplicate column names the last one wins, as it would in a mapping.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.rows.iter())
    }

    /// Number of entries in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub(crate) fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(cols: &[&str]) -> Arc<Vec<String>> {
        Arc::new(cols.iter().map(|c| (*c).to_string()).collect())
    }

    #[test]
    fn pads_short_rows_and_truncates_long_ones() {
        let short = CustomDbRow::new(names(&["a", "b"]), vec![RowValues::Int(1)]);
        assert_eq!(short.get("b"), Some(&RowValues::Null));
        assert_eq!(short.len(), 2);

        let long = CustomDbRow::new(
            names(&["a"]),
            vec![RowValues::Int(1), RowValues::Int(2)],
        );
        assert_eq!(long.rows, vec![RowValues::Int(1)]);
    }

    #[test]
    fn duplicate_columns_resolve_to_last() {
        let row = CustomDbRow::new(
            names(&["id", "id"]),
            vec![RowValues::Int(1), RowValues::Int(2)],
        );
        assert_eq!(row.get("id"), Some(&RowValues::Int(2)));
        assert_eq!(row.get_by_index(0), Some(&RowValues::Int(1)));
        assert_eq!(row.iter().count(), 2);
    }
}
