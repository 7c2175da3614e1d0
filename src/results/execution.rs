use super::row::CustomDbRow;

/// Column descriptor in the order reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    /// 1-based column position.
    pub column_id: usize,
}

/// How the gateway payload was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// A header row followed by data rows.
    Rows,
    /// `result` was null: a command with no data payload.
    Empty,
    /// `result` had an unexpected shape and was replaced by an empty result.
    Degraded,
}

/// Normalized outcome of one gateway call.
///
/// Built fresh for every response. `row_count` always equals `rows.len()`, and each row has
/// exactly one value per entry in `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// `SELECT`, `INSERT`, ... as declared by the query, or inferred from the SQL.
    pub command: String,
    pub row_count: usize,
    pub rows: Vec<CustomDbRow>,
    pub fields: Vec<FieldDescriptor>,
    pub shape: ResultShape,
}

impl ExecutionResult {
    /// Result carrying no rows and no fields.
    #[must_use]
    pub fn empty(command: String, shape: ResultShape) -> Self {
        Self {
            command,
            row_count: 0,
            rows: Vec::new(),
            fields: Vec::new(),
            shape,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.shape == ResultShape::Degraded
    }

    /// Column names in gateway order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
