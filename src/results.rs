mod execution;
mod row;

pub use execution::{ExecutionResult, FieldDescriptor, ResultShape};
pub use row::CustomDbRow;
pub(crate) use row::index_columns;
