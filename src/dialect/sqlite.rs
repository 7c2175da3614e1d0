use super::{DialectKind, SqlDialect, hex_lower, wrap_doubling};

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
    }

    fn quote_string(&self, value: &str) -> String {
        wrap_doubling(value, "'", '\'')
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn render_blob(&self, bytes: &[u8]) -> String {
        format!("X'{}'", hex_lower(bytes))
    }

    fn quote_identifier_part(&self, part: &str) -> String {
        wrap_doubling(part, "\"", '"')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowValues;

    #[test]
    fn renders_sqlite_literals() {
        assert_eq!(Sqlite.render_literal(&RowValues::Bool(false)).unwrap(), "0");
        assert_eq!(Sqlite.quote_string(r"back\slash 'q'"), r"'back\slash ''q'''");
        assert_eq!(Sqlite.render_literal(&RowValues::Blob(vec![1, 255])).unwrap(), "X'01ff'");
    }
}
