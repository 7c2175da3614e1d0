use super::{DialectKind, SqlDialect, hex_lower, wrap_doubling};

/// SQL Server literal rules: unicode `N'..'` strings, `[..]` identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mssql;

impl SqlDialect for Mssql {
    fn kind(&self) -> DialectKind {
        DialectKind::Mssql
    }

    fn quote_string(&self, value: &str) -> String {
        wrap_doubling(value, "N'", '\'')
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn render_blob(&self, bytes: &[u8]) -> String {
        format!("0x{}", hex_lower(bytes).to_uppercase())
    }

    fn quote_identifier_part(&self, part: &str) -> String {
        wrap_doubling(part, "[", ']')
    }
}
