use super::{DialectKind, SqlDialect, hex_lower, wrap_doubling};

/// MySQL literal rules: backslash escapes inside single quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl SqlDialect for MySql {
    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn quote_string(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\u{8}' => out.push_str("\\b"),
                '\t' => out.push_str("\\t"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\u{1a}' => out.push_str("\\Z"),
                '"' => out.push_str("\\\""),
                '\'' => out.push_str("\\'"),
                '\\' => out.push_str("\\\\"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn render_blob(&self, bytes: &[u8]) -> String {
        format!("X'{}'", hex_lower(bytes))
    }

    fn quote_identifier_part(&self, part: &str) -> String {
        wrap_doubling(part, "`", '`')
    }

    fn backslash_escapes(&self) -> bool {
        true
    }
}
