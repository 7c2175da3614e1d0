use super::{DialectKind, SqlDialect, hex_lower, wrap_doubling};
use crate::error::SqlMiddlewareHttpError;

/// Postgres literal rules.
///
/// Strings holding a backslash switch to the `E'..'` escape form so the output does not
/// depend on `standard_conforming_strings`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn kind(&self) -> DialectKind {
        DialectKind::Postgres
    }

    fn quote_string(&self, value: &str) -> String {
        if value.contains('\\') {
            let mut out = String::with_capacity(value.len() + 4);
            out.push_str("E'");
            for c in value.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("''"),
                    _ => out.push(c),
                }
            }
            out.push('\'');
            out
        } else {
            wrap_doubling(value, "'", '\'')
        }
    }

    fn render_bool(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn render_blob(&self, bytes: &[u8]) -> String {
        format!("'\\x{}'", hex_lower(bytes))
    }

    fn quote_identifier_part(&self, part: &str) -> String {
        wrap_doubling(part, "\"", '"')
    }

    fn render_float(&self, value: f64) -> Result<String, SqlMiddlewareHttpError> {
        Ok(if value.is_nan() {
            "'NaN'".to_string()
        } else if value.is_infinite() {
            (if value > 0.0 { "'Infinity'" } else { "'-Infinity'" }).to_string()
        } else {
            value.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowValues;
    use chrono::NaiveDate;

    #[test]
    fn renders_scalars() {
        let pg = Postgres;
        assert_eq!(pg.render_literal(&RowValues::Null).unwrap(), "NULL");
        assert_eq!(pg.render_literal(&RowValues::Int(-3)).unwrap(), "-3");
        assert_eq!(pg.render_literal(&RowValues::Float(1.5)).unwrap(), "1.5");
        assert_eq!(pg.render_literal(&RowValues::Bool(true)).unwrap(), "true");
        assert_eq!(pg.render_literal(&RowValues::Float(f64::NAN)).unwrap(), "'NaN'");
        assert_eq!(
            pg.render_literal(&RowValues::Float(f64::NEG_INFINITY)).unwrap(),
            "'-Infinity'"
        );
    }

    #[test]
    fn escapes_strings() {
        let pg = Postgres;
        assert_eq!(pg.quote_string("O'Brien"), "'O''Brien'");
        assert_eq!(pg.quote_string(r"C:\tmp"), r"E'C:\\tmp'");
        assert_eq!(pg.quote_string(r"it's \n"), r"E'it''s \\n'");
    }

    #[test]
    fn renders_blob_json_and_timestamp() {
        let pg = Postgres;
        assert_eq!(
            pg.render_literal(&RowValues::Blob(vec![0xde, 0xad])).unwrap(),
            r"'\xdead'"
        );
        assert_eq!(
            pg.render_literal(&RowValues::JSON(serde_json::json!({"k": "v"})))
                .unwrap(),
            r#"'{"k":"v"}'"#
        );
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(
            pg.render_literal(&RowValues::Timestamp(dt)).unwrap(),
            "'2024-01-02 03:04:05'"
        );
    }
}
