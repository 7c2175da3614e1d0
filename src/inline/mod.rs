use std::borrow::Cow;

mod parsers;
mod scanner;

pub(crate) use scanner::{Placeholder, PlaceholderKind, scan_placeholders};

use crate::dialect::SqlDialect;
use crate::error::SqlMiddlewareHttpError;
use crate::types::RowValues;

/// Substitute every placeholder in `sql` with the literal rendering of its binding.
///
/// Recognized forms (outside strings, quoted identifiers, comments and dollar-quoted blocks):
/// `?` takes the next binding, `??` takes the next binding as an identifier, `?N`/`$N` take the
/// N-th binding (1-based), and `\?` is emitted as a bare `?`. Positional and numbered forms cannot
/// be mixed, and every binding must be consumed.
///
/// ```rust
/// use sql_middleware_http::prelude::*;
///
/// let sql = inline_bindings(
///     "insert into ?? (name) values (?)",
///     &[RowValues::Text("test".into()), RowValues::Text("O'Brien".into())],
///     DialectKind::Postgres.strategy(),
/// )?;
/// assert_eq!(sql, r#"insert into "test" (name) values ('O''Brien')"#);
/// # Ok::<(), SqlMiddlewareHttpError>(())
/// ```
/// Returns a borrowed `Cow` when the text has nothing to substitute.
///
/// # Errors
/// Returns `SqlMiddlewareHttpError::ParameterError` when the placeholder count does not match
/// the bindings, forms are mixed, a placeholder number overflows, an identifier binding is not
/// text, or a value has no literal form.
pub fn inline_bindings<'a>(
    sql: &'a str,
    bindings: &[RowValues],
    dialect: &dyn SqlDialect,
) -> Result<Cow<'a, str>, SqlMiddlewareHttpError> {
    let placeholders = scan_placeholders(sql, dialect.backslash_escapes())?;
    if placeholders.is_empty() {
        if !bindings.is_empty() {
            return Err(SqlMiddlewareHttpError::ParameterError(format!(
                "Expected 0 bindings, saw {}",
                bindings.len()
            )));
        }
        return Ok(Cow::Borrowed(sql));
    }

    check_arity(&placeholders, bindings.len())?;

    let mut out = String::with_capacity(sql.len() + bindings.len() * 8);
    let mut copied = 0;
    let mut next_positional = 0;

    for ph in &placeholders {
        out.push_str(&sql[copied..ph.start]);
        copied = ph.end;
        match ph.kind {
            PlaceholderKind::Escaped => out.push('?'),
            PlaceholderKind::Positional => {
                out.push_str(&dialect.render_literal(&bindings[next_positional])?);
                next_positional += 1;
            }
            PlaceholderKind::Identifier => {
                out.push_str(&render_identifier(dialect, &bindings[next_positional])?);
                next_positional += 1;
            }
            PlaceholderKind::Numbered(n) => {
                out.push_str(&dialect.render_literal(&bindings[n - 1])?);
            }
        }
    }
    out.push_str(&sql[copied..]);

    Ok(Cow::Owned(out))
}

fn render_identifier(
    dialect: &dyn SqlDialect,
    value: &RowValues,
) -> Result<String, SqlMiddlewareHttpError> {
    match value {
        RowValues::Text(ident) => Ok(dialect.quote_identifier(ident)),
        other => Err(SqlMiddlewareHttpError::ParameterError(format!(
            "identifier binding must be text, got {other:?}"
        ))),
    }
}

fn check_arity(placeholders: &[Placeholder], supplied: usize) -> Result<(), SqlMiddlewareHttpError> {
    let positional = placeholders
        .iter()
        .filter(|p| {
            matches!(
                p.kind,
                PlaceholderKind::Positional | PlaceholderKind::Identifier
            )
        })
        .count();
    let numbered: Vec<usize> = placeholders
        .iter()
        .filter_map(|p| match p.kind {
            PlaceholderKind::Numbered(n) => Some(n),
            _ => None,
        })
        .collect();

    if positional > 0 && !numbered.is_empty() {
        return Err(SqlMiddlewareHttpError::ParameterError(
            "cannot mix positional `?` and numbered placeholders in one statement".to_string(),
        ));
    }

    if numbered.is_empty() {
        if positional != supplied {
            return Err(SqlMiddlewareHttpError::ParameterError(format!(
                "Expected {positional} bindings, saw {supplied}"
            )));
        }
        return Ok(());
    }

    let mut used = vec![false; supplied];
    for n in numbered {
        if n == 0 || n > supplied {
            return Err(SqlMiddlewareHttpError::ParameterError(format!(
                "placeholder {n} is out of range for {supplied} bindings"
            )));
        }
        used[n - 1] = true;
    }
    if let Some(unused) = used.iter().position(|u| !u) {
        return Err(SqlMiddlewareHttpError::ParameterError(format!(
            "binding {} is never referenced",
            unused + 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectKind;

    fn pg() -> &'static dyn SqlDialect {
        DialectKind::Postgres.strategy()
    }

    #[test]
    fn inlines_positional_bindings() {
        let sql = inline_bindings(
            "select * from t where a = ? and b = ? and c = ? and d is ?",
            &[
                RowValues::Int(1),
                RowValues::Text("x".into()),
                RowValues::Bool(false),
                RowValues::Null,
            ],
            pg(),
        )
        .unwrap();
        assert_eq!(
            sql,
            "select * from t where a = 1 and b = 'x' and c = false and d is NULL"
        );
        assert!(scan_placeholders(&sql, false).unwrap().is_empty());
    }

    #[test]
    fn inlines_numbered_bindings_with_reuse() {
        let sql = inline_bindings(
            "update t set a = $2 where id = $1 or parent = $1",
            &[RowValues::Int(5), RowValues::Text("v".into())],
            pg(),
        )
        .unwrap();
        assert_eq!(sql, "update t set a = 'v' where id = 5 or parent = 5");
    }

    #[test]
    fn leaves_quoted_question_marks_and_unescapes() {
        let sql = inline_bindings(
            "select '?' as q, data \\? 'k' from t where id = ?",
            &[RowValues::Int(3)],
            pg(),
        )
        .unwrap();
        assert_eq!(sql, "select '?' as q, data ? 'k' from t where id = 3");
    }

    #[test]
    fn borrows_when_nothing_to_do() {
        let sql = inline_bindings("select 1", &[], pg()).unwrap();
        assert!(matches!(sql, Cow::Borrowed(_)));
    }

    #[test]
    fn preserves_multibyte_text() {
        let sql = inline_bindings("select 'héllo', ?", &[RowValues::Text("ü".into())], pg())
            .unwrap();
        assert_eq!(sql, "select 'héllo', 'ü'");
    }

    #[test]
    fn rejects_count_mismatch() {
        for (sql, params) in [
            ("select ?", vec![]),
            ("select ?", vec![RowValues::Int(1), RowValues::Int(2)]),
            ("select 1", vec![RowValues::Int(1)]),
            ("select $2", vec![RowValues::Int(1)]),
            ("select $2", vec![RowValues::Int(1), RowValues::Int(2)]),
            ("select ?, $1", vec![RowValues::Int(1)]),
        ] {
            let err = inline_bindings(sql, &params, pg()).unwrap_err();
            assert!(
                matches!(err, SqlMiddlewareHttpError::ParameterError(_)),
                "{sql}"
            );
        }
    }

    #[test]
    fn identifier_binding_must_be_text() {
        let err = inline_bindings("select ??", &[RowValues::Int(1)], pg()).unwrap_err();
        assert!(matches!(err, SqlMiddlewareHttpError::ParameterError(_)));
    }

    #[test]
    fn uses_dialect_quoting() {
        let sql = inline_bindings(
            "select ?? from t where a = ?",
            &[RowValues::Text("name".into()), RowValues::Text("it's".into())],
            DialectKind::MySql.strategy(),
        )
        .unwrap();
        assert_eq!(sql, r"select `name` from t where a = 'it\'s'");
    }

    #[test]
    fn mysql_double_quoted_backslash_keeps_binding_outside() {
        let sql = inline_bindings(
            r#"select "a\"?" as x, ?"#,
            &[RowValues::Int(1)],
            DialectKind::MySql.strategy(),
        )
        .unwrap();
        assert_eq!(sql, r#"select "a\"?" as x, 1"#);
    }

    #[test]
    fn postgres_escape_strings_and_dollar_identifiers() {
        let sql = inline_bindings(r"select E'it\'s', ?", &[RowValues::Int(1)], pg()).unwrap();
        assert_eq!(sql, r"select E'it\'s', 1");

        let sql = inline_bindings(
            "select a$b$c from t where id = ?",
            &[RowValues::Int(7)],
            pg(),
        )
        .unwrap();
        assert_eq!(sql, "select a$b$c from t where id = 7");
    }

    #[test]
    fn oversized_placeholder_number_is_rejected() {
        let err = inline_bindings("select $99999999999999999999999", &[], pg()).unwrap_err();
        assert!(matches!(err, SqlMiddlewareHttpError::ParameterError(_)));
    }
}
