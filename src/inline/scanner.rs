use super::parsers::{
    is_block_comment_end, is_block_comment_start, is_ident_byte, is_line_comment_start,
    matches_tag, opens_escape_string, try_start_dollar_quote,
};
use crate::error::SqlMiddlewareHttpError;

#[derive(Clone)]
enum State {
    Normal,
    /// `true` when a backslash escapes the following byte.
    SingleQuoted(bool),
    DoubleQuoted,
    Backticked,
    LineComment,
    BlockComment(u32),
    DollarQuoted(String),
}

/// A binding site found in SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlaceholderKind {
    /// `?`: the next positional binding as a literal.
    Positional,
    /// `??`: the next positional binding as an identifier.
    Identifier,
    /// `?N` / `$N`: a 1-based numbered binding.
    Numbered(usize),
    /// `\?`: a literal question mark.
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placeholder {
    pub start: usize,
    pub end: usize,
    pub kind: PlaceholderKind,
}

pub(super) fn scan_digits(bytes: &[u8], start: usize) -> Option<(usize, &str)> {
    let mut idx = start;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx == start {
        None
    } else {
        std::str::from_utf8(&bytes[start..idx])
            .ok()
            .map(|digits| (idx, digits))
    }
}

fn numbered(
    bytes: &[u8],
    start: usize,
    digits_from: usize,
) -> Result<Option<Placeholder>, SqlMiddlewareHttpError> {
    let Some((end, digits)) = scan_digits(bytes, digits_from) else {
        return Ok(None);
    };
    let n = digits.parse().map_err(|_| {
        SqlMiddlewareHttpError::ParameterError(format!("placeholder number {digits} is too large"))
    })?;
    Ok(Some(Placeholder {
        start,
        end,
        kind: PlaceholderKind::Numbered(n),
    }))
}

/// Find every placeholder outside string literals, quoted identifiers, comments and
/// dollar-quoted blocks.
///
/// `backslash_escapes` makes a backslash escape the next byte inside quoted strings, as in
/// MySQL. `E'...'` strings always escape with backslashes.
///
/// # Errors
/// Returns `SqlMiddlewareHttpError::ParameterError` for a numbered placeholder that does not
/// fit in `usize`.
pub(crate) fn scan_placeholders(
    sql: &str,
    backslash_escapes: bool,
) -> Result<Vec<Placeholder>, SqlMiddlewareHttpError> {
    let bytes = sql.as_bytes();
    let mut found = Vec::new();
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => {
                    state =
                        State::SingleQuoted(backslash_escapes || opens_escape_string(bytes, idx));
                }
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::Backticked,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => state = State::BlockComment(1),
                b'\\' if bytes.get(idx + 1) == Some(&b'?') => {
                    found.push(Placeholder {
                        start: idx,
                        end: idx + 2,
                        kind: PlaceholderKind::Escaped,
                    });
                    idx += 1;
                }
                // `$` inside a word is part of an identifier such as `a$b`
                b'$' if idx > 0 && is_ident_byte(bytes[idx - 1]) => {}
                b'$' => {
                    if let Some((tag, advance)) = try_start_dollar_quote(bytes, idx) {
                        state = State::DollarQuoted(tag);
                        idx = advance;
                    } else if let Some(ph) = numbered(bytes, idx, idx + 1)? {
                        idx = ph.end - 1;
                        found.push(ph);
                    }
                }
                b'?' => {
                    if bytes.get(idx + 1) == Some(&b'?') {
                        found.push(Placeholder {
                            start: idx,
                            end: idx + 2,
                            kind: PlaceholderKind::Identifier,
                        });
                        idx += 1;
                    } else if let Some(ph) = numbered(bytes, idx, idx + 1)? {
                        idx = ph.end - 1;
                        found.push(ph);
                    } else {
                        found.push(Placeholder {
                            start: idx,
                            end: idx + 1,
                            kind: PlaceholderKind::Positional,
                        });
                    }
                }
                _ => {}
            },
            State::SingleQuoted(escapes) => {
                if escapes && b == b'\\' {
                    idx += 1;
                } else if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if backslash_escapes && b == b'\\' {
                    idx += 1;
                } else if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Backticked => {
                if b == b'`' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if is_block_comment_end(bytes, idx) {
                    idx += 1;
                    if depth == 1 {
                        state = State::Normal;
                    } else {
                        state = State::BlockComment(depth - 1);
                    }
                }
            }
            State::DollarQuoted(ref tag) => {
                if b == b'$' && matches_tag(bytes, idx, tag) {
                    idx += tag.len() + 1;
                    state = State::Normal;
                }
            }
        }
        idx += 1;
    }

    Ok(found)
}
