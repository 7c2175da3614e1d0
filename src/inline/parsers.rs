pub(super) fn is_line_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'-')
}

pub(super) fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

pub(super) fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}

/// Recognize `$tag$` (or `$$`) starting at `start`; returns the tag and the index of the closing `$`.
pub(super) fn try_start_dollar_quote(bytes: &[u8], start: usize) -> Option<(String, usize)> {
    let mut idx = start + 1;
    while idx < bytes.len() && bytes[idx] != b'$' {
        let b = bytes[idx];
        if !(b.is_ascii_alphanumeric() || b == b'_') {
            return None;
        }
        idx += 1;
    }

    // `$1$` would otherwise look like a tag
    if bytes.get(start + 1).is_some_and(u8::is_ascii_digit) {
        return None;
    }

    if idx < bytes.len() && bytes[idx] == b'$' {
        let tag = String::from_utf8(bytes[start + 1..idx].to_vec()).ok()?;
        Some((tag, idx))
    } else {
        None
    }
}

pub(super) fn matches_tag(bytes: &[u8], idx: usize, tag: &str) -> bool {
    let end = idx + 1 + tag.len();
    end < bytes.len()
        && bytes[idx + 1..end].starts_with(tag.as_bytes())
        && bytes.get(end) == Some(&b'$')
}

/// Bytes that can continue an unquoted identifier, `$` included.
pub(super) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Whether the `'` at `idx` opens an `E'...'` escape string: a lone `E`/`e` prefix
/// that is not the tail of a longer word.
pub(super) fn opens_escape_string(bytes: &[u8], idx: usize) -> bool {
    if idx == 0 || !matches!(bytes[idx - 1], b'E' | b'e') {
        return false;
    }
    idx < 2 || !is_ident_byte(bytes[idx - 2])
}
