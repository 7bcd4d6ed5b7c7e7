//! Position-advancing probes over raw SQL text.
//!
//! Text-based checks walk the document byte by byte. These helpers let them
//! step over string literals and comments so that quotes or comment markers
//! inside those regions are never mistaken for code:
//!
//! ```
//! use sql_lint_core::scanner::{skip_comment, skip_string};
//!
//! let text = br#"A "st'r'ing" /* x */"#;
//! let mut pos = 2;
//! assert!(skip_string(text, &mut pos));
//! assert_eq!(pos, 11);
//!
//! let mut pos = 13;
//! assert!(skip_comment(text, &mut pos, b'\n', true));
//! assert_eq!(pos, 19);
//! ```
//!
//! Every probe is anchored at the first character of the construct, never
//! moves backward, and never moves past the end of the text.

/// Skips a quoted string starting at `pos`.
///
/// If `text[pos]` is `'` or `"`, advances `pos` to the matching closing quote
/// (a quote preceded by an odd number of backslashes is escaped) or to the
/// last byte if the string is unterminated, and returns true. Otherwise
/// leaves `pos` unchanged and returns false.
pub fn skip_string(text: &[u8], pos: &mut usize) -> bool {
    let Some(&quote) = text.get(*pos) else {
        return false;
    };
    if quote != b'\'' && quote != b'"' {
        return false;
    }

    let mut backslashes = 0usize;
    for (i, &b) in text.iter().enumerate().skip(*pos + 1) {
        if b == quote && backslashes % 2 == 0 {
            *pos = i;
            return true;
        }
        if b == b'\\' {
            backslashes += 1;
        } else {
            backslashes = 0;
        }
    }
    *pos = text.len() - 1;
    true
}

/// Returns true if a single-line comment marker (`--`, `//` or `#`) starts at
/// `pos`.
#[must_use]
pub fn is_line_comment_start(text: &[u8], pos: usize) -> bool {
    matches!(
        (text.get(pos), text.get(pos + 1)),
        (Some(b'-'), Some(b'-')) | (Some(b'/'), Some(b'/')) | (Some(b'#'), _)
    )
}

/// Skips a comment starting at `pos`.
///
/// A `/* ... */` comment is always recognized: `pos` lands on the closing
/// `/`, or on the last byte if the comment is unterminated. When
/// `allow_single_line` is set, `--`, `//` and `#` comments are recognized
/// too and `pos` lands on the next `delimiter` (not past it), or at
/// `text.len()` when the comment runs to the end.
pub fn skip_comment(text: &[u8], pos: &mut usize, delimiter: u8, allow_single_line: bool) -> bool {
    let start = *pos;
    if text.get(start) == Some(&b'/') && text.get(start + 1) == Some(&b'*') {
        *pos = text
            .windows(2)
            .enumerate()
            .skip(start + 2)
            .find(|(_, pair)| *pair == b"*/")
            .map_or(text.len() - 1, |(i, _)| i + 1);
        return true;
    }

    if allow_single_line && is_line_comment_start(text, start) {
        *pos = text[start..]
            .iter()
            .position(|&b| b == delimiter)
            .map_or(text.len(), |offset| start + offset);
        return true;
    }

    false
}

/// Returns true for the bytes treated as blank between tokens.
#[must_use]
pub const fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n')
}

/// Advances `pos` past spaces, tabs and newlines.
///
/// Returns true if the end of the text was reached.
pub fn skip_spaces_forward(text: &[u8], pos: &mut usize) -> bool {
    while *pos < text.len() && is_blank(text[*pos]) {
        *pos += 1;
    }
    *pos >= text.len()
}

/// Finds the last non-blank byte at or before `pos`.
///
/// Returns `None` if everything from the start of the text up to `pos` is
/// blank.
#[must_use]
pub fn skip_spaces_backward(text: &[u8], pos: usize) -> Option<usize> {
    let end = pos.checked_add(1)?.min(text.len());
    text[..end].iter().rposition(|&b| !is_blank(b))
}

/// Reads the next word starting at `pos`.
///
/// Leading spaces and tabs are skipped. The word ends at a space, tab,
/// newline, `;`, `(` or `,`, where `pos` is left.
pub fn next_word<'a>(text: &'a str, pos: &mut usize) -> &'a str {
    let bytes = text.as_bytes();
    while *pos < bytes.len() && matches!(bytes[*pos], b' ' | b'\t') {
        *pos += 1;
    }
    let start = *pos;
    while *pos < bytes.len() && !matches!(bytes[*pos], b' ' | b'\t' | b'\n' | b';' | b'(' | b',')
    {
        *pos += 1;
    }
    text.get(start..*pos).unwrap_or("")
}
