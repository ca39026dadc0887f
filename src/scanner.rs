//! Quote-aware scanning helpers for tag headers.
//!
//! Attribute values may be wrapped in either `"` or `'`, and one style may
//! appear literally inside a value delimited by the other. Both helpers are
//! pure functions of their arguments and work on byte offsets; the quote
//! characters are ASCII, so every offset they produce is a char boundary.

use crate::error::{ParseError, Result, SyntaxError};

const QUOTES: [char; 2] = ['"', '\''];

/// Returns the offset and character of the first quote at or after `from`.
fn next_quote(text: &str, from: usize) -> Option<(usize, char)> {
    let rest = text.get(from..)?;
    let pos = rest.find(QUOTES)?;
    let quote = rest.get(pos..)?.chars().next()?;
    Some((from + pos, quote))
}

/// Reports whether the byte at `index` lies strictly between an opening
/// quote and its matching closer.
///
/// An unterminated quote counts as open through the end of the string.
pub fn is_inside_quote(text: &str, index: usize) -> bool {
    let mut cursor = 0;

    while let Some((open, quote)) = next_quote(text, cursor) {
        if open >= index {
            return false;
        }

        match text.get(open + 1..).and_then(|rest| rest.find(quote)) {
            Some(offset) => {
                let close = open + 1 + offset;
                if index < close {
                    return true;
                }
                cursor = close + 1;
            }
            None => return true,
        }
    }

    false
}

/// Offset of the first `target` that is not inside a quoted value.
///
/// A single forward pass; returns `None` when every occurrence is quoted,
/// including by a quote that is never closed.
pub fn find_unquoted(text: &str, target: char) -> Option<usize> {
    let mut open: Option<char> = None;

    for (index, c) in text.char_indices() {
        match open {
            Some(quote) if c == quote => open = None,
            Some(_) => {}
            None if c == target => return Some(index),
            None if QUOTES.contains(&c) => open = Some(c),
            None => {}
        }
    }

    None
}

/// Splits an attribute blob such as `a="1" b='x "y"'` into `(name, value)`
/// pairs.
///
/// Names are returned raw (still carrying whitespace and the `=`); values
/// are returned verbatim. Text after the last closing quote is ignored.
pub fn split_quoted_pairs(text: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let mut rest = text;

    while let Some((open, quote)) = next_quote(rest, 0) {
        let (name, tail) = rest.split_at(open);
        let after_open = tail.strip_prefix(quote).unwrap_or(tail);

        let Some(close) = after_open.find(quote) else {
            return Err(ParseError::syntax(SyntaxError::MalformedAttribute(
                rest.trim().to_string(),
            )));
        };

        let (value, after_close) = after_open.split_at(close);
        pairs.push((name.to_string(), value.to_string()));
        rest = after_close.strip_prefix(quote).unwrap_or(after_close);
    }

    Ok(pairs)
}
