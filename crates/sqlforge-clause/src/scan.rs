//! Dedicated scans over SQL text.

use crate::error::Result;
use crate::tokenizer::ClauseTokenizer;

/// Removes `end_delimiter` from the end of `text`.
///
/// Trailing whitespace is trimmed before the match, and `\r`/`\n` escape
/// sequences in the delimiter literal are translated to the real
/// characters, so a delimiter written as `"\n"` matches a trailing
/// newline. When the delimiter does not match, the input is returned
/// unchanged, trailing whitespace included.
#[must_use]
pub fn strip_trailing_delimiter(text: &str, end_delimiter: &str) -> String {
    let delimiter = end_delimiter.replace("\\r", "\r").replace("\\n", "\n");
    if delimiter.is_empty() {
        return text.to_string();
    }
    // Walk back over the trailing whitespace run, testing for the
    // delimiter at each boundary: a delimiter that is itself whitespace
    // would otherwise be destroyed by the trim.
    let mut end = text.len();
    loop {
        if text[..end].ends_with(&delimiter) {
            return text[..end - delimiter.len()].to_string();
        }
        match text[..end].chars().next_back() {
            Some(c) if c.is_whitespace() => end -= c.len_utf8(),
            _ => return text.to_string(),
        }
    }
}

/// Returns true when `keyword` occurs as a bare word in `text`.
///
/// Only significant tokens are scanned, so occurrences inside whitespace
/// runs, comments, or string literals never match.
///
/// # Errors
///
/// Returns [`crate::ClauseError`] when `text` is not tokenizable.
pub fn contains_bare_keyword(text: &str, keyword: &str) -> Result<bool> {
    let tokens = ClauseTokenizer::new(text).tokenize()?;
    Ok(tokens.iter().any(|token| token.is_word(keyword)))
}
