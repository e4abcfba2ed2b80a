//! Token grammar for media types.
//!
//! Based on RFC 1521 and RFC 2045 token definitions.

/// Reports whether the character is in 'tspecials' as defined by RFC 1521 and RFC 2045.
///
/// tspecials := "(" / ")" / "<" / ">" / "@" / "," / ";" / ":" / "\" / <"> / "/" / "[" / "]" / "?" / "="
pub fn is_tspecial(c: char) -> bool {
    matches!(c, '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '=')
}

/// Reports whether the character is in 'token' as defined by RFC 1521 and RFC 2045.
///
/// token := 1*<any (US-ASCII) CHAR except SPACE, CTLs, or tspecials>
pub fn is_token_char(c: char) -> bool {
    c > '\x20' && c < '\x7f' && !is_tspecial(c)
}

/// Reports whether the string is a valid 'token'.
///
/// A token must be non-empty and contain only valid token characters.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Splits the longest leading token off `s`.
///
/// Returns the token (possibly empty) and the remaining input.
pub(crate) fn consume_token(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_token_char(c)).unwrap_or(s.len());
    s.split_at(end)
}
