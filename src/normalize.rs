//! Media type normalization.
//!
//! Turns a raw Content-Type style value into a lowercased `main/sub` string
//! and a map of its parameters, per RFC 2045, RFC 2616 and RFC 2231.

use crate::error::{Error, Result};
use crate::grammar::{consume_token, is_tspecial};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::debug;

/// Parses a media type value and any optional parameters, per RFC 1521.
///
/// Media types are the values in Content-Type and Content-Disposition headers (RFC 2183).
/// Returns the media type converted to lowercase and a map of parameters.
/// Parameter names are lowercased; values are kept as written.
///
/// A bare token without a slash (such as the disposition `attachment`) is
/// accepted as a media type.
///
/// RFC 2231 continuations (`name*0`, `name*1`, ...) are joined and extended
/// values (`name*=utf-8''...`) are percent-decoded. Only the `utf-8` and
/// `us-ascii` charsets are understood; parameters in other charsets are
/// dropped.
///
/// # Examples
///
/// ```
/// use mediatype::parse_media_type;
///
/// let (media_type, params) = parse_media_type("Text/HTML; charset=utf-8").unwrap();
/// assert_eq!(media_type, "text/html");
/// assert_eq!(params.get("charset"), Some(&"utf-8".to_string()));
/// ```
pub fn parse_media_type(v: &str) -> Result<(String, HashMap<String, String>)> {
    normalize(v).map_err(|err| {
        debug!(raw = v, error = %err, "rejected media type");
        err
    })
}

fn normalize(v: &str) -> Result<(String, HashMap<String, String>)> {
    let (base, _) = v.split_once(';').unwrap_or((v, ""));
    let mediatype = base.trim().to_lowercase();
    check_media_type(&mediatype)?;

    let mut params = HashMap::new();
    // Parameters with a '*' in their name, grouped by the name before it
    let mut continuation: HashMap<String, HashMap<String, String>> = HashMap::new();

    let mut rest = &v[base.len()..];
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let Some((key, value, tail)) = consume_media_param(rest) else {
            if rest.trim() == ";" {
                // Trailing semicolon
                break;
            }
            return Err(Error::InvalidMediaParameter);
        };

        let pmap = match key.split_once('*') {
            Some((base_name, _)) => continuation.entry(base_name.to_string()).or_default(),
            None => &mut params,
        };
        if let Some(existing) = pmap.get(&key) {
            if *existing != value {
                return Err(Error::DuplicateParameter(key));
            }
        }
        pmap.insert(key, value);
        rest = tail;
    }

    for (key, pieces) in continuation {
        if let Some(v) = pieces.get(&format!("{key}*")) {
            if let Some(decoded) = decode_rfc2231(v) {
                params.insert(key, decoded);
            }
            continue;
        }

        let mut buf = String::new();
        let mut valid = false;
        for n in 0usize.. {
            let simple_part = format!("{key}*{n}");
            if let Some(v) = pieces.get(&simple_part) {
                valid = true;
                buf.push_str(v);
                continue;
            }

            let Some(v) = pieces.get(&format!("{simple_part}*")) else {
                break;
            };
            valid = true;
            // Only the first piece carries the charset'language' prefix
            let decoded = if n == 0 {
                decode_rfc2231(v)
            } else {
                percent_unescape(v)
            };
            if let Some(decoded) = decoded {
                buf.push_str(&decoded);
            }
        }

        if valid {
            params.insert(key, buf);
        }
    }

    Ok((mediatype, params))
}

/// Checks a lowercased type of the form `token` or `token/token`.
fn check_media_type(s: &str) -> Result<()> {
    let (typ, rest) = consume_token(s);
    if typ.is_empty() {
        return Err(Error::MediaType("no media type".to_string()));
    }
    if rest.is_empty() {
        return Ok(());
    }

    let Some(rest) = rest.strip_prefix('/') else {
        return Err(Error::MediaType("expected slash after first token".to_string()));
    };
    let (subtype, rest) = consume_token(rest);
    if subtype.is_empty() {
        return Err(Error::MediaType("expected token after slash".to_string()));
    }
    if !rest.is_empty() {
        return Err(Error::MediaType("unexpected content after media subtype".to_string()));
    }
    Ok(())
}

/// Consumes one `; name=value` pair from the front of `v`.
fn consume_media_param(v: &str) -> Option<(String, String, &str)> {
    let rest = v.trim_start().strip_prefix(';')?.trim_start();
    let (param, rest) = consume_token(rest);
    if param.is_empty() {
        return None;
    }

    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let (value, rest) = consume_value(rest)?;
    Some((param.to_lowercase(), value, rest))
}

/// Consumes a token or a quoted-string from the front of `v`.
fn consume_value(v: &str) -> Option<(String, &str)> {
    let Some(quoted) = v.strip_prefix('"') else {
        let (token, rest) = consume_token(v);
        return (!token.is_empty()).then(|| (token.to_string(), rest));
    };

    let mut buffer = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((buffer, &quoted[i + 1..])),
            // Unescaped backslashes (e.g. Windows paths) are kept literally
            '\\' => match quoted[i + 1..].chars().next() {
                Some(next) if is_tspecial(next) => {
                    buffer.push(next);
                    chars.next();
                }
                _ => buffer.push(c),
            },
            '\r' | '\n' => return None,
            _ => buffer.push(c),
        }
    }

    // No closing quote
    None
}

/// Decodes an RFC 2231 extended value of the form `charset'language'value`.
fn decode_rfc2231(v: &str) -> Option<String> {
    let mut parts = v.splitn(3, '\'');
    let (Some(charset), Some(_language), Some(encoded)) = (parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let charset = charset.to_ascii_lowercase();
    if charset != "us-ascii" && charset != "utf-8" {
        return None;
    }
    percent_unescape(encoded)
}

/// Percent-decodes `s`, rejecting escapes without two hex digits and
/// output that is not UTF-8.
fn percent_unescape(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }

    urlencoding::decode(s).ok().map(Cow::into_owned)
}
