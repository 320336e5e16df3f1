//! Cookie Set parsing: raw `Cookie` header strings and browser-exported
//! cookie files.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Cookie name -> value. Ordered so the serialized header is stable.
pub type CookieSet = BTreeMap<String, String>;

/// Parses a raw header string of the form `name=value; name2=value2`.
/// Fragments without `=` are skipped.
pub fn parse_cookie_header(header: &str) -> CookieSet {
    let mut cookies = CookieSet::new();
    for part in header.split(';') {
        if let Some((name, value)) = part.split_once('=') {
            cookies.insert(name.trim().to_string(), value.trim().to_string());
        }
    }
    cookies
}

/// Loads cookies from a file in either supported on-disk format:
/// a single-line header form, or tab-separated export rows where the
/// 6th and 7th fields are name and value. A missing or unreadable file
/// yields an empty set; cookies are an optional credential.
pub fn load_cookie_file(path: &Path) -> CookieSet {
    let Ok(bytes) = std::fs::read(path) else {
        debug!("Cookie file not readable: {}", path.display());
        return CookieSet::new();
    };
    let text = String::from_utf8_lossy(&bytes);
    let text = text.trim();

    if !text.contains('\n') && text.contains('=') && text.contains(';') {
        return parse_cookie_header(text);
    }

    let mut cookies = CookieSet::new();
    for line in text.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() >= 7 {
            cookies.insert(fields[5].to_string(), fields[6].to_string());
        }
    }
    cookies
}

/// Merges the two optional credential inputs into one set. On a name
/// clash the file wins.
pub fn collect(header: Option<&str>, file: Option<&Path>) -> CookieSet {
    let mut cookies = CookieSet::new();
    if let Some(header) = header {
        cookies.extend(parse_cookie_header(header));
    }
    if let Some(path) = file {
        cookies.extend(load_cookie_file(path));
    }
    if !cookies.is_empty() {
        debug!("Loaded {} cookie(s)", cookies.len());
    }
    cookies
}

/// Serializes a set into `Cookie` header form, or `None` when empty.
pub fn to_header(cookies: &CookieSet) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; "),
    )
}
