//! Query-string helpers for the page address.
//!
//! Setting or removing the candle parameter must leave every other
//! parameter exactly as it was, so unrelated pairs are carried over as raw
//! text and never re-encoded.

/// Percent-decode a query component (`+` is a space).
pub fn percent_decode(input: &str) -> String {
    let mut bytes = Vec::with_capacity(input.len());
    let raw = input.as_bytes();
    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'%' if i + 2 < raw.len() => {
                match (hex_val(raw[i + 1]), hex_val(raw[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        bytes.push(hi << 4 | lo);
                        i += 3;
                        continue;
                    }
                    _ => bytes.push(b'%'),
                }
            }
            b'+' => bytes.push(b' '),
            b => bytes.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Percent-encode a query component. Unreserved characters pass through.
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Split a query string (with or without the leading `?`) into raw pairs.
fn raw_pairs(query: &str) -> impl Iterator<Item = &str> {
    let q = query.strip_prefix('?').unwrap_or(query);
    q.split('&').filter(|pair| !pair.is_empty())
}

fn raw_key(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(k, _)| k)
}

/// Parse a query string into decoded key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    raw_pairs(query)
        .map(|pair| {
            let (key, val) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(val))
        })
        .collect()
}

/// First decoded value for `key`, if present.
pub fn get_param(query: &str, key: &str) -> Option<String> {
    parse_query(query)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Return `query` with `key` set to `value`.
///
/// The first existing occurrence is replaced in place and any later
/// duplicates dropped; otherwise the pair is appended. Result is either
/// empty or starts with `?`.
pub fn with_param(query: &str, key: &str, value: &str) -> String {
    let encoded = format!("{}={}", percent_encode(key), percent_encode(value));
    let mut replaced = false;
    let mut pairs: Vec<String> = Vec::new();
    for pair in raw_pairs(query) {
        if percent_decode(raw_key(pair)) == key {
            if !replaced {
                pairs.push(encoded.clone());
                replaced = true;
            }
        } else {
            pairs.push(pair.to_string());
        }
    }
    if !replaced {
        pairs.push(encoded);
    }
    join(&pairs)
}

/// Return `query` with every occurrence of `key` removed.
pub fn without_param(query: &str, key: &str) -> String {
    let pairs: Vec<String> = raw_pairs(query)
        .filter(|pair| percent_decode(raw_key(pair)) != key)
        .map(str::to_string)
        .collect();
    join(&pairs)
}

fn join(pairs: &[String]) -> String {
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}
