//! Candle list <-> share token.
//!
//! Token format: a JSON array of `{"left": x, "top": y, "out": bool}`
//! objects, base64-encoded with the URL-safe alphabet and no padding, so it
//! drops into a query string without percent-escaping.
//!
//! Decoding also accepts the standard base64 alphabet with padding, which is
//! what older versions of the page produced with `btoa`. Query parsers turn
//! a literal `+` from those tokens into a space; that is mapped back too.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::cake::store::CandleRecord;
use crate::error::DecodeError;

#[derive(Debug, Serialize)]
struct WireCandleOut {
    left: i32,
    top: i32,
    out: bool,
}

/// Incoming records are read leniently: coordinates may be floats and
/// `out` may be missing.
#[derive(Debug, Deserialize)]
struct WireCandleIn {
    left: f64,
    top: f64,
    #[serde(default)]
    out: bool,
}

impl From<&CandleRecord> for WireCandleOut {
    fn from(c: &CandleRecord) -> Self {
        Self { left: c.x, top: c.y, out: c.extinguished }
    }
}

impl From<WireCandleIn> for CandleRecord {
    fn from(w: WireCandleIn) -> Self {
        // `as` truncates toward zero and saturates, matching parseInt on pixels.
        CandleRecord { x: w.left as i32, y: w.top as i32, extinguished: w.out }
    }
}

/// Encode the candle list as a URL-safe token.
pub fn encode(records: &[CandleRecord]) -> String {
    let wire: Vec<WireCandleOut> = records.iter().map(WireCandleOut::from).collect();
    let json = serde_json::to_string(&wire).unwrap_or_else(|_| "[]".to_string());
    URL_SAFE_NO_PAD.encode(json.as_bytes())
}

/// Decode a token back into candle records.
pub fn decode(token: &str) -> Result<Vec<CandleRecord>, DecodeError> {
    if token.trim().is_empty() {
        return Err(DecodeError::Empty);
    }
    // Not trimmed: a leading or trailing space may be a mangled '+'.
    let normalized = normalize_alphabet(token);
    let bytes = URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| DecodeError::Encoding(e.to_string()))?;
    let json = String::from_utf8(bytes).map_err(|e| DecodeError::Encoding(e.to_string()))?;
    let wire: Vec<WireCandleIn> =
        serde_json::from_str(&json).map_err(|e| DecodeError::Structure(e.to_string()))?;
    Ok(wire.into_iter().map(CandleRecord::from).collect())
}

/// Map standard-alphabet tokens onto the URL-safe alphabet and drop padding.
fn normalize_alphabet(token: &str) -> String {
    token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' | ' ' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn rec(x: i32, y: i32, extinguished: bool) -> CandleRecord {
        CandleRecord { x, y, extinguished }
    }

    #[test]
    fn roundtrip_preserves_order_and_flags() {
        let records = vec![rec(50, 60, false), rec(-3, 0, true), rec(i32::MAX, i32::MIN, false)];
        let token = encode(&records);
        assert_eq!(decode(&token).unwrap(), records);
    }

    #[test]
    fn empty_list_roundtrips() {
        let token = encode(&[]);
        assert_eq!(decode(&token).unwrap(), Vec::<CandleRecord>::new());
    }

    #[test]
    fn token_is_url_safe() {
        // Enough candles that the payload hits every base64 character class.
        let records: Vec<CandleRecord> =
            (0..64).map(|i| rec(i * 37 - 500, i * 91, i % 3 == 0)).collect();
        let token = encode(&records);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn wire_uses_page_field_names() {
        let token = encode(&[rec(50, 60, false)]);
        let json = String::from_utf8(URL_SAFE_NO_PAD.decode(token).unwrap()).unwrap();
        assert_eq!(json, r#"[{"left":50,"top":60,"out":false}]"#);
    }

    #[test]
    fn decodes_btoa_tokens_with_padding() {
        let json = r#"[{"left":120,"top":45,"out":true},{"left":7,"top":8,"out":false}]"#;
        let token = STANDARD.encode(json);
        let records = decode(&token).unwrap();
        assert_eq!(records, vec![rec(120, 45, true), rec(7, 8, false)]);
    }

    #[test]
    fn decodes_btoa_token_with_plus_read_as_space() {
        let token = "W3sibGVmdCI6NjIsInRvcCI6MSwib3V0Ijp0cnVlLCJuIjoiPj4+In1d";
        assert_eq!(decode(token).unwrap(), vec![rec(62, 1, true)]);
        let mangled = token.replace('+', " ");
        assert_eq!(decode(&mangled).unwrap(), vec![rec(62, 1, true)]);
    }

    #[test]
    fn float_coordinates_truncate() {
        let token = URL_SAFE_NO_PAD.encode(r#"[{"left":50.9,"top":-2.7,"out":false}]"#);
        assert_eq!(decode(&token).unwrap(), vec![rec(50, -2, false)]);
    }

    #[test]
    fn missing_out_defaults_to_lit() {
        let token = URL_SAFE_NO_PAD.encode(r#"[{"left":1,"top":2}]"#);
        assert_eq!(decode(&token).unwrap(), vec![rec(1, 2, false)]);
    }

    #[test]
    fn empty_token_is_rejected() {
        assert_eq!(decode(""), Err(DecodeError::Empty));
        assert_eq!(decode("   "), Err(DecodeError::Empty));
    }

    #[test]
    fn invalid_base64_is_encoding_error() {
        assert!(matches!(decode("!!!not base64***"), Err(DecodeError::Encoding(_))));
    }

    #[test]
    fn non_utf8_payload_is_encoding_error() {
        let token = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0xfd]);
        assert!(matches!(decode(&token), Err(DecodeError::Encoding(_))));
    }

    #[test]
    fn wrong_shape_is_structure_error() {
        for json in [
            r#"{"left":1,"top":2}"#,
            r#"[{"left":"a","top":2}]"#,
            r#"[1,2,3]"#,
            "null",
            "not json",
        ] {
            let token = URL_SAFE_NO_PAD.encode(json);
            assert!(
                matches!(decode(&token), Err(DecodeError::Structure(_))),
                "expected structure error for {}",
                json
            );
        }
    }

    #[test]
    fn arbitrary_text_never_panics() {
        let inputs = [
            "a", "ab", "abc", "====", "-_-_", "%%%", "\u{1F382}", "W10", "W3t9XQ", "e30",
            "W3sibGVmdCI6MX1d",
        ];
        for input in inputs {
            let _ = decode(input);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn candle_strategy() -> impl Strategy<Value = CandleRecord> {
            (any::<i32>(), any::<i32>(), any::<bool>()).prop_map(|(x, y, out)| rec(x, y, out))
        }

        proptest! {
            #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

            #[test]
            fn any_candle_list_roundtrips(records in prop::collection::vec(candle_strategy(), 0..64)) {
                let token = encode(&records);
                prop_assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
                prop_assert_eq!(decode(&token), Ok(records));
            }

            #[test]
            fn any_text_decodes_or_errors(input in any::<String>()) {
                // Must return, never panic; blank input is always Empty.
                let result = decode(&input);
                if input.trim().is_empty() {
                    prop_assert_eq!(result, Err(DecodeError::Empty));
                }
            }

            #[test]
            fn base64_shaped_text_decodes_or_errors(input in "[A-Za-z0-9+/_= -]{0,96}") {
                let _ = decode(&input);
            }
        }
    }
}
