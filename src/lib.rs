//! Candle cake — a birthday cake page in WASM.
//!
//! Click the cake to add a candle, blow into the microphone to put them
//! out, share the cake through the page address. The candle list lives in
//! the `candles` query parameter as a URL-safe base64 JSON token, so a
//! shared link reproduces the same cake.
//!
//! Everything except [`web`] is target-independent and tested natively;
//! `web` binds it to the DOM, Web Audio and the clipboard.

pub mod audio;
pub mod cake;
pub mod config;
pub mod controller;
pub mod diag;
pub mod error;
pub mod share;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use cake::{CandleRecord, CandleStore};
pub use config::CakeConfig;
pub use controller::{AddressBar, CakeView, InteractionController};
pub use error::{AudioError, ClipboardError, ConfigError, DecodeError};

/// Encode a candle list as a share token. Exposed for the page script and
/// tooling that builds links outside the cake page.
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn encode_candles(json: &str) -> Result<String, String> {
    let records: Vec<[i64; 3]> =
        serde_json::from_str(json).map_err(|e| format!("Invalid candle list JSON: {}", e))?;
    let records = records
        .into_iter()
        .map(|[x, y, out]| {
            let coord = |v: i64| {
                i32::try_from(v).map_err(|_| {
                    format!("Invalid candle list JSON: coordinate out of range: {}", v)
                })
            };
            let extinguished = match out {
                0 => false,
                1 => true,
                other => {
                    return Err(format!("Invalid candle list JSON: out must be 0 or 1, got {}", other));
                }
            };
            Ok(CandleRecord { x: coord(x)?, y: coord(y)?, extinguished })
        })
        .collect::<Result<Vec<CandleRecord>, String>>()?;
    Ok(cake::codec::encode(&records))
}

/// Decode a share token to a `[[x, y, out], ...]` JSON list.
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn decode_candles(token: &str) -> Result<String, String> {
    let records = cake::codec::decode(token).map_err(|e| e.to_string())?;
    let triples: Vec<[i64; 3]> = records
        .iter()
        .map(|c| [i64::from(c.x), i64::from(c.y), i64::from(c.extinguished)])
        .collect();
    serde_json::to_string(&triples).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_exports_roundtrip() {
        let token = encode_candles("[[50,60,0],[10,20,1]]").unwrap();
        assert_eq!(decode_candles(&token).unwrap(), "[[50,60,0],[10,20,1]]");
    }

    #[test]
    fn encode_rejects_bad_json() {
        let err = encode_candles("[[1,2]]").unwrap_err();
        assert!(err.contains("Invalid candle list JSON"));
    }

    #[test]
    fn encode_rejects_out_of_range_coordinates() {
        let err = encode_candles("[[4294967346,60,0]]").unwrap_err();
        assert!(err.contains("coordinate out of range"));
        let err = encode_candles("[[50,-2147483649,0]]").unwrap_err();
        assert!(err.contains("coordinate out of range"));
    }

    #[test]
    fn encode_accepts_i32_bounds() {
        let json = "[[2147483647,-2147483648,1]]";
        let token = encode_candles(json).unwrap();
        assert_eq!(decode_candles(&token).unwrap(), json);
    }

    #[test]
    fn encode_rejects_out_flag_other_than_zero_or_one() {
        let err = encode_candles("[[50,60,2]]").unwrap_err();
        assert!(err.contains("out must be 0 or 1"));
        assert!(encode_candles("[[50,60,-1]]").is_err());
    }

    #[test]
    fn decode_reports_bad_token() {
        let err = decode_candles("***").unwrap_err();
        assert!(err.contains("token encoding error"));
    }
}
