//! JSON codec every client encodes and decodes bodies with.

use super::deserializer;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// JSON body codec attached to every client.
///
/// Encoding is plain `serde_json`. Decoding runs through the lenient
/// deserializer, so `f64`/`i64`/`i32` fields accept `null`, `""` and
/// string-encoded numbers wherever they appear in the target type.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a codec
    pub const fn new() -> Self {
        Self
    }

    /// Serialize `value` as a JSON body
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(value)
    }

    /// Decodes a response body. An empty (or all-whitespace) body decodes
    /// as JSON `null`, so `()` and `Option<T>` targets accept it.
    pub fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, serde_json::Error> {
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(body)?
        };
        self.decode_value(value)
    }

    /// Decode an already-parsed value with the lenient rule
    pub fn decode_value<T: DeserializeOwned>(&self, value: Value) -> Result<T, serde_json::Error> {
        deserializer::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Quote {
        bid: f64,
        volume: i64,
        change: Option<i32>,
    }

    #[test]
    fn test_decode_lenient_body() {
        let codec = JsonCodec::new();
        let quote: Quote = codec
            .decode(br#"{"bid": "", "volume": "12", "change": null}"#)
            .unwrap();
        assert_eq!(
            quote,
            Quote {
                bid: 0.0,
                volume: 12,
                change: None
            }
        );
    }

    #[test]
    fn test_encode_passes_numbers_through() {
        let codec = JsonCodec::new();
        let quote = Quote {
            bid: 1.25,
            volume: 3,
            change: None,
        };
        let bytes = codec.encode(&quote).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"bid": 1.25, "volume": 3, "change": null}));
    }

    #[test]
    fn test_empty_body_is_null() {
        let codec = JsonCodec::new();
        codec.decode::<()>(b"").unwrap();
        assert_eq!(codec.decode::<Option<Quote>>(b"  \n").unwrap(), None);
        assert!(codec.decode::<Quote>(b"").is_err());
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let codec = JsonCodec::new();
        assert!(codec.decode::<Quote>(b"{not json").is_err());
    }
}
