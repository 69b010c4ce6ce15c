//! JSON codec with lenient numeric decoding
//!
//! - `lenient`: the numeric rule and field-level serde helpers
//! - `deserializer`: applies the rule across any `Deserialize` type
//! - `json`: the codec clients use for request and response bodies

pub mod deserializer;
/// `JsonCodec`
pub mod json;
pub mod lenient;

pub use deserializer::{from_value, LenientDeserializer};
pub use json::JsonCodec;
pub use lenient::{LenientNumber, NumericDecodeError, NumericKind};
