//! Lenient decoding for numeric JSON fields.
//!
//! Backends regularly send `""` or `null` where a number belongs. One rule
//! covers the three numeric kinds the codec cares about (`f64`, `i64`, `i32`):
//!
//! | JSON input        | decoded                           |
//! |-------------------|-----------------------------------|
//! | `null`            | absent                            |
//! | `""`              | zero                              |
//! | `"42"`            | parsed as the target kind         |
//! | `42`              | converted to the target kind      |
//! | anything else     | [`NumericDecodeError`]            |
//!
//! Encoding is untouched: present values serialize as plain numbers and
//! absent values as `null`.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Numeric kinds that get lenient decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// `f64`
    Double,
    /// `i64`
    Long,
    /// `i32`
    Int,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Double => "f64",
            Self::Long => "i64",
            Self::Int => "i32",
        })
    }
}

/// A JSON value that cannot be read as the requested numeric kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericDecodeError {
    /// A string that does not parse as the kind
    #[error("cannot parse {text:?} as {kind}")]
    InvalidText {
        /// Requested kind
        kind: NumericKind,
        /// Offending text
        text: String,
    },

    /// A JSON number outside the kind's range, or fractional for an integer
    #[error("number {number} is not representable as {kind}")]
    Unrepresentable {
        /// Requested kind
        kind: NumericKind,
        /// The number as it appeared in the JSON
        number: String,
    },

    /// A boolean, array or object where a number was expected
    #[error("expected {kind}, found JSON {found}")]
    UnexpectedType {
        /// Requested kind
        kind: NumericKind,
        /// JSON type actually found
        found: &'static str,
    },
}

/// A numeric kind the lenient rule can decode into.
pub trait LenientNumber: Copy + Default + FromStr {
    /// Kind reported in decode errors.
    const KIND: NumericKind;

    /// Converts a JSON number token, or `None` if it does not fit.
    fn from_json_number(number: &Number) -> Option<Self>;
}

impl LenientNumber for f64 {
    const KIND: NumericKind = NumericKind::Double;

    fn from_json_number(number: &Number) -> Option<Self> {
        number.as_f64()
    }
}

impl LenientNumber for i64 {
    const KIND: NumericKind = NumericKind::Long;

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn from_json_number(number: &Number) -> Option<Self> {
        // 42.0 is an integral number token and reads as 42
        number.as_i64().or_else(|| {
            integral(number)
                .filter(|v| *v >= Self::MIN as f64 && *v < Self::MAX as f64)
                .map(|v| v as Self)
        })
    }
}

impl LenientNumber for i32 {
    const KIND: NumericKind = NumericKind::Int;

    fn from_json_number(number: &Number) -> Option<Self> {
        i64::from_json_number(number).and_then(|v| Self::try_from(v).ok())
    }
}

fn integral(number: &Number) -> Option<f64> {
    number.as_f64().filter(|v| v.fract() == 0.0)
}

/// Decodes `value` as `T`, returning `None` for JSON `null`.
pub fn decode<T: LenientNumber>(value: &Value) -> Result<Option<T>, NumericDecodeError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => parse_text(text).map(Some),
        Value::Number(number) => T::from_json_number(number).map(Some).ok_or_else(|| {
            NumericDecodeError::Unrepresentable {
                kind: T::KIND,
                number: number.to_string(),
            }
        }),
        other => Err(NumericDecodeError::UnexpectedType {
            kind: T::KIND,
            found: json_type_name(other),
        }),
    }
}

/// Parses a string-encoded number. The empty string reads as zero.
pub fn parse_text<T: LenientNumber>(text: &str) -> Result<T, NumericDecodeError> {
    if text.is_empty() {
        return Ok(T::default());
    }
    text.parse().map_err(|_| NumericDecodeError::InvalidText {
        kind: T::KIND,
        text: text.to_string(),
    })
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field helper for plain numeric fields: `null` leaves the zero value.
///
/// ```
/// use serde::Deserialize;
/// use api_factory::infrastructure::codec::lenient;
///
/// #[derive(Deserialize)]
/// struct Price {
///     #[serde(with = "lenient::number")]
///     cents: i64,
/// }
///
/// let price: Price = serde_json::from_str(r#"{"cents": ""}"#).unwrap();
/// assert_eq!(price.cents, 0);
/// ```
pub mod number {
    use super::{de, Deserialize, Deserializer, LenientNumber, Serialize, Serializer, Value};

    /// Decode with the lenient rule, `null` giving the zero value.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: LenientNumber,
    {
        let value = Value::deserialize(deserializer)?;
        super::decode::<T>(&value)
            .map(Option::unwrap_or_default)
            .map_err(de::Error::custom)
    }

    /// Encode as a plain JSON number.
    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }
}

/// Field helper for optional numeric fields: `null` reads as `None`.
///
/// Pair it with `#[serde(default)]` so a missing field is also `None`.
pub mod option {
    use super::{de, Deserialize, Deserializer, LenientNumber, Serialize, Serializer, Value};

    /// Decode with the lenient rule, `null` giving `None`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: LenientNumber,
    {
        let value = Value::deserialize(deserializer)?;
        super::decode::<T>(&value).map_err(de::Error::custom)
    }

    /// Encode as a JSON number, or `null` when absent.
    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        value.serialize(serializer)
    }
}
