use api_factory::infrastructure::codec::{from_value, lenient};
use proptest::prelude::*;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
struct Reading {
    count: i64,
    small: i32,
    ratio: f64,
    maybe: Option<i64>,
}

proptest! {
    /// A number sent as text decodes to the same value as the bare number
    #[test]
    fn prop_string_and_number_agree_i64(n in any::<i64>()) {
        let from_text = lenient::decode::<i64>(&Value::String(n.to_string())).unwrap();
        let from_number = lenient::decode::<i64>(&json!(n)).unwrap();
        prop_assert_eq!(from_text, Some(n));
        prop_assert_eq!(from_number, Some(n));
    }

    #[test]
    fn prop_string_and_number_agree_i32(n in any::<i32>()) {
        prop_assert_eq!(lenient::decode::<i32>(&Value::String(n.to_string())).unwrap(), Some(n));
        prop_assert_eq!(lenient::decode::<i32>(&json!(n)).unwrap(), Some(n));
    }

    #[test]
    fn prop_finite_floats_round_trip_through_text(x in -1.0e12f64..1.0e12) {
        let decoded = lenient::decode::<f64>(&Value::String(x.to_string())).unwrap();
        prop_assert_eq!(decoded, Some(x));
    }

    /// i64 values outside the i32 range never silently truncate
    #[test]
    fn prop_i32_rejects_out_of_range(n in prop_oneof![
        (i64::from(i32::MAX) + 1)..i64::MAX,
        i64::MIN..i64::from(i32::MIN),
    ]) {
        prop_assert!(lenient::decode::<i32>(&json!(n)).is_err());
        prop_assert!(lenient::decode::<i32>(&Value::String(n.to_string())).is_err());
    }

    /// Alphabetic text is never accepted as a number
    #[test]
    fn prop_alphabetic_text_rejected(text in "[a-zA-Z]{1,12}") {
        prop_assume!(!matches!(text.to_ascii_lowercase().as_str(), "nan" | "inf" | "infinity"));
        prop_assert!(lenient::decode::<i64>(&Value::String(text.clone())).is_err());
        prop_assert!(lenient::decode::<f64>(&Value::String(text)).is_err());
    }

    /// Whole structs decode the same whether numbers arrive as text or not
    #[test]
    fn prop_struct_fields_accept_mixed_encodings(count in any::<i64>(), small in any::<i32>(), maybe in any::<Option<i64>>()) {
        let as_numbers = json!({"count": count, "small": small, "ratio": 1.5, "maybe": maybe});
        let as_text = json!({
            "count": count.to_string(),
            "small": small.to_string(),
            "ratio": "1.5",
            "maybe": maybe.map(|m| m.to_string()),
        });

        let a: Reading = from_value(as_numbers).unwrap();
        let b: Reading = from_value(as_text).unwrap();
        prop_assert_eq!(a.count, b.count);
        prop_assert_eq!(a.small, b.small);
        prop_assert_eq!(a.maybe, b.maybe);
        prop_assert_eq!(a.maybe, maybe);
    }
}

#[test]
fn test_empty_and_null_rules() {
    let reading: Reading =
        from_value(json!({"count": "", "small": null, "ratio": "", "maybe": ""})).unwrap();
    assert_eq!(reading.count, 0);
    assert_eq!(reading.small, 0);
    assert!(reading.ratio.abs() < f64::EPSILON);
    assert_eq!(reading.maybe, Some(0));

    let reading: Reading =
        from_value(json!({"count": 1, "small": 2, "ratio": 3, "maybe": null})).unwrap();
    assert_eq!(reading.maybe, None);
}
