use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn encode(codec: &dyn Codec, value: &Value) -> Result<String, CodecError> {
    let cx = CodecTable::new();
    let mut out = String::new();
    codec.encode(&cx, &mut out, value)?;
    Ok(out)
}

fn decode(codec: &dyn Codec, text: &str) -> Result<Value, CodecError> {
    let cx = CodecTable::new();
    codec.decode(&cx, &JsonValue::parse(text)?)
}

// ── Scalars ─────────────────────────────────────────────────────

#[test]
fn long_is_quoted_and_exact() {
    let codec = Scalar::Long.codec();
    assert_eq!(encode(codec, &Value::Long(i64::MAX)).unwrap(), "\"9223372036854775807\"");
    assert_eq!(decode(codec, "\"9223372036854775807\"").unwrap(), Value::Long(i64::MAX));
    assert_eq!(decode(codec, "-42").unwrap(), Value::Long(-42));
}

#[test]
fn long_rejects_fractional_input() {
    assert_eq!(
        decode(Scalar::Long.codec(), "1.5").unwrap_err(),
        CodecError::MalformedNumber {
            kind: "long",
            text: "1.5".to_string(),
        }
    );
    assert!(matches!(
        decode(Scalar::Long.codec(), "\"12x\"").unwrap_err(),
        CodecError::MalformedNumber { kind: "long", .. }
    ));
}

#[test]
fn narrow_integers_are_range_checked() {
    assert_eq!(decode(Scalar::Byte.codec(), "127").unwrap(), Value::Byte(127));
    assert!(decode(Scalar::Byte.codec(), "128").is_err());
    assert_eq!(decode(Scalar::Short.codec(), "\"-300\"").unwrap(), Value::Short(-300));
    assert_eq!(decode(Scalar::Int.codec(), "7.0").unwrap(), Value::Int(7));
}

#[test]
fn short_and_long_are_distinct_codecs() {
    assert_eq!(encode(Scalar::Short.codec(), &Value::Short(5)).unwrap(), "5");
    assert_eq!(encode(Scalar::Long.codec(), &Value::Long(5)).unwrap(), "\"5\"");
    assert!(encode(Scalar::Long.codec(), &Value::Short(5)).is_err());
}

#[test]
fn booleans_accept_text() {
    let codec = Scalar::Boolean.codec();
    assert_eq!(decode(codec, "true").unwrap(), Value::Bool(true));
    assert_eq!(decode(codec, "\"false\"").unwrap(), Value::Bool(false));
    assert!(decode(codec, "\"yes\"").is_err());
    assert!(decode(codec, "1").is_err());
}

#[test]
fn char_takes_first_character_or_nul() {
    let codec = Scalar::Char.codec();
    assert_eq!(encode(codec, &Value::Char('"')).unwrap(), r#""\"""#);
    assert_eq!(decode(codec, "\"xyz\"").unwrap(), Value::Char('x'));
    assert_eq!(decode(codec, "\"\"").unwrap(), Value::Char('\0'));
}

#[test]
fn non_finite_floats_fail() {
    assert_eq!(
        encode(Scalar::Double.codec(), &Value::Double(f64::NAN)).unwrap_err(),
        CodecError::NonFiniteNumber("double")
    );
    assert_eq!(
        encode(Scalar::Float.codec(), &Value::Float(f32::INFINITY)).unwrap_err(),
        CodecError::NonFiniteNumber("float")
    );
}

#[test]
fn floats_use_shortest_text() {
    assert_eq!(encode(Scalar::Float.codec(), &Value::Float(0.1)).unwrap(), "0.1");
    assert_eq!(encode(Scalar::Double.codec(), &Value::Double(1.5)).unwrap(), "1.5");
    assert_eq!(decode(Scalar::Float.codec(), "\"2.5\"").unwrap(), Value::Float(2.5));
}

#[test]
fn null_decodes_to_null() {
    for scalar in Scalar::ALL {
        assert_eq!(decode(scalar.codec(), "null").unwrap(), Value::Null);
    }
}

#[test]
fn zero_matches_kind() {
    assert_eq!(Scalar::Long.zero(), &Value::Long(0));
    assert_eq!(Scalar::Char.zero(), &Value::Char('\0'));
}

proptest! {
    #[test]
    fn long_round_trips(v in any::<i64>()) {
        let codec = Scalar::Long.codec();
        let text = encode(codec, &Value::Long(v)).unwrap();
        prop_assert_eq!(decode(codec, &text).unwrap(), Value::Long(v));
    }

    #[test]
    fn int_round_trips(v in any::<i32>()) {
        let codec = Scalar::Int.codec();
        let text = encode(codec, &Value::Int(v)).unwrap();
        prop_assert_eq!(decode(codec, &text).unwrap(), Value::Int(v));
    }

    #[test]
    fn double_round_trips(mantissa in -1_000_000i32..1_000_000, shift in 0i32..12) {
        let v = f64::from(mantissa) / f64::from(1 << shift);
        let codec = Scalar::Double.codec();
        let text = encode(codec, &Value::Double(v)).unwrap();
        prop_assert_eq!(decode(codec, &text).unwrap(), Value::Double(v));
    }

    #[test]
    fn char_round_trips(c in any::<char>()) {
        let codec = Scalar::Char.codec();
        let text = encode(codec, &Value::Char(c)).unwrap();
        prop_assert_eq!(decode(codec, &text).unwrap(), Value::Char(c));
    }
}

// ── Strings and enums ───────────────────────────────────────────

#[test]
fn strings_escape() {
    assert_eq!(encode(&STRING, &Value::str("a\"b\\")).unwrap(), r#""a\"b\\""#);
    assert_eq!(decode(&STRING, r#""aA""#).unwrap(), Value::str("aA"));
    assert!(decode(&STRING, "3").is_err());
}

#[test]
fn enum_by_name() {
    let codec = EnumCodec::new("a.Color", &["RED", "GREEN"]);
    assert_eq!(encode(&codec, &Value::variant("a.Color", "RED")).unwrap(), "\"RED\"");
    assert_eq!(
        decode(&codec, "\"GREEN\"").unwrap(),
        Value::variant("a.Color", "GREEN")
    );
    assert_eq!(
        decode(&codec, "\"BLUE\"").unwrap_err(),
        CodecError::UnknownVariant {
            type_name: "a.Color".to_string(),
            name: "BLUE".to_string(),
        }
    );
}

// ── Pass-through ────────────────────────────────────────────────

#[test]
fn any_maps_structurally() {
    let text = r#"{"n":3,"f":1.5,"l":[true,null,"s"]}"#;
    let value = decode(&ANY, text).unwrap();
    assert_eq!(
        value,
        Value::Map(vec![
            (Value::str("n"), Value::Int(3)),
            (Value::str("f"), Value::Double(1.5)),
            (
                Value::str("l"),
                Value::List(vec![Value::Bool(true), Value::Null, Value::str("s")])
            ),
        ])
    );
    assert_eq!(encode(&ANY, &value).unwrap(), text);
}

#[test]
fn any_writes_long_as_string() {
    let wide = Value::Long((1 << 53) + 1);
    assert_eq!(encode(&ANY, &wide).unwrap(), "\"9007199254740993\"");
    assert_eq!(
        encode(&ANY, &Value::List(vec![Value::Long(-7), Value::Int(7)])).unwrap(),
        r#"["-7",7]"#
    );
    // Integers past `int` range still read back exactly.
    assert_eq!(decode(&ANY, "9007199254740993").unwrap(), Value::Long((1 << 53) + 1));
}

#[test]
fn any_handles_deep_nesting() {
    let depth = 2_000;
    let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let mut value = decode(&ANY, &text).unwrap();
    assert_eq!(encode(&ANY, &value).unwrap(), text);
    let mut seen = 0;
    while let Value::List(mut items) = value {
        seen += 1;
        value = items.pop().unwrap_or(Value::Null);
    }
    assert_eq!(seen, depth);
}

#[test]
fn any_rejects_unregistered_objects() {
    let obj = Value::Object(crate::Object::new("a.Unknown"));
    assert_eq!(
        encode(&ANY, &obj).unwrap_err(),
        CodecError::UnknownCodec("a.Unknown".to_string())
    );
}
