use pretty_assertions::assert_eq;

use super::*;
use crate::{Scalar, STRING};

fn shared(scalar: Scalar) -> CodecHandle {
    CodecHandle::Shared(scalar.codec())
}

fn encode(codec: &dyn Codec, value: &Value) -> String {
    let mut out = String::new();
    codec.encode(&CodecTable::new(), &mut out, value).unwrap();
    out
}

fn decode(codec: &dyn Codec, text: &str) -> Result<Value, CodecError> {
    codec.decode(&CodecTable::new(), &JsonValue::parse(text)?)
}

// ── String-keyed ────────────────────────────────────────────────

#[test]
fn string_keys_are_member_names() {
    let codec = StringMapCodec::new(None, shared(Scalar::Int));
    let value = decode(&codec, r#"{"x":1,"y":2}"#).unwrap();
    assert_eq!(
        value,
        Value::Map(vec![
            (Value::str("x"), Value::Int(1)),
            (Value::str("y"), Value::Int(2)),
        ])
    );
    assert_eq!(encode(&codec, &value), r#"{"x":1,"y":2}"#);
}

#[test]
fn null_values_are_kept() {
    let codec = StringMapCodec::new(None, CodecHandle::Shared(&STRING));
    let value = Value::Map(vec![(Value::str("k"), Value::Null)]);
    let text = encode(&codec, &value);
    assert_eq!(text, r#"{"k":null}"#);
    assert_eq!(decode(&codec, &text).unwrap(), value);
}

#[test]
fn primitive_keys_are_reparsed() {
    let codec = StringMapCodec::new(Some(shared(Scalar::Long)), CodecHandle::Shared(&STRING));
    let value = Value::Map(vec![
        (Value::Long(-7), Value::str("neg")),
        (Value::Long(40), Value::str("pos")),
    ]);
    let text = encode(&codec, &value);
    assert_eq!(text, r#"{"-7":"neg","40":"pos"}"#);
    assert_eq!(decode(&codec, &text).unwrap(), value);
}

#[test]
fn boolean_and_char_keys() {
    let codec = StringMapCodec::new(Some(shared(Scalar::Boolean)), shared(Scalar::Int));
    let value = Value::Map(vec![(Value::Bool(true), Value::Int(1))]);
    let text = encode(&codec, &value);
    assert_eq!(text, r#"{"true":1}"#);
    assert_eq!(decode(&codec, &text).unwrap(), value);

    let codec = StringMapCodec::new(Some(shared(Scalar::Char)), shared(Scalar::Int));
    let value = Value::Map(vec![
        (Value::Char('5'), Value::Int(5)),
        (Value::Char('a'), Value::Int(1)),
    ]);
    let text = encode(&codec, &value);
    assert_eq!(text, r#"{"5":5,"a":1}"#);
    assert_eq!(decode(&codec, &text).unwrap(), value);
}

#[test]
fn non_string_key_without_key_codec_fails() {
    let codec = StringMapCodec::new(None, shared(Scalar::Int));
    let mut out = String::new();
    let err = codec
        .encode(
            &CodecTable::new(),
            &mut out,
            &Value::Map(vec![(Value::Int(1), Value::Int(1))]),
        )
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::UnexpectedValue {
            expected: "string map key",
            found: "int",
        }
    );
}

#[test]
fn duplicate_member_in_string_map() {
    let codec = StringMapCodec::new(None, shared(Scalar::Int));
    assert_eq!(
        decode(&codec, r#"{"a":1,"a":2}"#).unwrap_err(),
        CodecError::DuplicateKey("a".to_string())
    );
}

// ── Arbitrary keys ──────────────────────────────────────────────

#[test]
fn boolean_keys_use_two_arrays() {
    let codec = ObjectMapCodec::new(shared(Scalar::Boolean), CodecHandle::Shared(&STRING));
    let value = Value::Map(vec![
        (Value::Bool(true), Value::str("yes")),
        (Value::Bool(false), Value::str("no")),
    ]);
    let text = encode(&codec, &value);
    assert_eq!(text, r#"{"keys":[true,false],"values":["yes","no"]}"#);
    assert_eq!(decode(&codec, &text).unwrap(), value);
}

#[test]
fn empty_map() {
    let codec = ObjectMapCodec::new(shared(Scalar::Int), shared(Scalar::Int));
    let text = encode(&codec, &Value::Map(vec![]));
    assert_eq!(text, r#"{"keys":[],"values":[]}"#);
    assert_eq!(decode(&codec, &text).unwrap(), Value::Map(vec![]));
}

#[test]
fn mismatched_arrays_fail() {
    let codec = ObjectMapCodec::new(shared(Scalar::Int), shared(Scalar::Int));
    assert_eq!(
        decode(&codec, r#"{"keys":[1,2],"values":[1]}"#).unwrap_err(),
        CodecError::MismatchedMapArrays { keys: 2, values: 1 }
    );
    assert_eq!(
        decode(&codec, r#"{"keys":[1]}"#).unwrap_err(),
        CodecError::MismatchedMapArrays { keys: 1, values: 0 }
    );
}

#[test]
fn plain_object_form_is_accepted() {
    let codec = ObjectMapCodec::new(shared(Scalar::Boolean), shared(Scalar::Int));
    assert_eq!(
        decode(&codec, r#"{"true":1,"false":0}"#).unwrap(),
        Value::Map(vec![
            (Value::Bool(true), Value::Int(1)),
            (Value::Bool(false), Value::Int(0)),
        ])
    );
}

#[test]
fn colliding_plain_object_keys_fail() {
    let codec = ObjectMapCodec::new(CodecHandle::Shared(&STRING), shared(Scalar::Int));
    assert_eq!(
        decode(&codec, r#"{"a":1,"a":2}"#).unwrap_err(),
        CodecError::DuplicateKey("a".to_string())
    );
}

#[test]
fn duplicate_keys_in_array_form_fail() {
    let codec = ObjectMapCodec::new(shared(Scalar::Int), shared(Scalar::Int));
    assert_eq!(
        decode(&codec, r#"{"keys":[3,3],"values":[1,2]}"#).unwrap_err(),
        CodecError::DuplicateKey("3".to_string())
    );
}

#[test]
fn wrong_json_kind() {
    let codec = ObjectMapCodec::new(shared(Scalar::Int), shared(Scalar::Int));
    assert_eq!(
        decode(&codec, "[1]").unwrap_err(),
        CodecError::UnexpectedJson {
            expected: "map",
            found: "array",
        }
    );
    assert_eq!(decode(&codec, "null").unwrap(), Value::Null);
}
