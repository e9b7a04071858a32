use pretty_assertions::assert_eq;

use super::*;
use crate::plan::{EnumPlan, FieldEncoding, FieldPlan, ObjectPlan};
use crate::{Object, Scalar};

fn plans() -> Vec<CodecPlan> {
    vec![
        CodecPlan::Enum(EnumPlan {
            type_name: "a.Color".to_string(),
            variants: vec!["RED".to_string(), "GREEN".to_string()],
        }),
        CodecPlan::Object(ObjectPlan {
            type_name: "a.Pixel".to_string(),
            is_abstract: false,
            superclass: None,
            subtypes: vec!["a.Glow".to_string()],
            fields: vec![
                FieldPlan {
                    name: "color".to_string(),
                    wire_name: "color".to_string(),
                    private: false,
                    encoding: FieldEncoding::Nested(CodecRef::Generated("a.Color".to_string())),
                },
                FieldPlan {
                    name: "x".to_string(),
                    wire_name: "x".to_string(),
                    private: false,
                    encoding: FieldEncoding::Primitive(Scalar::Short),
                },
            ],
        }),
        CodecPlan::Object(ObjectPlan {
            type_name: "a.Glow".to_string(),
            is_abstract: false,
            superclass: Some("a.Pixel".to_string()),
            subtypes: Vec::new(),
            fields: Vec::new(),
        }),
    ]
}

fn pixel(x: i16) -> Value {
    Value::Object(
        Object::new("a.Pixel")
            .with("color", Value::variant("a.Color", "RED"))
            .with("x", Value::Short(x)),
    )
}

#[test]
fn table_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CodecTable>();
}

#[test]
fn link_registers_every_plan() {
    let table = CodecTable::from_plans(DEFAULT_TAG_MEMBER, &plans());
    assert_eq!(table.len(), 3);
    assert!(table.contains("a.Color"));
    assert!(table.contains("a.Glow"));
    assert!(!table.contains("a.Other"));
    assert!(table.object_codec("a.Color").is_err());
    assert_eq!(table.object_codec("a.Pixel").unwrap().type_name(), "a.Pixel");
}

#[test]
fn top_level_list_of_generated() {
    let table = CodecTable::from_plans(DEFAULT_TAG_MEMBER, &plans());
    let codec = CodecRef::List(Box::new(CodecRef::Generated("a.Pixel".to_string())));
    let value = Value::List(vec![pixel(1), Value::Null, pixel(-2)]);
    let text = table.encode(&codec, &value).unwrap();
    assert_eq!(
        text,
        r#"[{"_type_":"a.Pixel","color":"RED","x":1},null,{"_type_":"a.Pixel","color":"RED","x":-2}]"#
    );
    assert_eq!(table.decode(&codec, &text).unwrap(), value);
}

#[test]
fn custom_tag_member() {
    let table = CodecTable::from_plans("@t", &plans());
    let glow = Value::Object(Object::new("a.Glow").with("x", Value::Short(3)));
    let codec = CodecRef::Generated("a.Pixel".to_string());
    let text = table.encode(&codec, &glow).unwrap();
    assert_eq!(text, r#"{"@t":"a.Glow","x":3}"#);
    assert_eq!(table.decode(&codec, &text).unwrap(), glow);
}

#[test]
fn top_level_null() {
    let table = CodecTable::new();
    assert_eq!(table.encode(&CodecRef::Str, &Value::Null).unwrap(), "null");
    assert_eq!(table.decode(&CodecRef::Str, "null").unwrap(), Value::Null);
}

#[test]
fn enum_through_table() {
    let table = CodecTable::from_plans(DEFAULT_TAG_MEMBER, &plans());
    let codec = CodecRef::Generated("a.Color".to_string());
    assert_eq!(
        table.encode(&codec, &Value::variant("a.Color", "GREEN")).unwrap(),
        "\"GREEN\""
    );
    assert_eq!(
        table.decode(&codec, "\"PURPLE\"").unwrap_err(),
        CodecError::UnknownVariant {
            type_name: "a.Color".to_string(),
            name: "PURPLE".to_string(),
        }
    );
}

#[test]
fn unknown_codec_and_bad_json() {
    let table = CodecTable::new();
    let codec = CodecRef::Generated("a.Missing".to_string());
    assert_eq!(
        table.encode(&codec, &Value::Int(1)).unwrap_err(),
        CodecError::UnknownCodec("a.Missing".to_string())
    );
    assert!(matches!(
        table.decode(&CodecRef::Str, "{").unwrap_err(),
        CodecError::Json(_)
    ));
}

#[test]
fn registering_again_replaces() {
    let mut table = CodecTable::new();
    table.link(&plans());
    table.link(&plans());
    assert_eq!(table.len(), 3);
}
