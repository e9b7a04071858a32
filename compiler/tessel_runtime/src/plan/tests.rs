use pretty_assertions::assert_eq;

use super::*;

fn dog() -> CodecRef {
    CodecRef::Generated("com.acme.Dog".to_string())
}

#[test]
fn refs_serialize_adjacently_tagged() {
    let codec = CodecRef::StringMap {
        key: None,
        value: Box::new(CodecRef::Array(Box::new(dog()))),
    };
    let text = serde_json::to_string(&codec).unwrap();
    assert_eq!(
        text,
        r#"{"codec":"string_map","of":{"key":null,"value":{"codec":"array","of":{"codec":"generated","of":"com.acme.Dog"}}}}"#
    );
    let back: CodecRef = serde_json::from_str(&text).unwrap();
    assert_eq!(back, codec);

    assert_eq!(
        serde_json::to_string(&CodecRef::Scalar(Scalar::Long)).unwrap(),
        r#"{"codec":"scalar","of":"long"}"#
    );
    assert_eq!(serde_json::to_string(&CodecRef::Str).unwrap(), r#"{"codec":"str"}"#);
}

#[test]
fn object_plan_omits_empty_parts() {
    let plan = CodecPlan::Object(ObjectPlan {
        type_name: "com.acme.Leaf".to_string(),
        is_abstract: false,
        superclass: None,
        subtypes: Vec::new(),
        fields: vec![FieldPlan {
            name: "n".to_string(),
            wire_name: "n".to_string(),
            private: false,
            encoding: FieldEncoding::Primitive(Scalar::Int),
        }],
    });
    let text = serde_json::to_string(&plan).unwrap();
    assert_eq!(
        text,
        r#"{"kind":"object","type_name":"com.acme.Leaf","is_abstract":false,"fields":[{"name":"n","wire_name":"n","encoding":{"encoding":"primitive","of":"int"}}]}"#
    );
    let back: CodecPlan = serde_json::from_str(&text).unwrap();
    assert_eq!(back, plan);
    assert_eq!(back.name(), "com.acme.Leaf");
}

#[test]
fn singletons_link_shared() {
    assert!(CodecRef::Scalar(Scalar::Int).link().is_shared());
    assert!(CodecRef::Str.link().is_shared());
    assert!(CodecRef::Date.link().is_shared());
    assert!(CodecRef::Any.link().is_shared());
    assert!(!dog().link().is_shared());
    assert!(!CodecRef::List(Box::new(CodecRef::Str)).link().is_shared());
}

#[test]
fn generated_names_in_order() {
    let codec = CodecRef::ObjectMap {
        key: Box::new(CodecRef::Generated("a.Key".to_string())),
        value: Box::new(CodecRef::List(Box::new(dog()))),
    };
    assert_eq!(codec.generated(), vec!["a.Key", "com.acme.Dog"]);
    assert!(CodecRef::Scalar(Scalar::Byte).generated().is_empty());
}

#[test]
fn field_encoding_codec_ref() {
    assert_eq!(
        FieldEncoding::Boxed(Scalar::Char).codec_ref(),
        CodecRef::Scalar(Scalar::Char)
    );
    assert_eq!(FieldEncoding::Primitive(Scalar::Int).primitive(), Some(Scalar::Int));
    assert_eq!(FieldEncoding::Boxed(Scalar::Int).primitive(), None);
    assert_eq!(FieldEncoding::Nested(dog()).codec_ref(), dog());
}
