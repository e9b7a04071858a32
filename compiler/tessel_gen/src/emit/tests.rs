use pretty_assertions::assert_eq;

use tessel_runtime::Scalar;

use super::*;

fn emitter() -> Emitter<'static> {
    Emitter::new("_type_", "_JsonCodec")
}

fn color() -> CodecPlan {
    CodecPlan::Enum(EnumPlan {
        type_name: "a.Color".to_string(),
        variants: vec!["RED".to_string(), "GREEN".to_string()],
    })
}

fn field(name: &str, wire_name: &str, encoding: FieldEncoding) -> FieldPlan {
    FieldPlan {
        name: name.to_string(),
        wire_name: wire_name.to_string(),
        private: false,
        encoding,
    }
}

fn dog() -> CodecPlan {
    CodecPlan::Object(ObjectPlan {
        type_name: "a.Dog".to_string(),
        is_abstract: false,
        superclass: Some("a.Animal".to_string()),
        subtypes: vec!["a.Puppy".to_string()],
        fields: vec![
            field(
                "friends",
                "friends",
                FieldEncoding::Nested(CodecRef::List(Box::new(CodecRef::Generated(
                    "a.Dog".to_string(),
                )))),
            ),
            field("myAge", "age", FieldEncoding::Primitive(Scalar::Int)),
            field("weight", "weight", FieldEncoding::Boxed(Scalar::Double)),
        ],
    })
}

#[test]
fn writer_indents() {
    let mut w = SourceWriter::new();
    w.writeln("a {");
    w.indent();
    w.writeln("b;");
    w.dedent();
    w.writeln("}");
    w.newline();
    assert_eq!(w.take_output(), "a {\n    b;\n}\n\n");
    assert_eq!(w.take_output(), "");
}

#[test]
fn handles() {
    assert_eq!(
        render_handle(&CodecRef::Scalar(Scalar::Long)),
        "rt::CodecHandle::Shared(rt::Scalar::Long.codec())"
    );
    assert_eq!(
        render_handle(&CodecRef::StringMap {
            key: None,
            value: Box::new(CodecRef::Set(Box::new(CodecRef::Str))),
        }),
        "rt::CodecHandle::owned(rt::StringMapCodec::new(None, \
         rt::CodecHandle::owned(rt::SetCodec::new(rt::CodecHandle::Shared(&rt::STRING)))))"
    );
    assert_eq!(
        render_handle(&CodecRef::ObjectMap {
            key: Box::new(CodecRef::Generated("a.Key".to_string())),
            value: Box::new(CodecRef::Date),
        }),
        "rt::CodecHandle::owned(rt::ObjectMapCodec::new(\
         rt::CodecHandle::owned(rt::GeneratedRef::new(\"a.Key\")), \
         rt::CodecHandle::Shared(&rt::DATE)))"
    );
}

#[test]
fn enum_source() {
    let source = emitter().emit_plan(&color());
    assert_eq!(source.type_name, "a.Color");
    assert_eq!(source.identity, "a_Color_JsonCodec");
    assert_eq!(
        source.code,
        "/// Codec for `a.Color`.\n\
         #[allow(non_snake_case)]\n\
         pub fn a_Color_JsonCodec() -> rt::EnumCodec {\n    \
         rt::EnumCodec::new(\"a.Color\", &[\"RED\", \"GREEN\"])\n\
         }\n"
    );
}

#[test]
fn object_source() {
    let code = emitter().emit_plan(&dog()).code;
    let expected_lines = [
        "pub struct a_Dog_JsonCodec {",
        "    friends_codec: rt::CodecHandle,",
        "    pub const TYPE_NAME: &'static str = \"a.Dog\";",
        "    const SUBTYPES: &'static [&'static str] = &[\"a.Puppy\"];",
        "            friends_codec: rt::CodecHandle::owned(rt::ListCodec::new(\
         rt::CodecHandle::owned(rt::GeneratedRef::new(\"a.Dog\")))),",
        "impl rt::FieldCodec for a_Dog_JsonCodec {",
        "        false",
        "        count = cx.object_codec(\"a.Animal\")?.print_fields(cx, out, src, count)?;",
        "        count = rt::print_field(cx, out, &*self.friends_codec, \"friends\", \
         src.get(\"friends\"), count)?;",
        "        count = rt::print_field(cx, out, rt::Scalar::Int.codec(), \"age\", \
         Some(src.get(\"myAge\").unwrap_or(rt::Scalar::Int.zero())), count)?;",
        "        cx.object_codec(\"a.Animal\")?.read_fields(cx, members, dst)?;",
        "        dst.set(\"myAge\", rt::Scalar::Int.or_zero(\
         rt::read_field(cx, members, rt::Scalar::Int.codec(), \"age\")?));",
        "        dst.set(\"weight\", rt::read_field(cx, members, rt::Scalar::Double.codec(), \
         \"weight\")?);",
    ];
    for line in expected_lines {
        assert!(
            code.lines().any(|l| l == line),
            "missing line:\n{line}\nin:\n{code}"
        );
    }
}

#[test]
fn empty_object_has_no_unused_parameters() {
    let plan = CodecPlan::Object(ObjectPlan {
        type_name: "a.Marker".to_string(),
        is_abstract: true,
        superclass: None,
        subtypes: Vec::new(),
        fields: Vec::new(),
    });
    let code = emitter().emit_plan(&plan).code;
    assert!(code.contains("pub struct a_Marker_JsonCodec;"));
    assert!(code.contains("        a_Marker_JsonCodec\n"));
    assert!(code.contains("_cx: &rt::CodecTable,"));
    assert!(code.contains("count: usize,"));
    assert!(!code.contains("mut count"));
    assert!(code.contains("        true\n"));
}

#[test]
fn unit_lists_and_registers_every_codec() {
    let e = emitter();
    let plans = vec![color(), dog()];
    let sources: Vec<GeneratedSource> = plans.iter().map(|p| e.emit_plan(p)).collect();
    let unit = e.emit_unit(&plans, &sources);

    assert!(unit.starts_with("// @generated by tessel. Do not edit.\n\nuse tessel_runtime as rt;\n"));
    assert!(unit.contains("pub const TAG_MEMBER: &str = \"_type_\";"));
    assert!(unit.contains("pub const CODEC_NAMES: &[&str] = &[\n    \"a.Color\",\n    \"a.Dog\",\n];"));
    assert!(unit.contains("    table.register(\"a.Color\", Box::new(a_Color_JsonCodec()));"));
    assert!(unit.contains("    table.register_object(Box::new(a_Dog_JsonCodec::new()));"));
    assert!(unit.contains(&sources[1].code));
    assert!(unit.ends_with("    table\n}\n"));

    let color_at = unit.find("pub fn a_Color_JsonCodec").unwrap();
    let dog_at = unit.find("pub struct a_Dog_JsonCodec").unwrap();
    assert!(color_at < dog_at);
}

#[test]
fn empty_unit() {
    let unit = emitter().emit_unit(&[], &[]);
    assert!(unit.contains("pub fn register_all(_table: &mut rt::CodecTable) {}"));
    assert!(unit.contains("pub const CODEC_NAMES: &[&str] = &[\n];"));
}

#[test]
fn names_are_escaped() {
    let plan = CodecPlan::Enum(EnumPlan {
        type_name: "a.Quote".to_string(),
        variants: vec!["SAY\"HI\"".to_string()],
    });
    let code = emitter().emit_plan(&plan).code;
    assert!(code.contains(r#"&["SAY\"HI\""]"#));
}
