//! Rust source emission.
//!
//! Renders codec plans to Rust source against `tessel_runtime`. The emitted
//! codecs behave exactly like the ones [`CodecTable::link`] builds from the
//! same plans: both route every field through
//! [`print_field`](tessel_runtime::print_field) and
//! [`read_field`](tessel_runtime::read_field).
//!
//! One unit is a single module:
//!
//! ```text
//! // @generated ...
//! use tessel_runtime as rt;
//! pub const TAG_MEMBER: &str = "_type_";
//! pub const CODEC_NAMES: &[&str] = &[...];
//! <one struct or fn per plan>
//! pub fn register_all(table: &mut rt::CodecTable) { ... }
//! pub fn codec_table() -> rt::CodecTable { ... }
//! ```
//!
//! [`CodecTable::link`]: tessel_runtime::CodecTable::link

use std::collections::BTreeMap;

use tessel_runtime::{CodecPlan, CodecRef, EnumPlan, FieldEncoding, FieldPlan, ObjectPlan};

use crate::registry::codec_identity;

/// Indented source buffer.
pub struct SourceWriter {
    indent: usize,
    output: String,
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceWriter {
    pub fn new() -> Self {
        SourceWriter {
            indent: 0,
            output: String::with_capacity(4096),
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line at the current indentation.
    pub fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Take the generated output, leaving the buffer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

/// Emitted source for one codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSource {
    pub type_name: String,
    pub identity: String,
    pub code: String,
}

/// Rust string literal for `s`.
fn lit(s: &str) -> String {
    format!("{s:?}")
}

/// Struct member holding the nested codec of `field`.
fn slot(field: &str) -> String {
    codec_identity(field, "_codec")
}

/// Expression building the [`CodecHandle`](tessel_runtime::CodecHandle)
/// `codec` describes.
pub fn render_handle(codec: &CodecRef) -> String {
    match codec {
        CodecRef::Scalar(scalar) => format!("rt::CodecHandle::Shared(rt::Scalar::{scalar:?}.codec())"),
        CodecRef::Str => "rt::CodecHandle::Shared(&rt::STRING)".to_string(),
        CodecRef::Date => "rt::CodecHandle::Shared(&rt::DATE)".to_string(),
        CodecRef::Timestamp => "rt::CodecHandle::Shared(&rt::TIMESTAMP)".to_string(),
        CodecRef::LocalDate => "rt::CodecHandle::Shared(&rt::LOCAL_DATE)".to_string(),
        CodecRef::Any => "rt::CodecHandle::Shared(&rt::ANY)".to_string(),
        CodecRef::Generated(name) => {
            format!("rt::CodecHandle::owned(rt::GeneratedRef::new({}))", lit(name))
        }
        CodecRef::Array(element) => {
            format!("rt::CodecHandle::owned(rt::ArrayCodec::new({}))", render_handle(element))
        }
        CodecRef::List(element) => {
            format!("rt::CodecHandle::owned(rt::ListCodec::new({}))", render_handle(element))
        }
        CodecRef::Set(element) => {
            format!("rt::CodecHandle::owned(rt::SetCodec::new({}))", render_handle(element))
        }
        CodecRef::StringMap { key, value } => {
            let key = match key {
                Some(key) => format!("Some({})", render_handle(key)),
                None => "None".to_string(),
            };
            format!(
                "rt::CodecHandle::owned(rt::StringMapCodec::new({key}, {}))",
                render_handle(value)
            )
        }
        CodecRef::ObjectMap { key, value } => format!(
            "rt::CodecHandle::owned(rt::ObjectMapCodec::new({}, {}))",
            render_handle(key),
            render_handle(value)
        ),
    }
}

/// Renders plans with a fixed naming scheme.
pub struct Emitter<'a> {
    tag_member: &'a str,
    codec_suffix: &'a str,
    /// Identities assigned during the walk, by type name.
    identities: BTreeMap<String, String>,
}

impl<'a> Emitter<'a> {
    pub fn new(tag_member: &'a str, codec_suffix: &'a str) -> Self {
        Emitter {
            tag_member,
            codec_suffix,
            identities: BTreeMap::new(),
        }
    }

    /// Use these identities instead of mangling type names afresh.
    #[must_use]
    pub fn with_identities(mut self, identities: BTreeMap<String, String>) -> Self {
        self.identities = identities;
        self
    }

    pub fn identity(&self, type_name: &str) -> String {
        match self.identities.get(type_name) {
            Some(identity) => identity.clone(),
            None => codec_identity(type_name, self.codec_suffix),
        }
    }

    /// Source for one plan.
    pub fn emit_plan(&self, plan: &CodecPlan) -> GeneratedSource {
        let mut w = SourceWriter::new();
        match plan {
            CodecPlan::Object(object) => self.emit_object(&mut w, object),
            CodecPlan::Enum(plan) => self.emit_enum(&mut w, plan),
        }
        GeneratedSource {
            type_name: plan.name().to_string(),
            identity: self.identity(plan.name()),
            code: w.take_output(),
        }
    }

    fn emit_enum(&self, w: &mut SourceWriter, plan: &EnumPlan) {
        let variants: Vec<String> = plan.variants.iter().map(|v| lit(v)).collect();
        w.writeln(&format!("/// Codec for `{}`.", plan.type_name));
        w.writeln("#[allow(non_snake_case)]");
        w.writeln(&format!(
            "pub fn {}() -> rt::EnumCodec {{",
            self.identity(&plan.type_name)
        ));
        w.indent();
        w.writeln(&format!(
            "rt::EnumCodec::new({}, &[{}])",
            lit(&plan.type_name),
            variants.join(", ")
        ));
        w.dedent();
        w.writeln("}");
    }

    fn emit_object(&self, w: &mut SourceWriter, plan: &ObjectPlan) {
        let ident = self.identity(&plan.type_name);
        let nested: Vec<(&FieldPlan, &CodecRef)> = plan
            .fields
            .iter()
            .filter_map(|f| match &f.encoding {
                FieldEncoding::Nested(codec) => Some((f, codec)),
                _ => None,
            })
            .collect();

        w.writeln(&format!("/// Codec for `{}`.", plan.type_name));
        w.writeln("#[allow(non_camel_case_types)]");
        if nested.is_empty() {
            w.writeln(&format!("pub struct {ident};"));
        } else {
            w.writeln(&format!("pub struct {ident} {{"));
            w.indent();
            for (field, _) in &nested {
                w.writeln(&format!("{}: rt::CodecHandle,", slot(&field.name)));
            }
            w.dedent();
            w.writeln("}");
        }
        w.newline();

        w.writeln("#[allow(clippy::new_without_default)]");
        w.writeln(&format!("impl {ident} {{"));
        w.indent();
        w.writeln(&format!(
            "pub const TYPE_NAME: &'static str = {};",
            lit(&plan.type_name)
        ));
        let subtypes: Vec<String> = plan.subtypes.iter().map(|s| lit(s)).collect();
        w.writeln(&format!(
            "const SUBTYPES: &'static [&'static str] = &[{}];",
            subtypes.join(", ")
        ));
        w.newline();
        w.writeln("pub fn new() -> Self {");
        w.indent();
        if nested.is_empty() {
            w.writeln(&ident);
        } else {
            w.writeln(&format!("{ident} {{"));
            w.indent();
            for (field, codec) in &nested {
                w.writeln(&format!("{}: {},", slot(&field.name), render_handle(codec)));
            }
            w.dedent();
            w.writeln("}");
        }
        w.dedent();
        w.writeln("}");
        w.dedent();
        w.writeln("}");
        w.newline();

        w.writeln(&format!("impl rt::FieldCodec for {ident} {{"));
        w.indent();
        w.writeln("fn type_name(&self) -> &str {");
        w.writeln("    Self::TYPE_NAME");
        w.writeln("}");
        w.newline();
        w.writeln("fn is_abstract(&self) -> bool {");
        w.writeln(&format!("    {}", plan.is_abstract));
        w.writeln("}");
        w.newline();
        w.writeln("fn has_subtypes(&self) -> bool {");
        w.writeln("    !Self::SUBTYPES.is_empty()");
        w.writeln("}");
        w.newline();
        w.writeln("fn is_known_subtype(&self, name: &str) -> bool {");
        w.writeln("    Self::SUBTYPES.iter().any(|sub| *sub == name)");
        w.writeln("}");
        w.newline();
        self.emit_print_fields(w, plan);
        w.newline();
        self.emit_read_fields(w, plan);
        w.dedent();
        w.writeln("}");
    }

    fn emit_print_fields(&self, w: &mut SourceWriter, plan: &ObjectPlan) {
        let has_work = plan.superclass.is_some() || !plan.fields.is_empty();
        w.writeln("fn print_fields(");
        w.indent();
        if has_work {
            w.writeln("&self,");
            w.writeln("cx: &rt::CodecTable,");
            w.writeln("out: &mut String,");
            w.writeln("src: &rt::Object,");
            w.writeln("mut count: usize,");
        } else {
            w.writeln("&self,");
            w.writeln("_cx: &rt::CodecTable,");
            w.writeln("_out: &mut String,");
            w.writeln("_src: &rt::Object,");
            w.writeln("count: usize,");
        }
        w.dedent();
        w.writeln(") -> Result<usize, rt::CodecError> {");
        w.indent();
        if let Some(sup) = &plan.superclass {
            w.writeln(&format!(
                "count = cx.object_codec({})?.print_fields(cx, out, src, count)?;",
                lit(sup)
            ));
        }
        for field in &plan.fields {
            let name = lit(&field.name);
            let (codec, value) = match &field.encoding {
                FieldEncoding::Primitive(scalar) => (
                    format!("rt::Scalar::{scalar:?}.codec()"),
                    format!("Some(src.get({name}).unwrap_or(rt::Scalar::{scalar:?}.zero()))"),
                ),
                FieldEncoding::Boxed(scalar) => (
                    format!("rt::Scalar::{scalar:?}.codec()"),
                    format!("src.get({name})"),
                ),
                FieldEncoding::Str => ("&rt::STRING".to_string(), format!("src.get({name})")),
                FieldEncoding::Nested(_) => (
                    format!("&*self.{}", slot(&field.name)),
                    format!("src.get({name})"),
                ),
            };
            w.writeln(&format!(
                "count = rt::print_field(cx, out, {codec}, {}, {value}, count)?;",
                lit(&field.wire_name)
            ));
        }
        w.writeln("Ok(count)");
        w.dedent();
        w.writeln("}");
    }

    fn emit_read_fields(&self, w: &mut SourceWriter, plan: &ObjectPlan) {
        let has_work = plan.superclass.is_some() || !plan.fields.is_empty();
        let prefix = if has_work { "" } else { "_" };
        w.writeln("fn read_fields(");
        w.indent();
        w.writeln("&self,");
        w.writeln(&format!("{prefix}cx: &rt::CodecTable,"));
        w.writeln(&format!("{prefix}members: &[(String, rt::JsonValue)],"));
        w.writeln(&format!("{prefix}dst: &mut rt::Object,"));
        w.dedent();
        w.writeln(") -> Result<(), rt::CodecError> {");
        w.indent();
        if let Some(sup) = &plan.superclass {
            w.writeln(&format!(
                "cx.object_codec({})?.read_fields(cx, members, dst)?;",
                lit(sup)
            ));
        }
        for field in &plan.fields {
            let wire = lit(&field.wire_name);
            let name = lit(&field.name);
            let read = match &field.encoding {
                FieldEncoding::Primitive(scalar) => format!(
                    "rt::Scalar::{scalar:?}.or_zero(rt::read_field(cx, members, rt::Scalar::{scalar:?}.codec(), {wire})?)"
                ),
                FieldEncoding::Boxed(scalar) => format!(
                    "rt::read_field(cx, members, rt::Scalar::{scalar:?}.codec(), {wire})?"
                ),
                FieldEncoding::Str => format!("rt::read_field(cx, members, &rt::STRING, {wire})?"),
                FieldEncoding::Nested(_) => format!(
                    "rt::read_field(cx, members, &*self.{}, {wire})?",
                    slot(&field.name)
                ),
            };
            w.writeln(&format!("dst.set({name}, {read});"));
        }
        w.writeln("Ok(())");
        w.dedent();
        w.writeln("}");
    }

    /// The whole unit: header, every codec, and the registration functions.
    ///
    /// `sources` must be the output of [`emit_plan`](Self::emit_plan) for
    /// `plans`, in the same order.
    pub fn emit_unit(&self, plans: &[CodecPlan], sources: &[GeneratedSource]) -> String {
        let mut w = SourceWriter::new();
        w.writeln("// @generated by tessel. Do not edit.");
        w.newline();
        w.writeln("use tessel_runtime as rt;");
        w.newline();
        w.writeln("/// Member carrying the concrete type of a polymorphic value.");
        w.writeln(&format!("pub const TAG_MEMBER: &str = {};", lit(self.tag_member)));
        w.newline();
        w.writeln("/// Types with a generated codec, in generation order.");
        w.writeln("pub const CODEC_NAMES: &[&str] = &[");
        w.indent();
        for plan in plans {
            w.writeln(&format!("{},", lit(plan.name())));
        }
        w.dedent();
        w.writeln("];");

        let mut out = w.take_output();
        for source in sources {
            out.push('\n');
            out.push_str(&source.code);
        }
        out.push('\n');

        w.writeln("/// Register every codec of this unit.");
        if plans.is_empty() {
            w.writeln("pub fn register_all(_table: &mut rt::CodecTable) {}");
        } else {
            w.writeln("pub fn register_all(table: &mut rt::CodecTable) {");
            w.indent();
            for plan in plans {
                let ident = self.identity(plan.name());
                match plan {
                    CodecPlan::Object(_) => {
                        w.writeln(&format!("table.register_object(Box::new({ident}::new()));"));
                    }
                    CodecPlan::Enum(_) => w.writeln(&format!(
                        "table.register({}, Box::new({ident}()));",
                        lit(plan.name())
                    )),
                }
            }
            w.dedent();
            w.writeln("}");
        }
        w.newline();
        w.writeln("/// A table holding exactly this unit's codecs.");
        w.writeln("pub fn codec_table() -> rt::CodecTable {");
        w.indent();
        w.writeln("let mut table = rt::CodecTable::with_tag_member(TAG_MEMBER);");
        w.writeln("register_all(&mut table);");
        w.writeln("table");
        w.dedent();
        w.writeln("}");
        out.push_str(&w.take_output());
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap known-valid results")]
mod tests;
