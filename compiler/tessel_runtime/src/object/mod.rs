//! The object protocol.
//!
//! Every generated object codec, whether emitted as source or linked from a
//! plan, encodes and decodes through [`encode_object`] and
//! [`decode_object`]. Those two functions own the parts that are the same
//! for every class: the braces, the polymorphic type tag and dispatch to a
//! concrete subtype's codec. Per-class field handling is the
//! [`FieldCodec`] implementation's job.
//!
//! ## Type tag
//!
//! With `check_type` set (the normal entry), a value whose runtime type is
//! a known concrete subtype of the declared type is handed to that
//! subtype's codec with the check disabled. The tag member is written first
//! whenever the codec was reached through dispatch, or when the runtime type
//! is exactly the declared type and that type has subtypes. A monomorphic
//! type never carries a tag.

use crate::codec::{write_field_name, write_separator, write_type_tag, Codec, FieldCodec};
use crate::json::member;
use crate::plan::{CodecRef, FieldPlan, ObjectPlan};
use crate::{CodecError, CodecHandle, CodecTable, JsonValue, Object, Value};

/// Encode an object value through `codec`.
pub fn encode_object(
    cx: &CodecTable,
    codec: &dyn FieldCodec,
    out: &mut String,
    value: &Value,
    check_type: bool,
) -> Result<(), CodecError> {
    let Value::Object(obj) = value else {
        return Err(CodecError::UnexpectedValue {
            expected: "object",
            found: value.kind(),
        });
    };
    tessel_stack::ensure_sufficient_stack(|| {
        if check_type && obj.type_name != codec.type_name() && codec.is_known_subtype(&obj.type_name)
        {
            let sub = cx.object_codec(&obj.type_name)?;
            return encode_object(cx, sub, out, value, false);
        }
        out.push('{');
        let mut count = 0;
        if !check_type || (obj.type_name == codec.type_name() && codec.has_subtypes()) {
            write_type_tag(out, cx.tag_member(), &obj.type_name);
            count = 1;
        }
        codec.print_fields(cx, out, obj, count)?;
        out.push('}');
        Ok(())
    })
}

/// Decode an object through `codec`.
///
/// An abstract declared type with no matching tag decodes to null.
pub fn decode_object(
    cx: &CodecTable,
    codec: &dyn FieldCodec,
    json: &JsonValue,
    check_type: bool,
) -> Result<Value, CodecError> {
    let members = match json {
        JsonValue::Null => return Ok(Value::Null),
        JsonValue::Object(members) => members,
        other => return Err(other.unexpected("object")),
    };
    tessel_stack::ensure_sufficient_stack(|| {
        if check_type && codec.has_subtypes() {
            let tag = member(members, cx.tag_member()).and_then(JsonValue::as_str);
            if let Some(tag) = tag {
                if tag != codec.type_name() && codec.is_known_subtype(tag) {
                    let sub = cx.object_codec(tag)?;
                    return decode_object(cx, sub, json, false);
                }
            }
        }
        if codec.is_abstract() {
            return Ok(Value::Null);
        }
        let mut obj = Object::new(codec.type_name());
        codec.read_fields(cx, members, &mut obj)?;
        Ok(Value::Object(obj))
    })
}

/// Write one member when `value` is present. Returns the new member count.
pub fn print_field(
    cx: &CodecTable,
    out: &mut String,
    codec: &dyn Codec,
    wire_name: &str,
    value: Option<&Value>,
    count: usize,
) -> Result<usize, CodecError> {
    let Some(value) = value else {
        return Ok(count);
    };
    write_separator(out, count);
    write_field_name(out, wire_name);
    codec.encode(cx, out, value)?;
    Ok(count + 1)
}

/// Decode the member named `wire_name`. A missing member reads as null.
pub fn read_field(
    cx: &CodecTable,
    members: &[(String, JsonValue)],
    codec: &dyn Codec,
    wire_name: &str,
) -> Result<Value, CodecError> {
    match member(members, wire_name) {
        Some(json) => codec.decode(cx, json),
        None => Ok(Value::Null),
    }
}

/// A reference to a generated codec, resolved by type name on each call.
///
/// Holding the name instead of the codec keeps self-referential and
/// mutually recursive types free of ownership cycles.
#[derive(Clone, Debug)]
pub struct GeneratedRef {
    name: String,
}

impl GeneratedRef {
    pub fn new(name: impl Into<String>) -> Self {
        GeneratedRef { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Codec for GeneratedRef {
    fn encode(&self, cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        cx.encode_named(&self.name, out, value)
    }

    fn decode(&self, cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        cx.decode_named(&self.name, json)
    }
}

#[derive(Debug)]
struct LinkedField {
    plan: FieldPlan,
    codec: CodecHandle,
}

/// Object codec driven by an [`ObjectPlan`].
///
/// Behaves exactly like the source the generator emits for the same plan.
#[derive(Debug)]
pub struct ObjectCodec {
    type_name: String,
    is_abstract: bool,
    superclass: Option<String>,
    subtypes: Vec<String>,
    fields: Vec<LinkedField>,
}

impl ObjectCodec {
    pub fn from_plan(plan: &ObjectPlan) -> Self {
        let fields = plan
            .fields
            .iter()
            .map(|field| LinkedField {
                codec: field.encoding.codec_ref().link(),
                plan: field.clone(),
            })
            .collect();
        ObjectCodec {
            type_name: plan.type_name.clone(),
            is_abstract: plan.is_abstract,
            superclass: plan.superclass.clone(),
            subtypes: plan.subtypes.clone(),
            fields,
        }
    }

    /// Own field codec references, for inspection.
    pub fn field_refs(&self) -> impl Iterator<Item = (&str, CodecRef)> {
        self.fields
            .iter()
            .map(|f| (f.plan.name.as_str(), f.plan.encoding.codec_ref()))
    }
}

impl FieldCodec for ObjectCodec {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    fn has_subtypes(&self) -> bool {
        !self.subtypes.is_empty()
    }

    fn is_known_subtype(&self, name: &str) -> bool {
        self.subtypes.binary_search_by(|s| s.as_str().cmp(name)).is_ok()
    }

    fn print_fields(
        &self,
        cx: &CodecTable,
        out: &mut String,
        src: &Object,
        mut count: usize,
    ) -> Result<usize, CodecError> {
        if let Some(sup) = &self.superclass {
            count = cx.object_codec(sup)?.print_fields(cx, out, src, count)?;
        }
        for field in &self.fields {
            let value = match field.plan.encoding.primitive() {
                Some(scalar) => Some(src.get(&field.plan.name).unwrap_or(scalar.zero())),
                None => src.get(&field.plan.name),
            };
            count = print_field(cx, out, &*field.codec, &field.plan.wire_name, value, count)?;
        }
        Ok(count)
    }

    fn read_fields(
        &self,
        cx: &CodecTable,
        members: &[(String, JsonValue)],
        dst: &mut Object,
    ) -> Result<(), CodecError> {
        if let Some(sup) = &self.superclass {
            cx.object_codec(sup)?.read_fields(cx, members, dst)?;
        }
        for field in &self.fields {
            let value = read_field(cx, members, &*field.codec, &field.plan.wire_name)?;
            let value = match field.plan.encoding.primitive() {
                Some(scalar) => scalar.or_zero(value),
                None => value,
            };
            dst.set(&field.plan.name, value);
        }
        Ok(())
    }
}
