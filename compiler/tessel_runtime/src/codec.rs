//! The codec contract.
//!
//! Every codec, built-in or generated, implements [`Codec`]: append JSON
//! text for a non-null value, or turn a parsed [`JsonValue`] back into a
//! [`Value`]. Generated object codecs additionally implement
//! [`FieldCodec`], the field-level half that lets a subclass codec emit and
//! read its superclass's fields inside one flat JSON object.
//!
//! Codecs receive the [`CodecTable`] they were linked into. References to
//! generated codecs are resolved by name through it at call time, which is
//! what lets a type refer to itself without an ownership cycle.

use std::fmt;
use std::ops::Deref;

use crate::{CodecError, CodecTable, JsonValue, Object, Value};

/// Paired encode/decode routine for one type.
pub trait Codec: Send + Sync {
    /// Append the JSON text of `value`. Never called with [`Value::Null`];
    /// use [`encode_nullable`] where null is possible.
    fn encode(&self, cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError>;

    /// Decode `json`. JSON `null` decodes to [`Value::Null`].
    fn decode(&self, cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError>;
}

/// Encode `value`, writing `null` for [`Value::Null`].
pub fn encode_nullable(
    codec: &dyn Codec,
    cx: &CodecTable,
    out: &mut String,
    value: &Value,
) -> Result<(), CodecError> {
    if value.is_null() {
        out.push_str("null");
        Ok(())
    } else {
        codec.encode(cx, out, value)
    }
}

/// A codec reference held by a container codec or an object field.
///
/// Built-in singletons are shared; parameterized instances are owned by
/// the one field or container that built them.
pub enum CodecHandle {
    Shared(&'static dyn Codec),
    Owned(Box<dyn Codec>),
}

impl CodecHandle {
    pub fn owned(codec: impl Codec + 'static) -> Self {
        CodecHandle::Owned(Box::new(codec))
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, CodecHandle::Shared(_))
    }
}

impl Deref for CodecHandle {
    type Target = dyn Codec;

    fn deref(&self) -> &Self::Target {
        match self {
            CodecHandle::Shared(codec) => *codec,
            CodecHandle::Owned(codec) => codec.as_ref(),
        }
    }
}

impl fmt::Debug for CodecHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecHandle::Shared(_) => f.write_str("CodecHandle::Shared"),
            CodecHandle::Owned(_) => f.write_str("CodecHandle::Owned"),
        }
    }
}

/// Field-level half of a generated object codec.
///
/// The object-level protocol (braces, type tag, subtype dispatch) lives in
/// [`encode_object`](crate::encode_object) and
/// [`decode_object`](crate::decode_object); implementations only deal with
/// their own fields, after delegating to their superclass codec.
pub trait FieldCodec: Send + Sync {
    /// Qualified name of the type this codec was generated for.
    fn type_name(&self) -> &str;

    /// Abstract classes and interfaces are never allocated by decode.
    fn is_abstract(&self) -> bool;

    /// Whether the type has concrete subtypes to dispatch to.
    fn has_subtypes(&self) -> bool;

    /// Whether `name` is one of the concrete subtypes.
    fn is_known_subtype(&self, name: &str) -> bool;

    /// Emit the superclass's fields, then this type's own non-null fields,
    /// into an already opened JSON object. `count` is the number of members
    /// written so far; the new count is returned.
    fn print_fields(
        &self,
        cx: &CodecTable,
        out: &mut String,
        src: &Object,
        count: usize,
    ) -> Result<usize, CodecError>;

    /// Read the superclass's fields, then this type's own, into `dst`.
    /// Missing members leave the field at its default.
    fn read_fields(
        &self,
        cx: &CodecTable,
        members: &[(String, JsonValue)],
        dst: &mut Object,
    ) -> Result<(), CodecError>;
}

/// Append `"name":`.
pub fn write_field_name(out: &mut String, name: &str) {
    crate::json::write_json_string(out, name);
    out.push(':');
}

/// Append the comma separating members, given how many precede.
#[inline]
pub fn write_separator(out: &mut String, count: usize) {
    if count > 0 {
        out.push(',');
    }
}

/// Append the polymorphic type tag member.
pub fn write_type_tag(out: &mut String, tag_member: &str, type_name: &str) {
    write_field_name(out, tag_member);
    crate::json::write_json_string(out, type_name);
}
