//! Codec plans.
//!
//! A plan is the generator's complete, data-only description of one codec:
//! which nested codec every field uses, which superclass to delegate to and
//! which subtypes to dispatch to. The generator renders plans to Rust
//! source; [`CodecTable::link`](crate::CodecTable::link) turns the same
//! plans into working codecs without a compile step. Plans are serde types
//! so the CLI can dump them.

use serde::{Deserialize, Serialize};

use crate::builtin::{Scalar, ANY, STRING};
use crate::codec::CodecHandle;
use crate::collections::{ArrayCodec, ListCodec, SetCodec};
use crate::maps::{ObjectMapCodec, StringMapCodec};
use crate::object::GeneratedRef;
use crate::time::{DATE, LOCAL_DATE, TIMESTAMP};

/// Which codec to use for one value position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "codec", content = "of", rename_all = "snake_case")]
pub enum CodecRef {
    Scalar(Scalar),
    Str,
    Date,
    Timestamp,
    LocalDate,
    /// Pass-through for `std.Object`.
    Any,
    /// A generated codec, looked up by type name at call time.
    Generated(String),
    Array(Box<CodecRef>),
    List(Box<CodecRef>),
    Set(Box<CodecRef>),
    /// Plain-object map. `key` is `None` for `std.String` keys.
    StringMap {
        key: Option<Box<CodecRef>>,
        value: Box<CodecRef>,
    },
    /// Two-array map for arbitrary keys.
    ObjectMap {
        key: Box<CodecRef>,
        value: Box<CodecRef>,
    },
}

impl CodecRef {
    /// Build the codec this reference describes.
    ///
    /// Built-in singletons are shared; every container or generated
    /// reference gets a fresh owned instance.
    pub fn link(&self) -> CodecHandle {
        match self {
            CodecRef::Scalar(scalar) => CodecHandle::Shared(scalar.codec()),
            CodecRef::Str => CodecHandle::Shared(&STRING),
            CodecRef::Date => CodecHandle::Shared(&DATE),
            CodecRef::Timestamp => CodecHandle::Shared(&TIMESTAMP),
            CodecRef::LocalDate => CodecHandle::Shared(&LOCAL_DATE),
            CodecRef::Any => CodecHandle::Shared(&ANY),
            CodecRef::Generated(name) => CodecHandle::owned(GeneratedRef::new(name.clone())),
            CodecRef::Array(element) => CodecHandle::owned(ArrayCodec::new(element.link())),
            CodecRef::List(element) => CodecHandle::owned(ListCodec::new(element.link())),
            CodecRef::Set(element) => CodecHandle::owned(SetCodec::new(element.link())),
            CodecRef::StringMap { key, value } => CodecHandle::owned(StringMapCodec::new(
                key.as_ref().map(|key| key.link()),
                value.link(),
            )),
            CodecRef::ObjectMap { key, value } => {
                CodecHandle::owned(ObjectMapCodec::new(key.link(), value.link()))
            }
        }
    }

    /// Generated codecs this reference reaches, in order of appearance.
    pub fn generated(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_generated(&mut names);
        names
    }

    fn collect_generated<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            CodecRef::Generated(name) => names.push(name),
            CodecRef::Array(inner) | CodecRef::List(inner) | CodecRef::Set(inner) => {
                inner.collect_generated(names);
            }
            CodecRef::StringMap { key, value } => {
                if let Some(key) = key {
                    key.collect_generated(names);
                }
                value.collect_generated(names);
            }
            CodecRef::ObjectMap { key, value } => {
                key.collect_generated(names);
                value.collect_generated(names);
            }
            CodecRef::Scalar(_)
            | CodecRef::Str
            | CodecRef::Date
            | CodecRef::Timestamp
            | CodecRef::LocalDate
            | CodecRef::Any => {}
        }
    }
}

/// How one field's value is written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "of", rename_all = "snake_case")]
pub enum FieldEncoding {
    /// Never null; an unset field reads as the kind's zero.
    Primitive(Scalar),
    /// Boxed primitive; may be null.
    Boxed(Scalar),
    Str,
    Nested(CodecRef),
}

impl FieldEncoding {
    pub fn codec_ref(&self) -> CodecRef {
        match self {
            FieldEncoding::Primitive(scalar) | FieldEncoding::Boxed(scalar) => {
                CodecRef::Scalar(*scalar)
            }
            FieldEncoding::Str => CodecRef::Str,
            FieldEncoding::Nested(codec) => codec.clone(),
        }
    }

    /// The primitive kind, for fields that can never be null.
    pub fn primitive(&self) -> Option<Scalar> {
        match self {
            FieldEncoding::Primitive(scalar) => Some(*scalar),
            _ => None,
        }
    }
}

/// One serializable field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPlan {
    /// Name of the field on the object.
    pub name: String,
    /// Member name on the wire.
    pub wire_name: String,
    /// Declared non-public; generated code reaches it through the object's
    /// accessor hooks either way.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub private: bool,
    pub encoding: FieldEncoding,
}

/// Codec plan for a class or interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPlan {
    pub type_name: String,
    #[serde(default)]
    pub is_abstract: bool,
    /// Superclass whose codec prints and reads the inherited fields. Only
    /// set when the superclass chain declares serializable fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    /// Concrete subtypes, transitively, sorted by name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<String>,
    /// Own fields, sorted by name.
    pub fields: Vec<FieldPlan>,
}

/// Codec plan for an enum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumPlan {
    pub type_name: String,
    pub variants: Vec<String>,
}

/// Plan for one generated codec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodecPlan {
    Object(ObjectPlan),
    Enum(EnumPlan),
}

impl CodecPlan {
    pub fn name(&self) -> &str {
        match self {
            CodecPlan::Object(plan) => &plan.type_name,
            CodecPlan::Enum(plan) => &plan.type_name,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap known-valid results")]
mod tests;
