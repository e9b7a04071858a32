//! The codec table.
//!
//! A [`CodecTable`] owns every generated codec of one generation unit,
//! keyed by type name. Emitted source fills it through `register_all`;
//! plans fill it through [`CodecTable::link`]. Once filled it is immutable
//! and can be shared across threads.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builtin::EnumCodec;
use crate::codec::{encode_nullable, Codec, FieldCodec};
use crate::object::{decode_object, encode_object, ObjectCodec};
use crate::plan::{CodecPlan, CodecRef};
use crate::{CodecError, JsonValue, Value};

/// Default polymorphic type tag member.
pub const DEFAULT_TAG_MEMBER: &str = "_type_";

/// Generated codecs by type name.
pub struct CodecTable {
    tag_member: String,
    objects: FxHashMap<String, Box<dyn FieldCodec>>,
    codecs: FxHashMap<String, Box<dyn Codec>>,
}

impl Default for CodecTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CodecTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut objects: Vec<_> = self.objects.keys().collect();
        objects.sort();
        let mut codecs: Vec<_> = self.codecs.keys().collect();
        codecs.sort();
        f.debug_struct("CodecTable")
            .field("tag_member", &self.tag_member)
            .field("objects", &objects)
            .field("codecs", &codecs)
            .finish()
    }
}

impl CodecTable {
    pub fn new() -> Self {
        Self::with_tag_member(DEFAULT_TAG_MEMBER)
    }

    pub fn with_tag_member(tag_member: impl Into<String>) -> Self {
        CodecTable {
            tag_member: tag_member.into(),
            objects: FxHashMap::default(),
            codecs: FxHashMap::default(),
        }
    }

    /// Member carrying the concrete type name of a polymorphic value.
    pub fn tag_member(&self) -> &str {
        &self.tag_member
    }

    /// Register an object codec under its type name, replacing any previous one.
    pub fn register_object(&mut self, codec: Box<dyn FieldCodec>) {
        let name = codec.type_name().to_string();
        trace!(%name, "register object codec");
        self.objects.insert(name, codec);
    }

    /// Register a non-object codec (an enum) under `name`.
    pub fn register(&mut self, name: impl Into<String>, codec: Box<dyn Codec>) {
        let name = name.into();
        trace!(%name, "register codec");
        self.codecs.insert(name, codec);
    }

    /// Build and register a codec for every plan.
    ///
    /// Nested codec references are built here, once; generated references
    /// stay symbolic and resolve through the table when called.
    pub fn link(&mut self, plans: &[CodecPlan]) {
        debug!(count = plans.len(), "linking codec plans");
        for plan in plans {
            match plan {
                CodecPlan::Object(object) => {
                    self.register_object(Box::new(ObjectCodec::from_plan(object)));
                }
                CodecPlan::Enum(plan) => self.register(
                    plan.type_name.clone(),
                    Box::new(EnumCodec::from_variants(
                        plan.type_name.clone(),
                        plan.variants.clone(),
                    )),
                ),
            }
        }
    }

    /// Table holding exactly the codecs for `plans`.
    pub fn from_plans(tag_member: impl Into<String>, plans: &[CodecPlan]) -> Self {
        let mut table = Self::with_tag_member(tag_member);
        table.link(plans);
        table
    }

    pub fn object_codec(&self, name: &str) -> Result<&dyn FieldCodec, CodecError> {
        self.objects
            .get(name)
            .map(|codec| &**codec)
            .ok_or_else(|| CodecError::UnknownCodec(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name) || self.codecs.contains_key(name)
    }

    /// Number of registered codecs.
    pub fn len(&self) -> usize {
        self.objects.len() + self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.codecs.is_empty()
    }

    /// Encode through the generated codec for `name`, with polymorphic
    /// dispatch.
    pub fn encode_named(&self, name: &str, out: &mut String, value: &Value) -> Result<(), CodecError> {
        if let Some(codec) = self.objects.get(name) {
            return encode_object(self, &**codec, out, value, true);
        }
        match self.codecs.get(name) {
            Some(codec) => codec.encode(self, out, value),
            None => Err(CodecError::UnknownCodec(name.to_string())),
        }
    }

    /// Decode through the generated codec for `name`, with polymorphic
    /// dispatch.
    pub fn decode_named(&self, name: &str, json: &JsonValue) -> Result<Value, CodecError> {
        if let Some(codec) = self.objects.get(name) {
            return decode_object(self, &**codec, json, true);
        }
        match self.codecs.get(name) {
            Some(codec) => codec.decode(self, json),
            None => Err(CodecError::UnknownCodec(name.to_string())),
        }
    }

    /// Encode `value` as a standalone JSON document.
    pub fn encode(&self, codec: &CodecRef, value: &Value) -> Result<String, CodecError> {
        let codec = codec.link();
        let mut out = String::new();
        encode_nullable(&*codec, self, &mut out, value)?;
        Ok(out)
    }

    /// Decode a standalone JSON document.
    pub fn decode(&self, codec: &CodecRef, text: &str) -> Result<Value, CodecError> {
        let json = JsonValue::parse(text)?;
        codec.link().decode(self, &json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap known-valid results")]
mod tests;
