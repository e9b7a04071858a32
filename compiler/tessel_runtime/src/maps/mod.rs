//! Map codecs.
//!
//! Maps whose keys are strings or primitives travel as a plain JSON object.
//! Any other key type uses the two-array form
//! `{"keys":[k0,k1,..],"values":[v0,v1,..]}`, zipped positionally on decode.

use crate::codec::{encode_nullable, write_field_name, Codec, CodecHandle};
use crate::json::member;
use crate::{CodecError, CodecTable, JsonValue, Value};

const KEYS: &str = "keys";
const VALUES: &str = "values";

fn map_entries(value: &Value) -> Result<&[(Value, Value)], CodecError> {
    match value {
        Value::Map(entries) => Ok(entries),
        other => Err(CodecError::UnexpectedValue {
            expected: "map",
            found: other.kind(),
        }),
    }
}

/// Append a decoded entry, rejecting a key already present.
fn insert_unique(
    entries: &mut Vec<(Value, Value)>,
    key: Value,
    value: Value,
    key_text: impl FnOnce() -> String,
) -> Result<(), CodecError> {
    if entries.iter().any(|(k, _)| *k == key) {
        return Err(CodecError::DuplicateKey(key_text()));
    }
    entries.push((key, value));
    Ok(())
}

/// Codec for maps keyed by `std.String` or a primitive.
///
/// Without a key codec, keys must be strings and are used verbatim as
/// member names. With one, the key's JSON text becomes the member name,
/// unquoted when it is a string literal; decode re-parses the name as JSON
/// before handing it to the key codec.
#[derive(Debug)]
pub struct StringMapCodec {
    key: Option<CodecHandle>,
    value: CodecHandle,
}

impl StringMapCodec {
    pub fn new(key: Option<CodecHandle>, value: CodecHandle) -> Self {
        StringMapCodec { key, value }
    }

    fn member_name(&self, cx: &CodecTable, key: &Value) -> Result<String, CodecError> {
        match (&self.key, key) {
            (None, Value::Str(s)) => Ok(s.clone()),
            (_, Value::Null) | (None, _) => Err(CodecError::UnexpectedValue {
                expected: "string map key",
                found: key.kind(),
            }),
            (Some(codec), _) => {
                let mut text = String::new();
                codec.encode(cx, &mut text, key)?;
                Ok(match JsonValue::parse(&text) {
                    Ok(JsonValue::String(s)) => s,
                    _ => text,
                })
            }
        }
    }

    fn decode_key(&self, cx: &CodecTable, name: &str) -> Result<Value, CodecError> {
        let Some(codec) = &self.key else {
            return Ok(Value::str(name));
        };
        let json = JsonValue::parse(name).unwrap_or_else(|_| JsonValue::String(name.to_string()));
        codec.decode(cx, &json)
    }
}

impl Codec for StringMapCodec {
    fn encode(&self, cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        out.push('{');
        for (i, (key, val)) in map_entries(value)?.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let name = self.member_name(cx, key)?;
            write_field_name(out, &name);
            encode_nullable(&*self.value, cx, out, val)?;
        }
        out.push('}');
        Ok(())
    }

    fn decode(&self, cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        let members = match json {
            JsonValue::Null => return Ok(Value::Null),
            JsonValue::Object(members) => members,
            other => return Err(other.unexpected("map")),
        };
        let mut entries = Vec::with_capacity(members.len());
        for (name, val) in members {
            let key = self.decode_key(cx, name)?;
            let val = self.value.decode(cx, val)?;
            insert_unique(&mut entries, key, val, || name.clone())?;
        }
        Ok(Value::Map(entries))
    }
}

/// Codec for maps with arbitrary keys.
#[derive(Debug)]
pub struct ObjectMapCodec {
    key: CodecHandle,
    value: CodecHandle,
}

impl ObjectMapCodec {
    pub fn new(key: CodecHandle, value: CodecHandle) -> Self {
        ObjectMapCodec { key, value }
    }

    fn decode_arrays(
        &self,
        cx: &CodecTable,
        keys: &[JsonValue],
        values: &[JsonValue],
    ) -> Result<Value, CodecError> {
        if keys.len() != values.len() {
            return Err(CodecError::MismatchedMapArrays {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let mut entries = Vec::with_capacity(keys.len());
        for (k, v) in keys.iter().zip(values) {
            let key = self.key.decode(cx, k)?;
            let val = self.value.decode(cx, v)?;
            insert_unique(&mut entries, key, val, || k.to_string())?;
        }
        Ok(Value::Map(entries))
    }

    fn decode_members(
        &self,
        cx: &CodecTable,
        members: &[(String, JsonValue)],
    ) -> Result<Value, CodecError> {
        let mut entries = Vec::with_capacity(members.len());
        for (name, v) in members {
            let key = self.key.decode(cx, &JsonValue::String(name.clone()))?;
            let val = self.value.decode(cx, v)?;
            insert_unique(&mut entries, key, val, || name.clone())?;
        }
        Ok(Value::Map(entries))
    }
}

/// Whether `members` is exactly the two-array form.
fn is_array_form(members: &[(String, JsonValue)]) -> bool {
    matches!(member(members, KEYS), Some(JsonValue::Array(_)))
        && members.iter().all(|(name, _)| name == KEYS || name == VALUES)
}

impl Codec for ObjectMapCodec {
    fn encode(&self, cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        let entries = map_entries(value)?;
        write_field_name_open(out, KEYS);
        for (i, (key, _)) in entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            encode_nullable(&*self.key, cx, out, key)?;
        }
        out.push_str("],");
        write_field_name(out, VALUES);
        out.push('[');
        for (i, (_, val)) in entries.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            encode_nullable(&*self.value, cx, out, val)?;
        }
        out.push_str("]}");
        Ok(())
    }

    fn decode(&self, cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        let members = match json {
            JsonValue::Null => return Ok(Value::Null),
            JsonValue::Object(members) => members,
            other => return Err(other.unexpected("map")),
        };
        if !is_array_form(members) {
            return self.decode_members(cx, members);
        }
        let keys: &[JsonValue] = match member(members, KEYS) {
            Some(JsonValue::Array(keys)) => keys.as_slice(),
            _ => &[],
        };
        let values: &[JsonValue] = match member(members, VALUES) {
            Some(JsonValue::Array(values)) => values.as_slice(),
            None | Some(JsonValue::Null) => &[],
            Some(other) => return Err(other.unexpected("array")),
        };
        self.decode_arrays(cx, keys, values)
    }
}

/// Append `{"name":[`.
fn write_field_name_open(out: &mut String, name: &str) {
    out.push('{');
    write_field_name(out, name);
    out.push('[');
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap known-valid results")]
mod tests;
