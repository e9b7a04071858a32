//! Built-in scalar, string, enum and pass-through codecs.
//!
//! Boxed primitives share the codec of their primitive. Decoding is lenient
//! about representation (a number may arrive as a numeric string) but exact
//! about value: out-of-range or non-integral input is rejected, never
//! truncated.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::codec::{encode_nullable, Codec};
use crate::json::write_json_string;
use crate::{CodecError, CodecTable, JsonValue, Value};

/// Primitive kinds with a scalar codec.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

static ZEROS: [Value; 8] = [
    Value::Bool(false),
    Value::Byte(0),
    Value::Char('\0'),
    Value::Short(0),
    Value::Int(0),
    Value::Long(0),
    Value::Float(0.0),
    Value::Double(0.0),
];

static SCALARS: [ScalarCodec; 8] = [
    ScalarCodec(Scalar::Boolean),
    ScalarCodec(Scalar::Byte),
    ScalarCodec(Scalar::Char),
    ScalarCodec(Scalar::Short),
    ScalarCodec(Scalar::Int),
    ScalarCodec(Scalar::Long),
    ScalarCodec(Scalar::Float),
    ScalarCodec(Scalar::Double),
];

impl Scalar {
    pub const ALL: [Scalar; 8] = [
        Scalar::Boolean,
        Scalar::Byte,
        Scalar::Char,
        Scalar::Short,
        Scalar::Int,
        Scalar::Long,
        Scalar::Float,
        Scalar::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scalar::Boolean => "boolean",
            Scalar::Byte => "byte",
            Scalar::Char => "char",
            Scalar::Short => "short",
            Scalar::Int => "int",
            Scalar::Long => "long",
            Scalar::Float => "float",
            Scalar::Double => "double",
        }
    }

    /// Default value of an unset primitive field.
    pub fn zero(self) -> &'static Value {
        &ZEROS[self as usize]
    }

    /// `value`, or the zero of this kind when it is null.
    pub fn or_zero(self, value: Value) -> Value {
        if value.is_null() {
            self.zero().clone()
        } else {
            value
        }
    }

    /// The shared codec for this kind.
    pub fn codec(self) -> &'static ScalarCodec {
        &SCALARS[self as usize]
    }
}

/// Codec for one primitive kind.
#[derive(Debug)]
pub struct ScalarCodec(pub Scalar);

fn malformed(kind: Scalar, text: impl Into<String>) -> CodecError {
    CodecError::MalformedNumber {
        kind: kind.name(),
        text: text.into(),
    }
}

/// Integer from a JSON number or numeric string, range-checked.
fn decode_int<T>(kind: Scalar, json: &JsonValue) -> Result<T, CodecError>
where
    T: TryFrom<i64> + FromStr,
{
    match json {
        JsonValue::Number(n) => integral(n)
            .and_then(|i| T::try_from(i).ok())
            .ok_or_else(|| malformed(kind, n.to_string())),
        JsonValue::String(s) => s.trim().parse::<T>().map_err(|_| malformed(kind, s.as_str())),
        other => Err(other.unexpected(kind.name())),
    }
}

/// Exact integer value of a JSON number. Floats count only when they are
/// whole and within the exactly representable range.
fn integral(n: &Number) -> Option<i64> {
    const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.fract() != 0.0 || f.abs() > EXACT {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, reason = "checked whole and in range")]
    let i = f as i64;
    Some(i)
}

fn decode_float<T: FromStr>(kind: Scalar, json: &JsonValue) -> Result<f64, CodecError>
where
    T: Into<f64>,
{
    match json {
        JsonValue::Number(n) => n.as_f64().ok_or_else(|| malformed(kind, n.to_string())),
        JsonValue::String(s) => s
            .trim()
            .parse::<T>()
            .map(Into::into)
            .map_err(|_| malformed(kind, s.as_str())),
        other => Err(other.unexpected(kind.name())),
    }
}

impl ScalarCodec {
    fn mismatch(&self, value: &Value) -> CodecError {
        CodecError::UnexpectedValue {
            expected: self.0.name(),
            found: value.kind(),
        }
    }
}

impl Codec for ScalarCodec {
    fn encode(&self, _cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        match (self.0, value) {
            (Scalar::Boolean, Value::Bool(b)) => out.push_str(if *b { "true" } else { "false" }),
            (Scalar::Byte, Value::Byte(v)) => out.push_str(&v.to_string()),
            (Scalar::Short, Value::Short(v)) => out.push_str(&v.to_string()),
            (Scalar::Int, Value::Int(v)) => out.push_str(&v.to_string()),
            // Wider than a JSON number can carry exactly.
            (Scalar::Long, Value::Long(v)) => {
                out.push('"');
                out.push_str(&v.to_string());
                out.push('"');
            }
            (Scalar::Float, Value::Float(v)) => {
                if !v.is_finite() {
                    return Err(CodecError::NonFiniteNumber("float"));
                }
                out.push_str(&serde_json::to_string(v)?);
            }
            (Scalar::Double, Value::Double(v)) => {
                if !v.is_finite() {
                    return Err(CodecError::NonFiniteNumber("double"));
                }
                out.push_str(&serde_json::to_string(v)?);
            }
            (Scalar::Char, Value::Char(c)) => {
                let mut buf = [0u8; 4];
                write_json_string(out, c.encode_utf8(&mut buf));
            }
            _ => return Err(self.mismatch(value)),
        }
        Ok(())
    }

    fn decode(&self, _cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        if json.is_null() {
            return Ok(Value::Null);
        }
        let kind = self.0;
        Ok(match kind {
            Scalar::Boolean => match json {
                JsonValue::Bool(b) => Value::Bool(*b),
                JsonValue::String(s) => match s.trim() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => return Err(malformed(kind, s.as_str())),
                },
                other => return Err(other.unexpected("boolean")),
            },
            Scalar::Byte => Value::Byte(decode_int(kind, json)?),
            Scalar::Short => Value::Short(decode_int(kind, json)?),
            Scalar::Int => Value::Int(decode_int(kind, json)?),
            Scalar::Long => Value::Long(decode_int(kind, json)?),
            #[allow(clippy::cast_possible_truncation, reason = "float fields are 32-bit")]
            Scalar::Float => Value::Float(decode_float::<f32>(kind, json)? as f32),
            Scalar::Double => Value::Double(decode_float::<f64>(kind, json)?),
            Scalar::Char => match json {
                JsonValue::String(s) => Value::Char(first_char(s)),
                JsonValue::Number(n) => Value::Char(first_char(&n.to_string())),
                other => return Err(other.unexpected("char")),
            },
        })
    }
}

/// First character of `s`, or `'\0'` when empty.
pub fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or('\0')
}

/// Codec for `std.String`.
#[derive(Debug)]
pub struct StringCodec;

pub static STRING: StringCodec = StringCodec;

impl Codec for StringCodec {
    fn encode(&self, _cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        match value {
            Value::Str(s) => {
                write_json_string(out, s);
                Ok(())
            }
            other => Err(CodecError::UnexpectedValue {
                expected: "string",
                found: other.kind(),
            }),
        }
    }

    fn decode(&self, _cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::String(s) => Ok(Value::Str(s.clone())),
            other => Err(other.unexpected("string")),
        }
    }
}

/// Name-based codec for one enum type.
#[derive(Debug, Clone)]
pub struct EnumCodec {
    type_name: String,
    variants: Vec<String>,
}

impl EnumCodec {
    pub fn new(type_name: impl Into<String>, variants: &[&str]) -> Self {
        EnumCodec {
            type_name: type_name.into(),
            variants: variants.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    pub fn from_variants(type_name: impl Into<String>, variants: Vec<String>) -> Self {
        EnumCodec {
            type_name: type_name.into(),
            variants,
        }
    }

    fn check(&self, name: &str) -> Result<(), CodecError> {
        if self.variants.iter().any(|v| v == name) {
            Ok(())
        } else {
            Err(CodecError::UnknownVariant {
                type_name: self.type_name.clone(),
                name: name.to_string(),
            })
        }
    }
}

impl Codec for EnumCodec {
    fn encode(&self, _cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        match value {
            Value::Enum { variant, .. } => {
                self.check(variant)?;
                write_json_string(out, variant);
                Ok(())
            }
            other => Err(CodecError::UnexpectedValue {
                expected: "enum",
                found: other.kind(),
            }),
        }
    }

    fn decode(&self, _cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::String(name) => {
                self.check(name)?;
                Ok(Value::variant(self.type_name.as_str(), name.as_str()))
            }
            other => Err(other.unexpected("enum variant name")),
        }
    }
}

/// Pass-through codec for values declared as `std.Object`.
///
/// Without a declared type the mapping is structural: integers decode as
/// `int` when they fit and `long` otherwise, other numbers as `double`,
/// arrays as lists and untagged objects as string-keyed maps. A `long` is
/// written as a JSON string, like its declared codec, so it reads back as a
/// string. Objects of a registered generated type are written
/// with their type tag and decode back through that codec.
#[derive(Debug)]
pub struct AnyCodec;

pub static ANY: AnyCodec = AnyCodec;

impl Codec for AnyCodec {
    fn encode(&self, cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        tessel_stack::ensure_sufficient_stack(|| Self::encode_value(cx, out, value))
    }

    fn decode(&self, cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        tessel_stack::ensure_sufficient_stack(|| Self::decode_value(cx, json))
    }
}

impl AnyCodec {
    fn encode_items(cx: &CodecTable, out: &mut String, items: &[Value]) -> Result<(), CodecError> {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            encode_nullable(&ANY, cx, out, item)?;
        }
        out.push(']');
        Ok(())
    }

    fn encode_value(cx: &CodecTable, out: &mut String, value: &Value) -> Result<(), CodecError> {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Byte(v) => out.push_str(&v.to_string()),
            Value::Short(v) => out.push_str(&v.to_string()),
            Value::Int(v) => out.push_str(&v.to_string()),
            Value::Long(_) => Scalar::Long.codec().encode(cx, out, value)?,
            Value::Float(_) => Scalar::Float.codec().encode(cx, out, value)?,
            Value::Double(_) => Scalar::Double.codec().encode(cx, out, value)?,
            Value::Char(_) => Scalar::Char.codec().encode(cx, out, value)?,
            Value::Str(s) | Value::Enum { variant: s, .. } => write_json_string(out, s),
            Value::Date(_) => crate::time::DATE.encode(cx, out, value)?,
            Value::Timestamp(_) => crate::time::TIMESTAMP.encode(cx, out, value)?,
            Value::LocalDate(_) => crate::time::LOCAL_DATE.encode(cx, out, value)?,
            Value::Array(items) | Value::List(items) | Value::Set(items) => {
                Self::encode_items(cx, out, items)?;
            }
            Value::Map(entries) => {
                out.push('{');
                for (i, (key, val)) in entries.iter().enumerate() {
                    let Value::Str(key) = key else {
                        return Err(CodecError::UnexpectedValue {
                            expected: "string map key",
                            found: key.kind(),
                        });
                    };
                    if i > 0 {
                        out.push(',');
                    }
                    crate::codec::write_field_name(out, key);
                    encode_nullable(&ANY, cx, out, val)?;
                }
                out.push('}');
            }
            Value::Object(obj) => {
                let codec = cx.object_codec(&obj.type_name)?;
                crate::object::encode_object(cx, codec, out, value, false)?;
            }
        }
        Ok(())
    }

    fn decode_value(cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
        Ok(match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => i32::try_from(i).map_or(Value::Long(i), Value::Int),
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::Str(s.clone()),
            JsonValue::Array(items) => Value::List(
                items
                    .iter()
                    .map(|item| ANY.decode(cx, item))
                    .collect::<Result<_, _>>()?,
            ),
            JsonValue::Object(members) => {
                let tagged = json
                    .get(cx.tag_member())
                    .and_then(JsonValue::as_str)
                    .and_then(|tag| cx.object_codec(tag).ok());
                if let Some(codec) = tagged {
                    return crate::object::decode_object(cx, codec, json, false);
                }
                Value::Map(
                    members
                        .iter()
                        .map(|(k, v)| Ok((Value::Str(k.clone()), ANY.decode(cx, v)?)))
                        .collect::<Result<_, CodecError>>()?,
                )
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap known-valid results")]
mod tests;
