//! Array, list and set codecs.
//!
//! All three encode as a JSON array, element by element through the nested
//! codec, with `null` for null elements. They differ only in the [`Value`]
//! shape they accept and produce; decoding a set collapses duplicates.

use crate::codec::{encode_nullable, Codec, CodecHandle};
use crate::{CodecError, CodecTable, JsonValue, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Shape {
    Array,
    List,
    Set,
}

impl Shape {
    fn name(self) -> &'static str {
        match self {
            Shape::Array => "array",
            Shape::List => "list",
            Shape::Set => "set",
        }
    }

    fn items(self, value: &Value) -> Option<&[Value]> {
        match (self, value) {
            (Shape::Array, Value::Array(items))
            | (Shape::List, Value::List(items))
            | (Shape::Set, Value::Set(items)) => Some(items),
            _ => None,
        }
    }

    fn wrap(self, items: Vec<Value>) -> Value {
        match self {
            Shape::Array => Value::Array(items),
            Shape::List => Value::List(items),
            Shape::Set => Value::Set(items),
        }
    }
}

fn encode_items(
    element: &dyn Codec,
    cx: &CodecTable,
    out: &mut String,
    items: &[Value],
) -> Result<(), CodecError> {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        encode_nullable(element, cx, out, item)?;
    }
    out.push(']');
    Ok(())
}

fn decode_items(
    element: &dyn Codec,
    cx: &CodecTable,
    json: &JsonValue,
    shape: Shape,
) -> Result<Option<Vec<Value>>, CodecError> {
    match json {
        JsonValue::Null => Ok(None),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| element.decode(cx, item))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        other => Err(other.unexpected(shape.name())),
    }
}

macro_rules! sequence_codec {
    ($(#[$meta:meta])* $name:ident, $shape:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            element: CodecHandle,
        }

        impl $name {
            pub fn new(element: CodecHandle) -> Self {
                $name { element }
            }
        }

        impl Codec for $name {
            fn encode(
                &self,
                cx: &CodecTable,
                out: &mut String,
                value: &Value,
            ) -> Result<(), CodecError> {
                let items = $shape.items(value).ok_or(CodecError::UnexpectedValue {
                    expected: $shape.name(),
                    found: value.kind(),
                })?;
                encode_items(&*self.element, cx, out, items)
            }

            fn decode(&self, cx: &CodecTable, json: &JsonValue) -> Result<Value, CodecError> {
                Ok(match decode_items(&*self.element, cx, json, $shape)? {
                    Some(items) => finish($shape, items),
                    None => Value::Null,
                })
            }
        }
    };
}

fn finish(shape: Shape, items: Vec<Value>) -> Value {
    if shape != Shape::Set {
        return shape.wrap(items);
    }
    let mut unique: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    shape.wrap(unique)
}

sequence_codec!(
    /// Codec for `T[]`.
    ArrayCodec,
    Shape::Array
);
sequence_codec!(
    /// Codec for `std.List<T>` and `std.ArrayList<T>`.
    ListCodec,
    Shape::List
);
sequence_codec!(
    /// Codec for `std.Set<T>` and `std.HashSet<T>`.
    SetCodec,
    Shape::Set
);
