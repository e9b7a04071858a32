//! Tessel runtime: the codec contract generated JSON codecs implement, the
//! built-in codecs they compose with, and the table that links them.
//!
//! # Layout
//!
//! - [`codec`]: the [`Codec`] and [`FieldCodec`] traits
//! - [`value`]: the dynamic object model ([`Value`], [`Object`])
//! - [`json`]: duplicate-preserving parsed JSON
//! - [`builtin`], [`collections`], [`maps`], [`time`]: built-in codecs
//! - [`object`]: the shared object protocol and plan-driven object codecs
//! - [`plan`]: codec plans, the generator's output
//! - [`table`]: [`CodecTable`], linking and top-level encode/decode

pub mod builtin;
pub mod codec;
pub mod collections;
mod error;
pub mod json;
pub mod maps;
pub mod object;
pub mod plan;
pub mod table;
pub mod time;
pub mod value;

pub use builtin::{first_char, AnyCodec, EnumCodec, Scalar, ScalarCodec, StringCodec, ANY, STRING};
pub use codec::{
    encode_nullable, write_field_name, write_separator, write_type_tag, Codec, CodecHandle,
    FieldCodec,
};
pub use collections::{ArrayCodec, ListCodec, SetCodec};
pub use error::{CodecError, TimestampError};
pub use json::JsonValue;
pub use maps::{ObjectMapCodec, StringMapCodec};
pub use object::{
    decode_object, encode_object, print_field, read_field, GeneratedRef, ObjectCodec,
};
pub use plan::{CodecPlan, CodecRef, EnumPlan, FieldEncoding, FieldPlan, ObjectPlan};
pub use table::{CodecTable, DEFAULT_TAG_MEMBER};
pub use time::{format_timestamp, parse_timestamp, DATE, LOCAL_DATE, TIMESTAMP};
pub use value::{Object, Value};
