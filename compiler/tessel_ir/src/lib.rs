//! Type descriptors for Tessel codec generation.
//!
//! This crate owns the closed type universe a generation session runs over:
//!
//! - [`TypeId`]: 32-bit handle with a pre-interned prelude
//! - [`TypeDescriptor`] / [`TypeKind`]: read-only shape of one type
//! - [`TypeGraph`] / [`TypeGraphBuilder`]: the universe and how to build it
//! - [`type_expr`]: `std.Map<std.String, com.acme.Dog[]>` style expressions
//! - [`schema`]: JSON schema files describing a universe and its roots

mod descriptor;
mod graph;
mod prim;
pub mod schema;
mod type_id;
pub mod type_expr;

pub use descriptor::{
    ClassDef, EnumDef, FieldDef, FieldFlags, Origin, TypeArgs, TypeDescriptor, TypeKind,
    Visibility,
};
pub use graph::{GraphError, TypeGraph, TypeGraphBuilder};
pub use prim::Prim;
pub use schema::{load_schema, LoadedSchema, Schema, SchemaError};
pub use type_expr::{resolve_type, TypeExpr, TypeExprError};
pub use type_id::TypeId;
