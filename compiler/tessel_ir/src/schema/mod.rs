//! JSON schema loader.
//!
//! A schema file lists the type universe and the generation roots:
//!
//! ```json
//! {
//!   "roots": ["com.acme.Zoo"],
//!   "types": [
//!     { "kind": "class", "name": "com.acme.Zoo",
//!       "fields": [{ "name": "animals", "type": "List<com.acme.Animal>" }] },
//!     { "kind": "class", "name": "com.acme.Animal", "abstract": true },
//!     { "kind": "class", "name": "com.acme.Dog", "superclass": "com.acme.Animal" },
//!     { "kind": "enum", "name": "com.acme.Color", "variants": ["RED", "GREEN"] }
//!   ]
//! }
//! ```
//!
//! Types are declared in a first pass so declarations may reference each
//! other in any order.

use serde::Deserialize;

use crate::{
    FieldDef, FieldFlags, GraphError, TypeExpr, TypeExprError, TypeGraph, TypeGraphBuilder,
    TypeId, Visibility,
};

/// Errors from loading a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("in `{context}`: {source}")]
    Type {
        context: String,
        #[source]
        source: TypeExprError,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Top-level schema document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    #[serde(default)]
    pub roots: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// One declared type.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(ClassDecl),
    Enum(EnumDecl),
    /// A library class with no built-in codec. Reaching one is an error.
    Library { name: String },
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Class(c) | TypeDecl::Interface(c) => &c.name,
            TypeDecl::Enum(e) => &e.name,
            TypeDecl::Library { name } => name,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub variants: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Static,
    Final,
    Transient,
    Skip,
}

impl Modifier {
    fn flag(self) -> FieldFlags {
        match self {
            Modifier::Static => FieldFlags::STATIC,
            Modifier::Final => FieldFlags::FINAL,
            Modifier::Transient => FieldFlags::TRANSIENT,
            Modifier::Skip => FieldFlags::SKIP,
        }
    }
}

/// A built graph and its resolved roots.
#[derive(Clone, Debug)]
pub struct LoadedSchema {
    pub graph: TypeGraph,
    pub roots: Vec<TypeId>,
}

/// Parse schema JSON and build the graph.
pub fn load_schema(source: &str) -> Result<LoadedSchema, SchemaError> {
    let schema: Schema = serde_json::from_str(source)?;
    schema.build()
}

fn resolve(
    builder: &mut TypeGraphBuilder,
    context: &str,
    expr: &str,
) -> Result<TypeId, SchemaError> {
    TypeExpr::parse(expr)
        .and_then(|parsed| parsed.resolve(builder))
        .map_err(|source| SchemaError::Type {
            context: context.to_string(),
            source,
        })
}

impl Schema {
    /// Declare every type, then wire supertypes, fields and roots.
    pub fn build(&self) -> Result<LoadedSchema, SchemaError> {
        let mut builder = TypeGraphBuilder::new();
        let mut declared = Vec::with_capacity(self.types.len());

        for decl in &self.types {
            let id = match decl {
                TypeDecl::Class(c) if c.is_abstract => builder.declare_abstract_class(&c.name)?,
                TypeDecl::Class(c) => builder.declare_class(&c.name)?,
                TypeDecl::Interface(c) => builder.declare_interface(&c.name)?,
                TypeDecl::Enum(e) => builder.declare_enum(&e.name, e.variants.iter().cloned())?,
                TypeDecl::Library { name } => builder.declare_library_class(name)?,
            };
            declared.push(id);
        }

        for (decl, &id) in self.types.iter().zip(&declared) {
            let (TypeDecl::Class(class) | TypeDecl::Interface(class)) = decl else {
                continue;
            };
            if let Some(sup) = &class.superclass {
                let sup = resolve(&mut builder, &class.name, sup)?;
                builder.set_superclass(id, sup)?;
            }
            for iface in &class.interfaces {
                let iface = resolve(&mut builder, &class.name, iface)?;
                builder.add_interface(id, iface)?;
            }
            for field in &class.fields {
                let context = format!("{}.{}", class.name, field.name);
                let ty = resolve(&mut builder, &context, &field.ty)?;
                let flags = field
                    .modifiers
                    .iter()
                    .fold(FieldFlags::empty(), |acc, m| acc | m.flag());
                let mut def = FieldDef::new(&field.name, ty).with_flags(flags);
                def.visibility = field.visibility;
                builder.add_field(id, def)?;
            }
        }

        let roots = self
            .roots
            .iter()
            .map(|root| resolve(&mut builder, "roots", root))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            types = self.types.len(),
            roots = roots.len(),
            "schema loaded"
        );
        Ok(LoadedSchema {
            graph: builder.build(),
            roots,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
