//! Codec plan construction.
//!
//! Turns each registered type into a [`CodecPlan`], in the registry's
//! generation order. Every field type is resolved to the codec reference
//! its generated code will hold; generated codecs are referenced by type
//! name, so a plan never needs its dependencies' plans to exist yet.

use tessel_diagnostic::{Diagnostic, ErrorCode};
use tessel_ir::{Prim, TypeId, TypeKind, Visibility};
use tessel_runtime::{CodecPlan, CodecRef, EnumPlan, FieldEncoding, FieldPlan, ObjectPlan, Scalar};

use crate::classify::{Classification, MapKeys, TypeClassifier};
use crate::registry::GenerationRegistry;
use crate::walk::internal_error;

/// Builds plans for one session's registered types.
pub struct PlanBuilder<'a, 'g> {
    classifier: &'a TypeClassifier<'g>,
    strip_prefix: Option<&'a str>,
}

impl<'a, 'g> PlanBuilder<'a, 'g> {
    pub fn new(classifier: &'a TypeClassifier<'g>, strip_prefix: Option<&'a str>) -> Self {
        PlanBuilder {
            classifier,
            strip_prefix: strip_prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Plan every registered type, moving each record through
    /// `InProgress` to `Complete`.
    pub fn build_all(&self, registry: &mut GenerationRegistry) -> Result<Vec<CodecPlan>, Diagnostic> {
        let order = registry.generation_order();
        let mut plans = Vec::with_capacity(order.len());
        for id in order {
            registry.begin(id).map_err(|err| internal_error(&err))?;
            plans.push(self.plan(id)?);
            registry.complete(id).map_err(|err| internal_error(&err))?;
        }
        tracing::debug!(count = plans.len(), "codec plans built");
        Ok(plans)
    }

    /// Plan for one enum, class or interface.
    pub fn plan(&self, id: TypeId) -> Result<CodecPlan, Diagnostic> {
        let graph = self.classifier.graph();
        let type_name = graph.name(id).to_string();
        match graph.kind(id) {
            TypeKind::Enum(def) => Ok(CodecPlan::Enum(EnumPlan {
                type_name,
                variants: def.variants.clone(),
            })),
            TypeKind::Class(_) | TypeKind::Interface(_) => {
                let superclass = if graph.has_inherited_fields(id) {
                    graph.superclass(id).map(|sup| graph.name(sup).to_string())
                } else {
                    None
                };
                let subtypes = graph
                    .concrete_subtypes(id)
                    .map(|sub| graph.name(sub).to_string())
                    .collect();
                let declared = graph.serializable_fields(id);
                let mut fields = Vec::with_capacity(declared.len());
                for field in &declared {
                    let wire_name = match self.stripped(&field.name) {
                        Some(short) if !declared.iter().any(|f| f.name == short) => short,
                        _ => field.name.clone(),
                    };
                    fields.push(FieldPlan {
                        name: field.name.clone(),
                        wire_name,
                        private: field.visibility == Visibility::Private,
                        encoding: self.field_encoding(field.ty)?,
                    });
                }
                tracing::trace!(%type_name, fields = fields.len(), "object plan");
                Ok(CodecPlan::Object(ObjectPlan {
                    type_name,
                    is_abstract: graph.is_abstract(id),
                    superclass,
                    subtypes,
                    fields,
                }))
            }
            _ => Err(unplannable(&type_name)),
        }
    }

    /// `myName` becomes `name` under prefix `my`. The character after the
    /// prefix must be uppercase.
    fn stripped(&self, field: &str) -> Option<String> {
        let rest = field.strip_prefix(self.strip_prefix?)?;
        let mut chars = rest.chars();
        let first = chars.next().filter(char::is_ascii_uppercase)?;
        let mut short = String::with_capacity(rest.len());
        short.push(first.to_ascii_lowercase());
        short.push_str(chars.as_str());
        Some(short)
    }

    fn field_encoding(&self, ty: TypeId) -> Result<FieldEncoding, Diagnostic> {
        let graph = self.classifier.graph();
        Ok(match self.classifier.classify(ty) {
            Classification::Primitive(prim) => {
                FieldEncoding::Primitive(scalar(prim).ok_or_else(|| unplannable(graph.name(ty)))?)
            }
            Classification::Boxed(prim) => {
                FieldEncoding::Boxed(scalar(prim).ok_or_else(|| unplannable(graph.name(ty)))?)
            }
            Classification::Str => FieldEncoding::Str,
            _ => FieldEncoding::Nested(self.codec_ref(ty)?),
        })
    }

    /// Codec reference for a value of type `ty`.
    pub fn codec_ref(&self, ty: TypeId) -> Result<CodecRef, Diagnostic> {
        let graph = self.classifier.graph();
        let nested = |id: TypeId| self.codec_ref(id).map(Box::new);
        Ok(match self.classifier.classify(ty) {
            Classification::Primitive(prim) | Classification::Boxed(prim) => {
                CodecRef::Scalar(scalar(prim).ok_or_else(|| unplannable(graph.name(ty)))?)
            }
            Classification::Str => CodecRef::Str,
            Classification::Date => CodecRef::Date,
            Classification::Timestamp => CodecRef::Timestamp,
            Classification::LocalDate => CodecRef::LocalDate,
            Classification::Any => CodecRef::Any,
            Classification::Enum => CodecRef::Generated(graph.name(ty).to_string()),
            Classification::UserClass { class } => {
                CodecRef::Generated(graph.name(class).to_string())
            }
            Classification::Array { component } => CodecRef::Array(nested(component)?),
            Classification::List { element } => CodecRef::List(nested(element)?),
            Classification::Set { element } => CodecRef::Set(nested(element)?),
            Classification::Map { key, value, keys } => match keys {
                MapKeys::Raw => CodecRef::StringMap {
                    key: None,
                    value: nested(value)?,
                },
                MapKeys::Reparsed(_) => CodecRef::StringMap {
                    key: Some(nested(key)?),
                    value: nested(value)?,
                },
                MapKeys::Arbitrary => CodecRef::ObjectMap {
                    key: nested(key)?,
                    value: nested(value)?,
                },
            },
            Classification::MissingTypeArguments | Classification::Unsupported(_) => {
                return Err(unplannable(graph.name(ty)));
            }
        })
    }
}

/// Scalar codec kind for a primitive.
pub fn scalar(prim: Prim) -> Option<Scalar> {
    Some(match prim {
        Prim::Boolean => Scalar::Boolean,
        Prim::Byte => Scalar::Byte,
        Prim::Char => Scalar::Char,
        Prim::Short => Scalar::Short,
        Prim::Int => Scalar::Int,
        Prim::Long => Scalar::Long,
        Prim::Float => Scalar::Float,
        Prim::Double => Scalar::Double,
        Prim::Void => return None,
    })
}

/// The walker rejects every type without a plan, so reaching one here is a
/// generator bug.
fn unplannable(type_name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message(format!("internal generator error: no codec plan for `{type_name}`"))
}
