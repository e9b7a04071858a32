//! Type classifier.
//!
//! Maps a type to the codec strategy that serializes it. Rules are applied
//! in order; the first match wins:
//!
//! 1. `void` is unsupported.
//! 2. Primitives and boxed primitives use a scalar codec.
//! 3. `std.String` uses the string codec.
//! 4. Enums need a generated codec.
//! 5. Arrays recurse into their component. Multi-dimensional arrays of
//!    primitives are unsupported.
//! 6. Parameterized lists, sets and maps pick a container codec. A raw
//!    container without type arguments is an error.
//! 7. Date, timestamp and local-date types use their built-in codec.
//! 8. `std.Object` passes through the generic value codec.
//! 9. Any other library class is unsupported.
//! 10. Everything else is a user class and needs a generated codec.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use tessel_ir::{Origin, Prim, TypeGraph, TypeId, TypeKind};

/// Why a type cannot be serialized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Unsupported {
    Void,
    MultiDimensionalPrimitiveArray,
    NoRegisteredCodec,
}

impl Unsupported {
    pub fn reason(self) -> &'static str {
        match self {
            Unsupported::Void => "`void` has no values",
            Unsupported::MultiDimensionalPrimitiveArray => {
                "multi-dimensional arrays of primitives are not supported"
            }
            Unsupported::NoRegisteredCodec => "standard library type has no registered codec",
        }
    }
}

/// How map keys travel on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKeys {
    /// `std.String` keys become member names as-is.
    Raw,
    /// Primitive keys become member names and are re-parsed on decode.
    Reparsed(Prim),
    /// Any other key type uses the `{"keys":[..],"values":[..]}` form.
    Arbitrary,
}

/// Codec strategy for one type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Primitive(Prim),
    Boxed(Prim),
    Str,
    Enum,
    Array { component: TypeId },
    List { element: TypeId },
    Set { element: TypeId },
    Map { key: TypeId, value: TypeId, keys: MapKeys },
    Date,
    Timestamp,
    LocalDate,
    /// `std.Object`.
    Any,
    /// A user class or interface. `class` is the raw class when the type
    /// is parameterized.
    UserClass { class: TypeId },
    MissingTypeArguments,
    Unsupported(Unsupported),
}

impl Classification {
    /// Whether values of this type are encoded by a generated codec.
    pub fn needs_generated_codec(&self) -> bool {
        matches!(self, Classification::Enum | Classification::UserClass { .. })
    }

    /// Whether classification failed.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Classification::MissingTypeArguments | Classification::Unsupported(_)
        )
    }
}

/// Classifier over one type graph, with memoization.
///
/// Array classification walks the component chain to find the leaf; the
/// cache keeps repeated lookups of the same field types cheap during a
/// walk.
pub struct TypeClassifier<'g> {
    graph: &'g TypeGraph,
    cache: RefCell<FxHashMap<TypeId, Classification>>,
}

impl<'g> TypeClassifier<'g> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        TypeClassifier {
            graph,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    pub fn classify(&self, id: TypeId) -> Classification {
        if let Some(cached) = self.cache.borrow().get(&id) {
            return cached.clone();
        }
        let result = classify(self.graph, id);
        self.cache.borrow_mut().insert(id, result.clone());
        result
    }
}

/// Classify `id` without caching.
pub fn classify(graph: &TypeGraph, id: TypeId) -> Classification {
    if id == TypeId::VOID {
        return Classification::Unsupported(Unsupported::Void);
    }
    match graph.kind(id) {
        TypeKind::Primitive(Prim::Void) => Classification::Unsupported(Unsupported::Void),
        TypeKind::Primitive(prim) => Classification::Primitive(*prim),
        TypeKind::Boxed(prim) => Classification::Boxed(*prim),
        TypeKind::Enum(_) => Classification::Enum,
        TypeKind::Array { component } => classify_array(graph, *component),
        TypeKind::Parameterized { raw, args } => classify_parameterized(graph, *raw, args),
        TypeKind::Class(def) | TypeKind::Interface(def) => {
            if id.is_raw_container() {
                return Classification::MissingTypeArguments;
            }
            match id {
                TypeId::STRING => Classification::Str,
                TypeId::DATE => Classification::Date,
                TypeId::TIMESTAMP => Classification::Timestamp,
                TypeId::LOCAL_DATE => Classification::LocalDate,
                TypeId::OBJECT => Classification::Any,
                _ if def.origin == Origin::Library => {
                    Classification::Unsupported(Unsupported::NoRegisteredCodec)
                }
                _ => Classification::UserClass { class: id },
            }
        }
    }
}

fn classify_array(graph: &TypeGraph, component: TypeId) -> Classification {
    let mut leaf = component;
    let mut rank = 1;
    while let TypeKind::Array { component } = graph.kind(leaf) {
        leaf = *component;
        rank += 1;
    }
    let primitive_leaf = matches!(
        graph.kind(leaf),
        TypeKind::Primitive(prim) | TypeKind::Boxed(prim) if *prim != Prim::Void
    );
    if primitive_leaf && rank > 1 {
        return Classification::Unsupported(Unsupported::MultiDimensionalPrimitiveArray);
    }
    Classification::Array { component }
}

fn classify_parameterized(graph: &TypeGraph, raw: TypeId, args: &[TypeId]) -> Classification {
    match raw {
        TypeId::LIST | TypeId::ARRAY_LIST => match args {
            [element] => Classification::List { element: *element },
            _ => Classification::MissingTypeArguments,
        },
        TypeId::SET | TypeId::HASH_SET => match args {
            [element] => Classification::Set { element: *element },
            _ => Classification::MissingTypeArguments,
        },
        TypeId::MAP | TypeId::HASH_MAP => match args {
            [key, value] => Classification::Map {
                key: *key,
                value: *value,
                keys: map_keys(graph, *key),
            },
            _ => Classification::MissingTypeArguments,
        },
        _ => match classify(graph, raw) {
            Classification::UserClass { .. } => Classification::UserClass { class: raw },
            other => other,
        },
    }
}

fn map_keys(graph: &TypeGraph, key: TypeId) -> MapKeys {
    match graph.kind(key) {
        _ if key == TypeId::STRING => MapKeys::Raw,
        TypeKind::Primitive(prim) | TypeKind::Boxed(prim) if *prim != Prim::Void => {
            MapKeys::Reparsed(*prim)
        }
        _ => MapKeys::Arbitrary,
    }
}
