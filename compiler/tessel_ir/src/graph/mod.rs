//! The type universe of one generation session.
//!
//! [`TypeGraphBuilder`] collects declarations (programmatically or from a
//! [`schema`](crate::schema)), interns array and parameterized types, and
//! [`build`](TypeGraphBuilder::build)s an immutable [`TypeGraph`]. Building
//! computes the transitive subtype lists once, so generation is a pure
//! traversal over a closed universe.
//!
//! # Prelude
//!
//! Primitives, boxed primitives, `std.String`, `std.Object`, the date types
//! and the raw containers are interned at the fixed [`TypeId`] constants.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    ClassDef, EnumDef, FieldDef, Origin, Prim, TypeArgs, TypeDescriptor, TypeId, TypeKind,
};

/// Errors raised while declaring types.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("type `{0}` is declared twice")]
    DuplicateType(String),
    #[error("`{0}` is not a class or interface")]
    NotAClass(String),
    #[error("`{raw}` expects {expected} type argument(s), found {found}")]
    ArityMismatch {
        raw: String,
        expected: usize,
        found: usize,
    },
    #[error("`{0}` would become its own superclass")]
    SuperclassCycle(String),
}

/// Immutable type universe.
#[derive(Clone, Debug)]
pub struct TypeGraph {
    types: Vec<TypeDescriptor>,
    by_name: FxHashMap<String, TypeId>,
    /// Transitive declared subtypes per class/interface, sorted by name.
    subtypes: FxHashMap<TypeId, Vec<TypeId>>,
}

impl TypeGraph {
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.get(id).kind
    }

    #[inline]
    pub fn name(&self, id: TypeId) -> &str {
        &self.get(id).name
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All ids in declaration order. Reserved slots are skipped.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.by_name.values().copied().collect::<std::collections::BTreeSet<_>>().into_iter()
    }

    /// Class or interface body, if the type is one.
    pub fn class_def(&self, id: TypeId) -> Option<&ClassDef> {
        match self.kind(id) {
            TypeKind::Class(def) | TypeKind::Interface(def) => Some(def),
            _ => None,
        }
    }

    pub fn enum_def(&self, id: TypeId) -> Option<&EnumDef> {
        match self.kind(id) {
            TypeKind::Enum(def) => Some(def),
            _ => None,
        }
    }

    pub fn is_interface(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Interface(_))
    }

    /// Abstract classes and interfaces cannot be instantiated.
    pub fn is_abstract(&self, id: TypeId) -> bool {
        match self.kind(id) {
            TypeKind::Interface(_) => true,
            TypeKind::Class(def) => def.is_abstract,
            _ => false,
        }
    }

    pub fn superclass(&self, id: TypeId) -> Option<TypeId> {
        self.class_def(id).and_then(|def| def.superclass)
    }

    /// Every declared subtype, direct or indirect, sorted by qualified name.
    pub fn subtypes(&self, id: TypeId) -> &[TypeId] {
        self.subtypes.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Subtypes that can be instantiated.
    pub fn concrete_subtypes(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtypes(id)
            .iter()
            .copied()
            .filter(|&sub| !self.is_abstract(sub))
    }

    /// Serializable fields declared directly on `id`, sorted by name.
    ///
    /// The order depends only on the set of names, never on declaration
    /// order, so regenerating over the same type yields identical output.
    pub fn serializable_fields(&self, id: TypeId) -> Vec<&FieldDef> {
        let Some(def) = self.class_def(id) else {
            return Vec::new();
        };
        let mut fields: Vec<&FieldDef> =
            def.fields.iter().filter(|f| f.is_serializable()).collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }

    /// Whether any class above `id` contributes serializable fields.
    pub fn has_inherited_fields(&self, id: TypeId) -> bool {
        let mut current = self.superclass(id);
        let mut seen = FxHashSet::default();
        while let Some(sup) = current {
            if !seen.insert(sup) || sup == TypeId::OBJECT {
                return false;
            }
            if !self.serializable_fields(sup).is_empty() {
                return true;
            }
            current = self.superclass(sup);
        }
        false
    }
}

/// Interning key for structural types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum StructuralKey {
    Array(TypeId),
    Parameterized(TypeId, TypeArgs),
}

/// Mutable collector for a [`TypeGraph`].
#[derive(Clone, Debug)]
pub struct TypeGraphBuilder {
    types: Vec<TypeDescriptor>,
    by_name: FxHashMap<String, TypeId>,
    structural: FxHashMap<StructuralKey, TypeId>,
}

impl Default for TypeGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeGraphBuilder {
    /// Create a builder holding only the prelude.
    pub fn new() -> Self {
        let mut builder = TypeGraphBuilder {
            types: Vec::with_capacity(64),
            by_name: FxHashMap::default(),
            structural: FxHashMap::default(),
        };
        builder.intern_prelude();
        builder
    }

    fn intern_prelude(&mut self) {
        for prim in Prim::ALL {
            self.push_at(prim.type_id(), prim.keyword(), TypeKind::Primitive(prim));
        }
        for prim in Prim::ALL {
            if let (Some(id), Some(name)) = (prim.boxed_type_id(), prim.boxed_name()) {
                self.push_at(id, name, TypeKind::Boxed(prim));
            }
        }
        let library = |arity: usize| ClassDef {
            origin: Origin::Library,
            arity,
            ..ClassDef::default()
        };
        let abstract_library = |arity: usize| ClassDef {
            origin: Origin::Library,
            arity,
            is_abstract: true,
            ..ClassDef::default()
        };
        self.push_at(TypeId::STRING, "std.String", TypeKind::Class(library(0)));
        self.push_at(TypeId::OBJECT, "std.Object", TypeKind::Class(library(0)));
        self.push_at(TypeId::DATE, "std.Date", TypeKind::Class(library(0)));
        self.push_at(TypeId::TIMESTAMP, "std.Timestamp", TypeKind::Class(library(0)));
        self.push_at(TypeId::LOCAL_DATE, "std.LocalDate", TypeKind::Class(library(0)));
        self.push_at(TypeId::LIST, "std.List", TypeKind::Interface(abstract_library(1)));
        self.push_at(TypeId::ARRAY_LIST, "std.ArrayList", TypeKind::Class(library(1)));
        self.push_at(TypeId::SET, "std.Set", TypeKind::Interface(abstract_library(1)));
        self.push_at(TypeId::HASH_SET, "std.HashSet", TypeKind::Class(library(1)));
        self.push_at(TypeId::MAP, "std.Map", TypeKind::Interface(abstract_library(2)));
        self.push_at(TypeId::HASH_MAP, "std.HashMap", TypeKind::Class(library(2)));

        // Reserved slots keep dynamic ids stable if the prelude grows.
        while self.types.len() < TypeId::FIRST_DYNAMIC as usize {
            self.types.push(TypeDescriptor {
                name: String::new(),
                kind: TypeKind::Class(library(0)),
            });
        }
    }

    fn push_at(&mut self, id: TypeId, name: &str, kind: TypeKind) {
        debug_assert_eq!(id.index(), self.types.len(), "prelude out of order: {name}");
        self.types.push(TypeDescriptor {
            name: name.to_string(),
            kind,
        });
        self.by_name.insert(name.to_string(), id);
    }

    fn push(&mut self, name: String, kind: TypeKind) -> TypeId {
        let id = TypeId::from_raw(
            u32::try_from(self.types.len()).unwrap_or(u32::MAX),
        );
        self.by_name.insert(name.clone(), id);
        self.types.push(TypeDescriptor { name, kind });
        id
    }

    fn declare(&mut self, name: impl Into<String>, kind: TypeKind) -> Result<TypeId, GraphError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateType(name));
        }
        tracing::trace!(%name, "declare type");
        Ok(self.push(name, kind))
    }

    /// Declare a concrete user class with no fields.
    pub fn declare_class(&mut self, name: impl Into<String>) -> Result<TypeId, GraphError> {
        self.declare(name, TypeKind::Class(ClassDef::default()))
    }

    /// Declare an abstract user class.
    pub fn declare_abstract_class(
        &mut self,
        name: impl Into<String>,
    ) -> Result<TypeId, GraphError> {
        self.declare(
            name,
            TypeKind::Class(ClassDef {
                is_abstract: true,
                ..ClassDef::default()
            }),
        )
    }

    pub fn declare_interface(&mut self, name: impl Into<String>) -> Result<TypeId, GraphError> {
        self.declare(
            name,
            TypeKind::Interface(ClassDef {
                is_abstract: true,
                ..ClassDef::default()
            }),
        )
    }

    /// Declare a library class that has no built-in codec.
    pub fn declare_library_class(
        &mut self,
        name: impl Into<String>,
    ) -> Result<TypeId, GraphError> {
        self.declare(
            name,
            TypeKind::Class(ClassDef {
                origin: Origin::Library,
                ..ClassDef::default()
            }),
        )
    }

    pub fn declare_enum<I, S>(&mut self, name: impl Into<String>, variants: I) -> Result<TypeId, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = variants.into_iter().map(Into::into).collect();
        self.declare(name, TypeKind::Enum(EnumDef { variants }))
    }

    fn class_def_mut(&mut self, id: TypeId) -> Result<&mut ClassDef, GraphError> {
        let desc = &mut self.types[id.index()];
        match &mut desc.kind {
            TypeKind::Class(def) | TypeKind::Interface(def) => Ok(def),
            _ => Err(GraphError::NotAClass(desc.name.clone())),
        }
    }

    /// Link `class` under `superclass`. The chain above `superclass` is
    /// acyclic, so reaching `class` on it means the link closes a cycle.
    pub fn set_superclass(&mut self, class: TypeId, superclass: TypeId) -> Result<(), GraphError> {
        self.class_def_mut(superclass)?;
        self.class_def_mut(class)?;
        let mut current = Some(superclass);
        while let Some(id) = current {
            if id == class {
                return Err(GraphError::SuperclassCycle(
                    self.types[class.index()].name.clone(),
                ));
            }
            current = match &self.types[id.index()].kind {
                TypeKind::Class(def) | TypeKind::Interface(def) => def.superclass,
                _ => None,
            };
        }
        self.class_def_mut(class)?.superclass = Some(superclass);
        Ok(())
    }

    pub fn add_interface(&mut self, class: TypeId, interface: TypeId) -> Result<(), GraphError> {
        self.class_def_mut(interface)?;
        self.class_def_mut(class)?.interfaces.push(interface);
        Ok(())
    }

    pub fn set_abstract(&mut self, class: TypeId, is_abstract: bool) -> Result<(), GraphError> {
        self.class_def_mut(class)?.is_abstract = is_abstract;
        Ok(())
    }

    pub fn add_field(&mut self, owner: TypeId, field: FieldDef) -> Result<(), GraphError> {
        self.class_def_mut(owner)?.fields.push(field);
        Ok(())
    }

    /// Shorthand for a public, unmodified field.
    pub fn field(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        ty: TypeId,
    ) -> Result<(), GraphError> {
        self.add_field(owner, FieldDef::new(name, ty))
    }

    /// Intern `component[]`.
    pub fn array(&mut self, component: TypeId) -> TypeId {
        let key = StructuralKey::Array(component);
        if let Some(&id) = self.structural.get(&key) {
            return id;
        }
        let name = format!("{}[]", self.types[component.index()].name);
        let id = self.push(name, TypeKind::Array { component });
        self.structural.insert(key, id);
        id
    }

    /// Intern `raw<args...>`.
    ///
    /// Arity is checked only when `args` is non-empty; a raw container used
    /// without arguments is kept as-is and reported during generation.
    pub fn parameterized(&mut self, raw: TypeId, args: &[TypeId]) -> Result<TypeId, GraphError> {
        if args.is_empty() {
            return Ok(raw);
        }
        let arity = self.class_def_mut(raw)?.arity;
        if arity != 0 && arity != args.len() {
            return Err(GraphError::ArityMismatch {
                raw: self.types[raw.index()].name.clone(),
                expected: arity,
                found: args.len(),
            });
        }
        let args: TypeArgs = args.iter().copied().collect();
        let key = StructuralKey::Parameterized(raw, args.clone());
        if let Some(&id) = self.structural.get(&key) {
            return Ok(id);
        }
        let rendered: Vec<&str> = args
            .iter()
            .map(|a| self.types[a.index()].name.as_str())
            .collect();
        let name = format!("{}<{}>", self.types[raw.index()].name, rendered.join(", "));
        let id = self.push(name, TypeKind::Parameterized { raw, args });
        self.structural.insert(key, id);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Freeze the universe and compute subtype lists.
    pub fn build(self) -> TypeGraph {
        let mut direct: FxHashMap<TypeId, Vec<TypeId>> = FxHashMap::default();
        for (index, desc) in self.types.iter().enumerate() {
            let id = TypeId::from_raw(u32::try_from(index).unwrap_or(u32::MAX));
            if let TypeKind::Class(def) | TypeKind::Interface(def) = &desc.kind {
                let parents = def.superclass.iter().chain(def.interfaces.iter());
                for &parent in parents {
                    direct.entry(parent).or_default().push(id);
                }
            }
        }

        let mut subtypes: FxHashMap<TypeId, Vec<TypeId>> = FxHashMap::default();
        for &parent in direct.keys() {
            let mut seen = FxHashSet::default();
            let mut stack = vec![parent];
            let mut all = Vec::new();
            while let Some(current) = stack.pop() {
                for &child in direct.get(&current).map_or(&[][..], Vec::as_slice) {
                    if child != parent && seen.insert(child) {
                        all.push(child);
                        stack.push(child);
                    }
                }
            }
            all.sort_by(|a, b| self.types[a.index()].name.cmp(&self.types[b.index()].name));
            subtypes.insert(parent, all);
        }

        tracing::debug!(types = self.types.len(), "type graph built");
        TypeGraph {
            types: self.types,
            by_name: self.by_name,
            subtypes,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
