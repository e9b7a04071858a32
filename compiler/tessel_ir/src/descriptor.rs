//! Type descriptors.
//!
//! A [`TypeDescriptor`] is the read-only shape of one declared type: its
//! qualified name plus a [`TypeKind`]. Descriptors are produced by the
//! [`TypeGraphBuilder`](crate::TypeGraphBuilder) and never mutated once the
//! graph is built.

use bitflags::bitflags;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{Prim, TypeId};

/// Type arguments of a parameterized type. Containers take one or two.
pub type TypeArgs = SmallVec<[TypeId; 2]>;

/// A declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Fully qualified name, e.g. `com.acme.Dog` or `std.List<std.String>`.
    pub name: String,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Name after the last `.` (ignoring any type arguments).
    pub fn simple_name(&self) -> &str {
        let base = self.name.split('<').next().unwrap_or(&self.name);
        base.rsplit('.').next().unwrap_or(base)
    }
}

/// The shape of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Primitive(Prim),
    Boxed(Prim),
    Class(ClassDef),
    Interface(ClassDef),
    Enum(EnumDef),
    /// `component[]`.
    Array {
        component: TypeId,
    },
    /// `raw<args...>`. `raw` is a class or interface.
    Parameterized {
        raw: TypeId,
        args: TypeArgs,
    },
}

/// Where a class was declared.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Declared by the program whose types are being serialized.
    #[default]
    User,
    /// Declared by a standard library. Only library types with a built-in
    /// codec are serializable.
    Library,
}

/// Class or interface body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassDef {
    pub origin: Origin,
    pub is_abstract: bool,
    pub superclass: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub fields: Vec<FieldDef>,
    /// Number of declared type parameters.
    pub arity: usize,
}

/// Enum body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumDef {
    pub variants: Vec<String>,
}

/// A declared field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeId,
    pub visibility: Visibility,
    pub flags: FieldFlags,
}

impl FieldDef {
    /// A public field with no modifiers.
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        FieldDef {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            flags: FieldFlags::empty(),
        }
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Whether the field takes part in serialization.
    pub fn is_serializable(&self) -> bool {
        !self.flags.intersects(FieldFlags::EXCLUDED)
    }
}

/// Visibility of a field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    /// Accessed through generated getter/setter hooks.
    Private,
}

bitflags! {
    /// Field modifiers relevant to serialization.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FieldFlags: u8 {
        const STATIC = 1 << 0;
        const FINAL = 1 << 1;
        const TRANSIENT = 1 << 2;
        /// Explicit per-field opt-out.
        const SKIP = 1 << 3;

        /// Any of these removes the field from the serialized field set.
        const EXCLUDED = Self::STATIC.bits()
            | Self::FINAL.bits()
            | Self::TRANSIENT.bits()
            | Self::SKIP.bits();
    }
}
