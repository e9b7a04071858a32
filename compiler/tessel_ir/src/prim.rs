//! Primitive kinds.

use std::fmt;

use crate::TypeId;

/// A primitive (unboxed) type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Prim {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Prim {
    /// Every primitive, in prelude order.
    pub const ALL: [Prim; 9] = [
        Prim::Boolean,
        Prim::Byte,
        Prim::Char,
        Prim::Short,
        Prim::Int,
        Prim::Long,
        Prim::Float,
        Prim::Double,
        Prim::Void,
    ];

    /// The keyword naming this primitive in type expressions.
    pub const fn keyword(self) -> &'static str {
        match self {
            Prim::Boolean => "boolean",
            Prim::Byte => "byte",
            Prim::Char => "char",
            Prim::Short => "short",
            Prim::Int => "int",
            Prim::Long => "long",
            Prim::Float => "float",
            Prim::Double => "double",
            Prim::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Prim> {
        Prim::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Qualified name of the boxed counterpart. `void` has none.
    pub const fn boxed_name(self) -> Option<&'static str> {
        match self {
            Prim::Boolean => Some("std.Boolean"),
            Prim::Byte => Some("std.Byte"),
            Prim::Char => Some("std.Character"),
            Prim::Short => Some("std.Short"),
            Prim::Int => Some("std.Integer"),
            Prim::Long => Some("std.Long"),
            Prim::Float => Some("std.Float"),
            Prim::Double => Some("std.Double"),
            Prim::Void => None,
        }
    }

    /// Pre-interned id of the primitive type.
    pub const fn type_id(self) -> TypeId {
        match self {
            Prim::Boolean => TypeId::BOOLEAN,
            Prim::Byte => TypeId::BYTE,
            Prim::Char => TypeId::CHAR,
            Prim::Short => TypeId::SHORT,
            Prim::Int => TypeId::INT,
            Prim::Long => TypeId::LONG,
            Prim::Float => TypeId::FLOAT,
            Prim::Double => TypeId::DOUBLE,
            Prim::Void => TypeId::VOID,
        }
    }

    /// Pre-interned id of the boxed counterpart.
    pub const fn boxed_type_id(self) -> Option<TypeId> {
        match self {
            Prim::Boolean => Some(TypeId::BOXED_BOOLEAN),
            Prim::Byte => Some(TypeId::BOXED_BYTE),
            Prim::Char => Some(TypeId::BOXED_CHAR),
            Prim::Short => Some(TypeId::BOXED_SHORT),
            Prim::Int => Some(TypeId::BOXED_INT),
            Prim::Long => Some(TypeId::BOXED_LONG),
            Prim::Float => Some(TypeId::BOXED_FLOAT),
            Prim::Double => Some(TypeId::BOXED_DOUBLE),
            Prim::Void => None,
        }
    }
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
