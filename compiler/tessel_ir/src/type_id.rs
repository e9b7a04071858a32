//! Type handle.
//!
//! Every type in a [`TypeGraph`](crate::TypeGraph) is referenced by a 32-bit
//! `TypeId`. The primitives, their boxed counterparts and the library types
//! the codec library knows about are pre-interned at fixed indices, so the
//! classifier can recognise them by index without a name lookup.

use std::fmt;

/// A 32-bit index into the type graph.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Primitives (0-8) ===
    pub const BOOLEAN: Self = Self(0);
    pub const BYTE: Self = Self(1);
    pub const CHAR: Self = Self(2);
    pub const SHORT: Self = Self(3);
    pub const INT: Self = Self(4);
    pub const LONG: Self = Self(5);
    pub const FLOAT: Self = Self(6);
    pub const DOUBLE: Self = Self(7);
    /// `void`. Present so descriptors can name it; never serializable.
    pub const VOID: Self = Self(8);

    // === Boxed primitives (9-16) ===
    pub const BOXED_BOOLEAN: Self = Self(9);
    pub const BOXED_BYTE: Self = Self(10);
    pub const BOXED_CHAR: Self = Self(11);
    pub const BOXED_SHORT: Self = Self(12);
    pub const BOXED_INT: Self = Self(13);
    pub const BOXED_LONG: Self = Self(14);
    pub const BOXED_FLOAT: Self = Self(15);
    pub const BOXED_DOUBLE: Self = Self(16);

    // === Library types with built-in codecs (17-21) ===
    pub const STRING: Self = Self(17);
    /// The top type. Values pass through the generic value codec.
    pub const OBJECT: Self = Self(18);
    pub const DATE: Self = Self(19);
    pub const TIMESTAMP: Self = Self(20);
    pub const LOCAL_DATE: Self = Self(21);

    // === Raw containers (22-27) ===
    pub const LIST: Self = Self(22);
    pub const ARRAY_LIST: Self = Self(23);
    pub const SET: Self = Self(24);
    pub const HASH_SET: Self = Self(25);
    pub const MAP: Self = Self(26);
    pub const HASH_MAP: Self = Self(27);

    /// Number of pre-interned types.
    pub const PRELUDE_COUNT: u32 = 28;

    /// First index handed out to declared, array and parameterized types.
    /// Indices between the prelude and this value are reserved.
    pub const FIRST_DYNAMIC: u32 = 32;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this id belongs to the pre-interned prelude.
    #[inline]
    pub const fn is_prelude(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Check if this id is one of the raw container types.
    #[inline]
    pub const fn is_raw_container(self) -> bool {
        self.0 >= Self::LIST.0 && self.0 <= Self::HASH_MAP.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}
