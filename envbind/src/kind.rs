//! Field kinds and the mutable slots the coercion table writes into.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use num_complex::{Complex32, Complex64};
use serde::Serialize;

use crate::walk::EnvStruct;

/// Kind of a configuration field.
///
/// Primitive kinds have an entry in the coercion table; `Struct` is walked
/// recursively; the remaining kinds are recognised only so that they can be
/// rejected with a precise error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Struct,
    Pointer,
    Option,
    Slice,
    Array,
    Map,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::Struct => "struct",
            Kind::Pointer => "pointer",
            Kind::Option => "option",
            Kind::Slice => "slice",
            Kind::Array => "array",
            Kind::Map => "map",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable slot of a single field, tagged by kind.
///
/// Variant names match the [`Kind`] they carry.
pub enum FieldRef<'a> {
    Bool(&'a mut bool),
    String(&'a mut String),
    Int(&'a mut isize),
    Int8(&'a mut i8),
    Int16(&'a mut i16),
    Int32(&'a mut i32),
    Int64(&'a mut i64),
    Uint(&'a mut usize),
    Uint8(&'a mut u8),
    Uint16(&'a mut u16),
    Uint32(&'a mut u32),
    Uint64(&'a mut u64),
    Float32(&'a mut f32),
    Float64(&'a mut f64),
    Complex64(&'a mut Complex32),
    Complex128(&'a mut Complex64),
    /// Nested registered struct, walked field by field
    Struct(&'a mut dyn EnvStruct),
    /// A type the walker recognises but cannot bind
    Unsupported(Kind),
}

impl FieldRef<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            FieldRef::Bool(_) => Kind::Bool,
            FieldRef::String(_) => Kind::String,
            FieldRef::Int(_) => Kind::Int,
            FieldRef::Int8(_) => Kind::Int8,
            FieldRef::Int16(_) => Kind::Int16,
            FieldRef::Int32(_) => Kind::Int32,
            FieldRef::Int64(_) => Kind::Int64,
            FieldRef::Uint(_) => Kind::Uint,
            FieldRef::Uint8(_) => Kind::Uint8,
            FieldRef::Uint16(_) => Kind::Uint16,
            FieldRef::Uint32(_) => Kind::Uint32,
            FieldRef::Uint64(_) => Kind::Uint64,
            FieldRef::Float32(_) => Kind::Float32,
            FieldRef::Float64(_) => Kind::Float64,
            FieldRef::Complex64(_) => Kind::Complex64,
            FieldRef::Complex128(_) => Kind::Complex128,
            FieldRef::Struct(_) => Kind::Struct,
            FieldRef::Unsupported(kind) => *kind,
        }
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldRef").field(&self.kind()).finish()
    }
}

/// A type that can appear as a field of a configuration struct.
///
/// Implemented for the primitive kinds, for registered structs by
/// `#[derive(EnvBind)]`, and for pointer, optional and collection types,
/// which report themselves as unsupported.
pub trait EnvField {
    fn field_ref(&mut self) -> FieldRef<'_>;
}

macro_rules! impl_env_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl EnvField for $ty {
                fn field_ref(&mut self) -> FieldRef<'_> {
                    FieldRef::$variant(self)
                }
            }
        )*
    };
}

impl_env_field! {
    bool => Bool,
    String => String,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Complex32 => Complex64,
    Complex64 => Complex128,
}

macro_rules! impl_unsupported {
    ($($kind:ident => [$($generics:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($generics)*> EnvField for $ty {
                fn field_ref(&mut self) -> FieldRef<'_> {
                    FieldRef::Unsupported(Kind::$kind)
                }
            }
        )*
    };
}

impl_unsupported! {
    Pointer => [T: ?Sized] Box<T>,
    Pointer => [T: ?Sized] Rc<T>,
    Pointer => [T: ?Sized] Arc<T>,
    Pointer => [T: ?Sized] *const T,
    Pointer => [T: ?Sized] *mut T,
    Option => [T] Option<T>,
    Slice => [T] Vec<T>,
    Map => [K, V] BTreeMap<K, V>,
    Map => [K, V, S] HashMap<K, V, S>,
}

impl<T, const N: usize> EnvField for [T; N] {
    fn field_ref(&mut self) -> FieldRef<'_> {
        FieldRef::Unsupported(Kind::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_slots_report_their_kind() {
        let mut flag = false;
        let mut port = 0u16;
        let mut ratio = 0.0f64;
        let mut wave = Complex32::new(0.0, 0.0);

        assert_eq!(flag.field_ref().kind(), Kind::Bool);
        assert_eq!(port.field_ref().kind(), Kind::Uint16);
        assert_eq!(ratio.field_ref().kind(), Kind::Float64);
        assert_eq!(wave.field_ref().kind(), Kind::Complex64);
    }

    #[test]
    fn test_unsupported_types_report_kind() {
        let mut boxed: Box<str> = "x".into();
        let mut optional: Option<u8> = None;
        let mut list: Vec<String> = Vec::new();
        let mut fixed = [0u8; 4];
        let mut table: HashMap<String, String> = HashMap::new();
        let mut raw: *const u8 = std::ptr::null();

        assert_eq!(boxed.field_ref().kind(), Kind::Pointer);
        assert_eq!(optional.field_ref().kind(), Kind::Option);
        assert_eq!(list.field_ref().kind(), Kind::Slice);
        assert_eq!(fixed.field_ref().kind(), Kind::Array);
        assert_eq!(table.field_ref().kind(), Kind::Map);
        assert_eq!(raw.field_ref().kind(), Kind::Pointer);
    }

    #[test]
    fn test_kind_display_and_serialize() {
        assert_eq!(Kind::Complex128.to_string(), "complex128");
        assert_eq!(Kind::Uint.as_str(), "uint");
        assert_eq!(serde_json::to_string(&Kind::Int64).unwrap(), "\"int64\"");
    }
}
