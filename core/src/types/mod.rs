//! The fixed primitive type lattice.

mod lattice;

use core::fmt;

pub use lattice::InheritanceGraph;

/// Static type tag assigned to every expression by the analyzer.
///
/// `Null` is the type of the `null` literal; it fits any declared type and
/// never describes a runtime value on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TypeId {
    Null,
    Object,
    Int,
    Double,
    Bool,
    String,
    Void,
}

impl TypeId {
    pub const ALL: [TypeId; 7] = [
        TypeId::Null,
        TypeId::Object,
        TypeId::Int,
        TypeId::Double,
        TypeId::Bool,
        TypeId::String,
        TypeId::Void,
    ];

    /// Looks up a type by the name used in declarations.
    pub fn resolve(name: &str) -> Option<TypeId> {
        match name {
            "Object" => Some(TypeId::Object),
            "int" => Some(TypeId::Int),
            "double" => Some(TypeId::Double),
            "bool" => Some(TypeId::Bool),
            "String" => Some(TypeId::String),
            "void" => Some(TypeId::Void),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeId::Null => "null",
            TypeId::Object => "Object",
            TypeId::Int => "int",
            TypeId::Double => "double",
            TypeId::Bool => "bool",
            TypeId::String => "String",
            TypeId::Void => "void",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, TypeId::Int | TypeId::Double)
    }

    /// True if a value of type `self` may be used where `target` is expected.
    ///
    /// `null` fits everywhere; every other type conforms to itself and to its
    /// ancestors.
    pub fn conforms_to(self, target: TypeId) -> bool {
        self == TypeId::Null || InheritanceGraph::primitives().conforms(self, target)
    }

    /// Exact match, with `null` accepted for any target.
    pub fn matches(self, target: TypeId) -> bool {
        self == TypeId::Null || self == target
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
