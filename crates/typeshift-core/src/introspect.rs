//! Opaque type handles and the introspection capability surface
//!
//! The pipeline never inspects source types directly; everything it knows
//! about them arrives through the [`Introspector`] trait. Handles are
//! identity based: two handles compare equal only when they denote the same
//! declaration, and an open generic definition is a different handle than
//! any of its closed instantiations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a type in the source system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TypeHandle(pub u64);

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A declared (non-inherited) member as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    pub ty: TypeHandle,
}

/// An enum member together with its explicit value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMemberInfo {
    pub name: String,
    pub value: i64,
}

/// The fixed primitive subset of the source type system that the pipeline
/// recognizes. Anything else must be a sequence shape, a generic parameter
/// or a declarable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourcePrimitive {
    Bool,
    Text,
    DateTime,
    DateTimeOffset,
    Int,
    Long,
    Decimal,
    Double,
}

/// Capability surface of the type introspection provider.
///
/// Implementations supply raw descriptors on demand; the trait is object
/// safe so strategies and partitioners can hold it behind `&dyn`.
pub trait Introspector {
    /// Display name of the type, without any arity decoration.
    fn type_name(&self, handle: TypeHandle) -> String;

    /// Hierarchical logical location, e.g. `"App.Contracts.Billing"`.
    fn logical_location(&self, handle: TypeHandle) -> Option<String>;

    fn is_enum(&self, handle: TypeHandle) -> bool;
    fn is_class(&self, handle: TypeHandle) -> bool;
    fn is_interface(&self, handle: TypeHandle) -> bool;

    /// Members declared on this type itself, inherited ones excluded.
    fn declared_members(&self, handle: TypeHandle) -> Vec<MemberInfo>;

    fn base_type(&self, handle: TypeHandle) -> Option<TypeHandle>;

    fn is_generic_definition(&self, handle: TypeHandle) -> bool;
    fn is_generic_instantiation(&self, handle: TypeHandle) -> bool;

    /// Ordered generic arguments: formal parameters for a definition,
    /// bound arguments for an instantiation.
    fn generic_arguments(&self, handle: TypeHandle) -> Vec<TypeHandle>;

    /// Open definition behind a closed instantiation.
    fn generic_definition(&self, handle: TypeHandle) -> Option<TypeHandle>;

    fn is_generic_parameter(&self, handle: TypeHandle) -> bool;

    /// Declaring generic declaration of a formal parameter.
    fn declaring_definition(&self, handle: TypeHandle) -> Option<TypeHandle>;

    fn enum_members(&self, handle: TypeHandle) -> Vec<EnumMemberInfo>;

    fn primitive_kind(&self, handle: TypeHandle) -> Option<SourcePrimitive>;

    /// Element type of a recognized homogeneous collection shape.
    fn sequence_element(&self, handle: TypeHandle) -> Option<TypeHandle>;

    /// Whether the handle is the universal root type every class descends
    /// from.
    fn is_universal_root(&self, handle: TypeHandle) -> bool;

    /// Whether the handle is the common root type of all enums.
    fn is_enum_root(&self, handle: TypeHandle) -> bool;

    fn is_recognized_primitive(&self, handle: TypeHandle) -> bool {
        self.primitive_kind(handle).is_some()
    }

    fn is_recognized_sequence(&self, handle: TypeHandle) -> bool {
        self.sequence_element(handle).is_some()
    }
}
