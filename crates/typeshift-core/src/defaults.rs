//! Static recognition tables shared by the closure resolver and the builder
//!
//! These are pure functions over a handle and the provider's capabilities;
//! nothing here holds state, so both stages stay referentially transparent.

use crate::introspect::{Introspector, SourcePrimitive, TypeHandle};
use crate::ir::PrimitiveKind;

/// Collapse a recognized source primitive onto its target kind. Both
/// date-like kinds map to `Date`, all four numeric-like kinds to `Number`.
pub fn collapse(primitive: SourcePrimitive) -> PrimitiveKind {
    match primitive {
        SourcePrimitive::Bool => PrimitiveKind::Boolean,
        SourcePrimitive::Text => PrimitiveKind::Text,
        SourcePrimitive::DateTime | SourcePrimitive::DateTimeOffset => PrimitiveKind::Date,
        SourcePrimitive::Int
        | SourcePrimitive::Long
        | SourcePrimitive::Decimal
        | SourcePrimitive::Double => PrimitiveKind::Number,
    }
}

/// Whether `base` participates as a base-type link. The universal root and
/// the enum root never do, and neither does a collection shape: a type
/// inheriting from a collection is modeled purely as that collection. The
/// check inspects the immediate base only.
pub fn is_base_link<I: Introspector + ?Sized>(introspector: &I, base: TypeHandle) -> bool {
    !introspector.is_universal_root(base)
        && !introspector.is_enum_root(base)
        && !introspector.is_recognized_sequence(base)
}

/// Whether `handle` denotes a shape that becomes a declaration.
pub fn is_declaration_shape<I: Introspector + ?Sized>(
    introspector: &I,
    handle: TypeHandle,
) -> bool {
    introspector.is_enum(handle)
        || introspector.is_class(handle)
        || introspector.is_interface(handle)
}
