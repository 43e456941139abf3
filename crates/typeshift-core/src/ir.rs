//! Arena-backed intermediate representation of the declaration graph
//!
//! Declarations live in a [`TypeModel`] arena and reference each other by
//! [`DeclId`], so mutually referencing declarations are just two entries
//! pointing at each other's ids. Generic parameters are canonicalized per
//! declaring declaration: every use site carries `(owner, index)` and
//! resolves to the single [`GenericParam`] stored on the owner.

use crate::introspect::TypeHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a declaration inside its [`TypeModel`] arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DeclId(pub usize);

/// One of the four target primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Boolean,
    Text,
    Date,
    Number,
}

/// A type expression. Closed sum type; the closure walk, the resolver, the
/// reference collector and the renderer each match it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    /// Arrays and every recognized homogeneous collection shape.
    Sequence(Box<TypeRef>),
    /// Use of a formal parameter; resolves to
    /// `decl(owner).generic_params[index]`.
    Param { owner: DeclId, index: usize },
    /// Closed instantiation of a generic declaration.
    Instance {
        definition: DeclId,
        args: Vec<TypeRef>,
    },
    Decl(DeclId),
}

impl TypeRef {
    /// Collect every declaration this expression references, one level
    /// deep: sequence elements and instantiation arguments are unwrapped,
    /// but referenced declarations are never re-expanded into their own
    /// members.
    pub fn referenced_decls(&self, out: &mut Vec<DeclId>) {
        match self {
            TypeRef::Primitive(_) | TypeRef::Param { .. } => {}
            TypeRef::Sequence(element) => element.referenced_decls(out),
            TypeRef::Instance { definition, args } => {
                out.push(*definition);
                for arg in args {
                    arg.referenced_decls(out);
                }
            }
            TypeRef::Decl(id) => out.push(*id),
        }
    }
}

/// Canonical formal parameter, owned by exactly one declaring declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParam {
    pub name: String,
    pub handle: TypeHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessModifier {
    None,
    Private,
    Protected,
    Public,
}

impl AccessModifier {
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            AccessModifier::None => None,
            AccessModifier::Private => Some("private"),
            AccessModifier::Protected => Some("protected"),
            AccessModifier::Public => Some("public"),
        }
    }
}

/// A declared member. `access` is only meaningful on class declarations;
/// interface members carry [`AccessModifier::None`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub ty: TypeRef,
    pub access: AccessModifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

/// Shared body of class and interface declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDecl {
    /// Members declared on this type itself; inherited members are
    /// reachable only through `base`.
    pub members: Vec<Member>,
    pub base: Option<TypeRef>,
    pub generic_params: Vec<GenericParam>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclKind {
    Class(ShapeDecl),
    Interface(ShapeDecl),
    Enum(EnumDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub handle: TypeHandle,
    pub name: String,
    pub export: bool,
    pub kind: DeclKind,
}

impl Declaration {
    pub fn is_class(&self) -> bool {
        matches!(self.kind, DeclKind::Class(_))
    }

    pub fn shape(&self) -> Option<&ShapeDecl> {
        match &self.kind {
            DeclKind::Class(shape) | DeclKind::Interface(shape) => Some(shape),
            DeclKind::Enum(_) => None,
        }
    }

    pub fn shape_mut(&mut self) -> Option<&mut ShapeDecl> {
        match &mut self.kind {
            DeclKind::Class(shape) | DeclKind::Interface(shape) => Some(shape),
            DeclKind::Enum(_) => None,
        }
    }

    /// Declarations referenced from this declaration's base type and
    /// member types, one level deep per type expression.
    pub fn referenced_decls(&self, out: &mut Vec<DeclId>) {
        if let Some(shape) = self.shape() {
            if let Some(base) = &shape.base {
                base.referenced_decls(out);
            }
            for member in &shape.members {
                member.ty.referenced_decls(out);
            }
        }
    }
}

/// The built declaration graph for one generation request. Owns its arena;
/// independent requests never share entries, which keeps generic-argument
/// identity local to the request.
#[derive(Debug, Default)]
pub struct TypeModel {
    decls: Vec<Declaration>,
    by_handle: HashMap<TypeHandle, DeclId>,
}

impl TypeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration and index it by its originating handle.
    pub fn push(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len());
        self.by_handle.insert(decl.handle, id);
        self.decls.push(decl);
        id
    }

    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0]
    }

    pub(crate) fn decl_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.0]
    }

    pub fn decl_for(&self, handle: TypeHandle) -> Option<DeclId> {
        self.by_handle.get(&handle).copied()
    }

    /// Declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(index, decl)| (DeclId(index), decl))
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Name of the canonical parameter a [`TypeRef::Param`] points at.
    pub fn param_name(&self, owner: DeclId, index: usize) -> &str {
        match &self.decls[owner.0].kind {
            DeclKind::Class(shape) | DeclKind::Interface(shape) => {
                &shape.generic_params[index].name
            }
            DeclKind::Enum(_) => "",
        }
    }
}
