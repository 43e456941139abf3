//! Two-pass construction of the type model from a dependency closure
//!
//! Pass 1 creates a shell per handle and registers every formal generic
//! parameter in a `(owner, name)` lookup table before any wiring happens.
//! Pass 2 resolves base types and members against that table, so self- and
//! sibling references to a parameter land on the one canonical entry its
//! declaring shell owns.

use crate::defaults;
use crate::error::CoreError;
use crate::introspect::{Introspector, TypeHandle};
use crate::ir::{
    AccessModifier, DeclId, DeclKind, Declaration, EnumDecl, EnumMember, GenericParam, Member,
    ShapeDecl, TypeModel, TypeRef,
};
use std::collections::HashMap;
use tracing::debug;

type ParamTable = HashMap<(DeclId, String), usize>;

pub struct ModelBuilder<'a, I: Introspector + ?Sized> {
    introspector: &'a I,
    interface_default: bool,
}

impl<'a, I: Introspector + ?Sized> ModelBuilder<'a, I> {
    /// `interface_default` turns class shapes into interface declarations.
    pub fn new(introspector: &'a I, interface_default: bool) -> Self {
        Self {
            introspector,
            interface_default,
        }
    }

    pub fn build(&self, closure: &[TypeHandle]) -> Result<TypeModel, CoreError> {
        let mut model = TypeModel::new();
        let mut params: ParamTable = HashMap::new();

        for &handle in closure {
            let id = model.push(self.create_shell(handle)?);
            if let Some(shape) = model.decl(id).shape() {
                for (index, param) in shape.generic_params.iter().enumerate() {
                    params.insert((id, param.name.clone()), index);
                }
            }
        }

        for index in 0..model.len() {
            self.wire(&mut model, DeclId(index), &params)?;
        }

        debug!(declarations = model.len(), "built type model");
        Ok(model)
    }

    fn create_shell(&self, handle: TypeHandle) -> Result<Declaration, CoreError> {
        let name = self.introspector.type_name(handle);
        let kind = if self.introspector.is_enum(handle) {
            DeclKind::Enum(EnumDecl {
                members: self
                    .introspector
                    .enum_members(handle)
                    .into_iter()
                    .map(|member| EnumMember {
                        name: member.name,
                        value: member.value,
                    })
                    .collect(),
            })
        } else if self.introspector.is_class(handle) && !self.interface_default {
            DeclKind::Class(self.shape_shell(handle))
        } else if self.introspector.is_interface(handle) || self.introspector.is_class(handle) {
            DeclKind::Interface(self.shape_shell(handle))
        } else {
            return Err(CoreError::UnsupportedType { handle, name });
        };
        Ok(Declaration {
            handle,
            name,
            export: true,
            kind,
        })
    }

    fn shape_shell(&self, handle: TypeHandle) -> ShapeDecl {
        let generic_params = if self.introspector.is_generic_definition(handle) {
            self.introspector
                .generic_arguments(handle)
                .into_iter()
                .map(|param| GenericParam {
                    name: self.introspector.type_name(param),
                    handle: param,
                })
                .collect()
        } else {
            Vec::new()
        };
        ShapeDecl {
            members: Vec::new(),
            base: None,
            generic_params,
        }
    }

    fn wire(
        &self,
        model: &mut TypeModel,
        id: DeclId,
        params: &ParamTable,
    ) -> Result<(), CoreError> {
        let decl = model.decl(id);
        if decl.shape().is_none() {
            return Ok(());
        }
        let handle = decl.handle;
        let access = if decl.is_class() {
            AccessModifier::Public
        } else {
            AccessModifier::None
        };

        let base = match self.introspector.base_type(handle) {
            Some(base) if defaults::is_base_link(self.introspector, base) => {
                Some(self.resolve_type(model, params, base)?)
            }
            _ => None,
        };

        let mut members = Vec::new();
        for info in self.introspector.declared_members(handle) {
            members.push(Member {
                name: info.name,
                ty: self.resolve_type(model, params, info.ty)?,
                access,
            });
        }

        if let Some(shape) = model.decl_mut(id).shape_mut() {
            shape.base = base;
            shape.members = members;
        }
        Ok(())
    }

    /// Map a handle onto an IR type expression. Every shell a resolved
    /// handle needs is guaranteed present by the closure contract; a miss
    /// is an internal consistency violation, not a caller problem.
    fn resolve_type(
        &self,
        model: &TypeModel,
        params: &ParamTable,
        handle: TypeHandle,
    ) -> Result<TypeRef, CoreError> {
        if self.introspector.is_generic_parameter(handle) {
            return self.resolve_param(model, params, handle);
        }
        if let Some(element) = self.introspector.sequence_element(handle) {
            return Ok(TypeRef::Sequence(Box::new(
                self.resolve_type(model, params, element)?,
            )));
        }
        if let Some(primitive) = self.introspector.primitive_kind(handle) {
            return Ok(TypeRef::Primitive(defaults::collapse(primitive)));
        }
        if self.introspector.is_generic_instantiation(handle) {
            let definition = self
                .introspector
                .generic_definition(handle)
                .ok_or_else(|| CoreError::UnsupportedType {
                    handle,
                    name: self.introspector.type_name(handle),
                })?;
            let definition = self.shell_of(model, definition)?;
            let args = self
                .introspector
                .generic_arguments(handle)
                .into_iter()
                .map(|argument| self.resolve_type(model, params, argument))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(TypeRef::Instance { definition, args });
        }
        Ok(TypeRef::Decl(self.shell_of(model, handle)?))
    }

    /// Resolve a formal parameter to the canonical entry of its declaring
    /// shell, by the `(owner, name)` composite key.
    fn resolve_param(
        &self,
        model: &TypeModel,
        params: &ParamTable,
        handle: TypeHandle,
    ) -> Result<TypeRef, CoreError> {
        let name = self.introspector.type_name(handle);
        let declaring = self
            .introspector
            .declaring_definition(handle)
            .ok_or_else(|| CoreError::Resolution {
                declaring: handle,
                name: name.clone(),
            })?;
        let declaring = if self.introspector.is_generic_instantiation(declaring) {
            self.introspector
                .generic_definition(declaring)
                .unwrap_or(declaring)
        } else {
            declaring
        };
        let owner = model
            .decl_for(declaring)
            .ok_or_else(|| CoreError::Resolution {
                declaring,
                name: name.clone(),
            })?;
        let index = params
            .get(&(owner, name.clone()))
            .copied()
            .ok_or(CoreError::Resolution { declaring, name })?;
        Ok(TypeRef::Param { owner, index })
    }

    fn shell_of(&self, model: &TypeModel, handle: TypeHandle) -> Result<DeclId, CoreError> {
        model
            .decl_for(handle)
            .ok_or_else(|| CoreError::InternalConsistency {
                handle,
                name: self.introspector.type_name(handle),
            })
    }
}
