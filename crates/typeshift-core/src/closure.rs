//! Transitive dependency closure over the introspection graph

use crate::defaults;
use crate::error::CoreError;
use crate::introspect::{Introspector, TypeHandle};
use std::collections::HashSet;
use tracing::debug;

/// Computes, for a set of root handles, the full set of handles that must
/// be materialized as declarations.
pub struct ClosureResolver<'a, I: Introspector + ?Sized> {
    introspector: &'a I,
}

impl<'a, I: Introspector + ?Sized> ClosureResolver<'a, I> {
    pub fn new(introspector: &'a I) -> Self {
        Self { introspector }
    }

    /// Expand `roots` into the full closure, in deterministic discovery
    /// order. Closed instantiations normalize to their open definitions so
    /// every generic is declared once per definition, not once per
    /// instantiation. The visited set is the cycle breaker; a handle may
    /// still be referenced any number of times after its single expansion.
    pub fn resolve(&self, roots: &[TypeHandle]) -> Result<Vec<TypeHandle>, CoreError> {
        let mut ordered = Vec::new();
        let mut visited = HashSet::new();
        let mut frontier: Vec<TypeHandle> = Vec::new();

        for &root in roots.iter().rev() {
            frontier.push(self.normalize(root));
        }

        while let Some(handle) = frontier.pop() {
            if !visited.insert(handle) {
                continue;
            }
            if !defaults::is_declaration_shape(self.introspector, handle) {
                return Err(self.unsupported(handle));
            }
            ordered.push(handle);
            self.expand(handle, &mut frontier)?;
        }

        debug!(
            roots = roots.len(),
            closure = ordered.len(),
            "resolved dependency closure"
        );
        Ok(ordered)
    }

    fn expand(
        &self,
        handle: TypeHandle,
        frontier: &mut Vec<TypeHandle>,
    ) -> Result<(), CoreError> {
        if let Some(base) = self.introspector.base_type(handle) {
            if defaults::is_base_link(self.introspector, base) {
                self.try_add(base, frontier)?;
            }
        }
        for member in self.introspector.declared_members(handle) {
            self.try_add(member.ty, frontier)?;
        }
        Ok(())
    }

    /// Admit a referenced handle to the frontier. Primitives and formal
    /// parameters never enter the closure; sequences contribute their
    /// element; instantiations contribute their concrete arguments and
    /// then their open definition.
    fn try_add(
        &self,
        handle: TypeHandle,
        frontier: &mut Vec<TypeHandle>,
    ) -> Result<(), CoreError> {
        if self.introspector.is_recognized_primitive(handle)
            || self.introspector.is_generic_parameter(handle)
        {
            return Ok(());
        }
        if let Some(element) = self.introspector.sequence_element(handle) {
            return self.try_add(element, frontier);
        }
        if self.introspector.is_generic_instantiation(handle) {
            for argument in self.introspector.generic_arguments(handle) {
                self.try_add(argument, frontier)?;
            }
            let definition = self
                .introspector
                .generic_definition(handle)
                .ok_or_else(|| self.unsupported(handle))?;
            frontier.push(definition);
            return Ok(());
        }
        if defaults::is_declaration_shape(self.introspector, handle) {
            frontier.push(handle);
            return Ok(());
        }
        Err(self.unsupported(handle))
    }

    fn normalize(&self, handle: TypeHandle) -> TypeHandle {
        if self.introspector.is_generic_instantiation(handle) {
            self.introspector
                .generic_definition(handle)
                .unwrap_or(handle)
        } else {
            handle
        }
    }

    fn unsupported(&self, handle: TypeHandle) -> CoreError {
        CoreError::UnsupportedType {
            handle,
            name: self.introspector.type_name(handle),
        }
    }
}
