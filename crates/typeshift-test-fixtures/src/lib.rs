//! In-memory type universes for exercising the generation pipeline
//!
//! [`TypeUniverse`] plays the role of the reflection layer in tests: type
//! descriptors are registered by hand and served back through the
//! [`Introspector`] trait. Handles are indices into the entry table, so
//! identity semantics match the real provider contract.

use std::collections::HashMap;
use typeshift_core::introspect::{
    EnumMemberInfo, Introspector, MemberInfo, SourcePrimitive, TypeHandle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeKind {
    Class,
    Interface,
}

#[derive(Debug)]
enum Entry {
    UniversalRoot,
    EnumRoot,
    Primitive {
        name: &'static str,
        kind: SourcePrimitive,
    },
    Sequence {
        name: String,
        element: TypeHandle,
    },
    Shape {
        name: String,
        location: Option<String>,
        kind: ShapeKind,
        members: Vec<MemberInfo>,
        base: Option<TypeHandle>,
        params: Vec<TypeHandle>,
    },
    EnumType {
        name: String,
        location: Option<String>,
        members: Vec<EnumMemberInfo>,
    },
    Param {
        name: String,
        declaring: TypeHandle,
    },
    Instantiation {
        definition: TypeHandle,
        args: Vec<TypeHandle>,
    },
}

/// A hand-built type system. The universal root, the enum root and the
/// eight recognized primitives are pre-registered.
#[derive(Debug)]
pub struct TypeUniverse {
    entries: Vec<Entry>,
    primitives: HashMap<SourcePrimitive, TypeHandle>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        let mut universe = Self {
            entries: Vec::new(),
            primitives: HashMap::new(),
        };
        universe.push(Entry::UniversalRoot);
        universe.push(Entry::EnumRoot);
        for (name, kind) in [
            ("bool", SourcePrimitive::Bool),
            ("string", SourcePrimitive::Text),
            ("DateTime", SourcePrimitive::DateTime),
            ("DateTimeOffset", SourcePrimitive::DateTimeOffset),
            ("int", SourcePrimitive::Int),
            ("long", SourcePrimitive::Long),
            ("decimal", SourcePrimitive::Decimal),
            ("double", SourcePrimitive::Double),
        ] {
            let handle = universe.push(Entry::Primitive { name, kind });
            universe.primitives.insert(kind, handle);
        }
        universe
    }

    fn push(&mut self, entry: Entry) -> TypeHandle {
        let handle = TypeHandle(self.entries.len() as u64);
        self.entries.push(entry);
        handle
    }

    fn entry(&self, handle: TypeHandle) -> &Entry {
        &self.entries[handle.0 as usize]
    }

    pub fn universal_root(&self) -> TypeHandle {
        TypeHandle(0)
    }

    pub fn enum_root(&self) -> TypeHandle {
        TypeHandle(1)
    }

    pub fn primitive(&self, kind: SourcePrimitive) -> TypeHandle {
        self.primitives[&kind]
    }

    /// Register a class at `location`; its base defaults to the universal
    /// root until [`set_base`](Self::set_base) is called.
    pub fn class(&mut self, location: &str, name: &str) -> TypeHandle {
        let base = self.universal_root();
        self.push(Entry::Shape {
            name: name.to_string(),
            location: Some(location.to_string()),
            kind: ShapeKind::Class,
            members: Vec::new(),
            base: Some(base),
            params: Vec::new(),
        })
    }

    /// A class with no logical location, for exercising the request-time
    /// configuration error.
    pub fn class_without_location(&mut self, name: &str) -> TypeHandle {
        let base = self.universal_root();
        self.push(Entry::Shape {
            name: name.to_string(),
            location: None,
            kind: ShapeKind::Class,
            members: Vec::new(),
            base: Some(base),
            params: Vec::new(),
        })
    }

    pub fn interface(&mut self, location: &str, name: &str) -> TypeHandle {
        self.push(Entry::Shape {
            name: name.to_string(),
            location: Some(location.to_string()),
            kind: ShapeKind::Interface,
            members: Vec::new(),
            base: None,
            params: Vec::new(),
        })
    }

    /// Register an open generic class definition with the given formal
    /// parameter names. Parameter handles are owned by the definition.
    pub fn generic_class(&mut self, location: &str, name: &str, params: &[&str]) -> TypeHandle {
        let base = self.universal_root();
        let handle = self.push(Entry::Shape {
            name: name.to_string(),
            location: Some(location.to_string()),
            kind: ShapeKind::Class,
            members: Vec::new(),
            base: Some(base),
            params: Vec::new(),
        });
        let params: Vec<TypeHandle> = params
            .iter()
            .map(|param| {
                self.push(Entry::Param {
                    name: (*param).to_string(),
                    declaring: handle,
                })
            })
            .collect();
        if let Entry::Shape { params: slot, .. } = &mut self.entries[handle.0 as usize] {
            *slot = params;
        }
        handle
    }

    /// Handle of a formal parameter declared on `definition`.
    pub fn param(&self, definition: TypeHandle, name: &str) -> TypeHandle {
        match self.entry(definition) {
            Entry::Shape { params, .. } => params
                .iter()
                .copied()
                .find(|&param| match self.entry(param) {
                    Entry::Param { name: n, .. } => n == name,
                    _ => false,
                })
                .unwrap_or_else(|| panic!("no parameter {name} on definition")),
            _ => panic!("handle is not a generic definition"),
        }
    }

    pub fn enumeration(
        &mut self,
        location: &str,
        name: &str,
        members: &[(&str, i64)],
    ) -> TypeHandle {
        self.push(Entry::EnumType {
            name: name.to_string(),
            location: Some(location.to_string()),
            members: members
                .iter()
                .map(|(name, value)| EnumMemberInfo {
                    name: (*name).to_string(),
                    value: *value,
                })
                .collect(),
        })
    }

    pub fn property(&mut self, owner: TypeHandle, name: &str, ty: TypeHandle) {
        if let Entry::Shape { members, .. } = &mut self.entries[owner.0 as usize] {
            members.push(MemberInfo {
                name: name.to_string(),
                ty,
            });
        }
    }

    pub fn set_base(&mut self, handle: TypeHandle, base: TypeHandle) {
        if let Entry::Shape { base: slot, .. } = &mut self.entries[handle.0 as usize] {
            *slot = Some(base);
        }
    }

    pub fn array_of(&mut self, element: TypeHandle) -> TypeHandle {
        let name = format!("{}[]", self.type_name(element));
        self.push(Entry::Sequence { name, element })
    }

    /// Any named homogeneous collection shape (lists, sets, enumerables,
    /// custom subclasses of them) over `element`.
    pub fn sequence_of(&mut self, shape_name: &str, element: TypeHandle) -> TypeHandle {
        let name = format!("{}<{}>", shape_name, self.type_name(element));
        self.push(Entry::Sequence { name, element })
    }

    pub fn list_of(&mut self, element: TypeHandle) -> TypeHandle {
        self.sequence_of("List", element)
    }

    /// Closed instantiation of an open generic definition.
    pub fn instantiate(&mut self, definition: TypeHandle, args: &[TypeHandle]) -> TypeHandle {
        self.push(Entry::Instantiation {
            definition,
            args: args.to_vec(),
        })
    }
}

impl Default for TypeUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl Introspector for TypeUniverse {
    fn type_name(&self, handle: TypeHandle) -> String {
        match self.entry(handle) {
            Entry::UniversalRoot => "Object".to_string(),
            Entry::EnumRoot => "Enum".to_string(),
            Entry::Primitive { name, .. } => (*name).to_string(),
            Entry::Sequence { name, .. } => name.clone(),
            Entry::Shape { name, .. } => name.clone(),
            Entry::EnumType { name, .. } => name.clone(),
            Entry::Param { name, .. } => name.clone(),
            Entry::Instantiation { definition, .. } => self.type_name(*definition),
        }
    }

    fn logical_location(&self, handle: TypeHandle) -> Option<String> {
        match self.entry(handle) {
            Entry::Shape { location, .. } => location.clone(),
            Entry::EnumType { location, .. } => location.clone(),
            Entry::Instantiation { definition, .. } => self.logical_location(*definition),
            _ => None,
        }
    }

    fn is_enum(&self, handle: TypeHandle) -> bool {
        matches!(self.entry(handle), Entry::EnumType { .. })
    }

    fn is_class(&self, handle: TypeHandle) -> bool {
        match self.entry(handle) {
            Entry::Shape { kind, .. } => *kind == ShapeKind::Class,
            Entry::Instantiation { definition, .. } => self.is_class(*definition),
            _ => false,
        }
    }

    fn is_interface(&self, handle: TypeHandle) -> bool {
        match self.entry(handle) {
            Entry::Shape { kind, .. } => *kind == ShapeKind::Interface,
            Entry::Instantiation { definition, .. } => self.is_interface(*definition),
            _ => false,
        }
    }

    fn declared_members(&self, handle: TypeHandle) -> Vec<MemberInfo> {
        match self.entry(handle) {
            Entry::Shape { members, .. } => members.clone(),
            _ => Vec::new(),
        }
    }

    fn base_type(&self, handle: TypeHandle) -> Option<TypeHandle> {
        match self.entry(handle) {
            Entry::Shape { base, .. } => *base,
            Entry::EnumType { .. } => Some(self.enum_root()),
            _ => None,
        }
    }

    fn is_generic_definition(&self, handle: TypeHandle) -> bool {
        matches!(self.entry(handle), Entry::Shape { params, .. } if !params.is_empty())
    }

    fn is_generic_instantiation(&self, handle: TypeHandle) -> bool {
        matches!(self.entry(handle), Entry::Instantiation { .. })
    }

    fn generic_arguments(&self, handle: TypeHandle) -> Vec<TypeHandle> {
        match self.entry(handle) {
            Entry::Shape { params, .. } => params.clone(),
            Entry::Instantiation { args, .. } => args.clone(),
            _ => Vec::new(),
        }
    }

    fn generic_definition(&self, handle: TypeHandle) -> Option<TypeHandle> {
        match self.entry(handle) {
            Entry::Instantiation { definition, .. } => Some(*definition),
            _ => None,
        }
    }

    fn is_generic_parameter(&self, handle: TypeHandle) -> bool {
        matches!(self.entry(handle), Entry::Param { .. })
    }

    fn declaring_definition(&self, handle: TypeHandle) -> Option<TypeHandle> {
        match self.entry(handle) {
            Entry::Param { declaring, .. } => Some(*declaring),
            _ => None,
        }
    }

    fn enum_members(&self, handle: TypeHandle) -> Vec<EnumMemberInfo> {
        match self.entry(handle) {
            Entry::EnumType { members, .. } => members.clone(),
            _ => Vec::new(),
        }
    }

    fn primitive_kind(&self, handle: TypeHandle) -> Option<SourcePrimitive> {
        match self.entry(handle) {
            Entry::Primitive { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    fn sequence_element(&self, handle: TypeHandle) -> Option<TypeHandle> {
        match self.entry(handle) {
            Entry::Sequence { element, .. } => Some(*element),
            _ => None,
        }
    }

    fn is_universal_root(&self, handle: TypeHandle) -> bool {
        matches!(self.entry(handle), Entry::UniversalRoot)
    }

    fn is_enum_root(&self, handle: TypeHandle) -> bool {
        matches!(self.entry(handle), Entry::EnumRoot)
    }
}
