//! TypeScript emitter
//!
//! Renders one module at a time into the deterministic target text. All
//! ordering is explicit: imports sort by their computed path, names inside
//! an import sort lexicographically, declarations and members keep their
//! insertion order. Nothing iterates an unordered container into the
//! output.

use crate::error::CodegenError;
use crate::ModuleEmitter;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use typeshift_core::ir::{
    DeclKind, Declaration, EnumDecl, PrimitiveKind, ShapeDecl, TypeModel, TypeRef,
};
use typeshift_core::location::Location;
use typeshift_core::modules::{Import, Module};

/// Whether a rendered module carries implementation surface. Classes do;
/// a module of interfaces and enums is declaration-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputKind {
    Structural,
    DeclarationOnly,
}

impl OutputKind {
    /// File suffix convention: full sources for class-bearing modules,
    /// declaration files otherwise.
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputKind::Structural => "ts",
            OutputKind::DeclarationOnly => "d.ts",
        }
    }
}

/// One rendered module plus the metadata needed to place it on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedModule {
    pub text: String,
    pub kind: OutputKind,
    pub location: Location,
}

impl RenderedModule {
    /// Path this module occupies under `output_dir`.
    pub fn file_path(&self, output_dir: &str) -> String {
        let mut out = String::from(output_dir);
        for segment in &self.location.path {
            out.push('/');
            out.push_str(segment);
        }
        out.push('/');
        out.push_str(&self.location.name);
        out.push('.');
        out.push_str(self.kind.file_extension());
        out
    }
}

pub struct TypeScriptEmitter {
    root_prefix: String,
}

impl TypeScriptEmitter {
    pub fn new(root_prefix: impl Into<String>) -> Self {
        Self {
            root_prefix: root_prefix.into(),
        }
    }

    fn render_imports(&self, out: &mut String, module: &Module) -> Result<(), CodegenError> {
        let mut imports: Vec<&Import> = module.imports.iter().collect();
        imports.sort_by_key(|import| import.from.import_path(&self.root_prefix));
        for import in &imports {
            let mut names = import.names.clone();
            names.sort();
            writeln!(
                out,
                "import {{ {} }} from \"{}\";",
                names.join(", "),
                import.from.import_path(&self.root_prefix)
            )?;
        }
        if !imports.is_empty() {
            out.push('\n');
        }
        Ok(())
    }

    fn render_declaration(
        &self,
        out: &mut String,
        model: &TypeModel,
        declaration: &Declaration,
    ) -> Result<(), CodegenError> {
        match &declaration.kind {
            DeclKind::Class(shape) => self.render_shape(out, model, declaration, shape, "class"),
            DeclKind::Interface(shape) => {
                self.render_shape(out, model, declaration, shape, "interface")
            }
            DeclKind::Enum(decl) => self.render_enum(out, declaration, decl),
        }
    }

    fn render_shape(
        &self,
        out: &mut String,
        model: &TypeModel,
        declaration: &Declaration,
        shape: &ShapeDecl,
        keyword: &str,
    ) -> Result<(), CodegenError> {
        if declaration.export {
            out.push_str("export ");
        }
        write!(out, "{} {}", keyword, declaration.name)?;
        if !shape.generic_params.is_empty() {
            let params: Vec<&str> = shape
                .generic_params
                .iter()
                .map(|param| param.name.as_str())
                .collect();
            write!(out, "<{}>", params.join(", "))?;
        }
        if let Some(base) = &shape.base {
            write!(out, " extends {}", type_expression(model, base))?;
        }
        out.push_str(" {\n");
        for member in &shape.members {
            out.push('\t');
            if let Some(access) = member.access.keyword() {
                out.push_str(access);
                out.push(' ');
            }
            writeln!(out, "{}: {};", member.name, type_expression(model, &member.ty))?;
        }
        out.push_str("}\n");
        Ok(())
    }

    fn render_enum(
        &self,
        out: &mut String,
        declaration: &Declaration,
        decl: &EnumDecl,
    ) -> Result<(), CodegenError> {
        if declaration.export {
            out.push_str("export ");
        }
        writeln!(out, "enum {} {{", declaration.name)?;
        for (index, member) in decl.members.iter().enumerate() {
            write!(out, "\t{} = {}", member.name, member.value)?;
            out.push_str(if index + 1 == decl.members.len() {
                "\n"
            } else {
                ",\n"
            });
        }
        out.push_str("}\n");
        Ok(())
    }
}

impl ModuleEmitter for TypeScriptEmitter {
    fn render(&self, model: &TypeModel, module: &Module) -> Result<RenderedModule, CodegenError> {
        let mut text = String::new();
        self.render_imports(&mut text, module)?;
        for &id in &module.decls {
            self.render_declaration(&mut text, model, model.decl(id))?;
        }
        let kind = if module.decls.iter().any(|&id| model.decl(id).is_class()) {
            OutputKind::Structural
        } else {
            OutputKind::DeclarationOnly
        };
        Ok(RenderedModule {
            text,
            kind,
            location: module.location.clone(),
        })
    }
}

/// Render a type expression. Instantiations expand recursively as
/// `Name<arg, arg>`; parameters render as their bare name.
fn type_expression(model: &TypeModel, ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(kind) => primitive_name(*kind).to_string(),
        TypeRef::Sequence(element) => format!("{}[]", type_expression(model, element)),
        TypeRef::Param { owner, index } => model.param_name(*owner, *index).to_string(),
        TypeRef::Instance { definition, args } => {
            let rendered: Vec<String> = args
                .iter()
                .map(|arg| type_expression(model, arg))
                .collect();
            format!("{}<{}>", model.decl(*definition).name, rendered.join(", "))
        }
        TypeRef::Decl(id) => model.decl(*id).name.clone(),
    }
}

/// Fixed primitive rendering table.
fn primitive_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "boolean",
        PrimitiveKind::Text => "string",
        PrimitiveKind::Date => "Date",
        PrimitiveKind::Number => "number",
    }
}
