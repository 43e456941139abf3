//! TypeScript code generation for typeshift type models

pub mod error;
pub mod generator;
pub mod typescript;

use typeshift_core::ir::TypeModel;
use typeshift_core::modules::Module;

pub use error::CodegenError;
pub use generator::{Generator, GeneratorConfig};
pub use typescript::{OutputKind, RenderedModule, TypeScriptEmitter};

/// Common trait for module emitters.
pub trait ModuleEmitter {
    fn render(&self, model: &TypeModel, module: &Module) -> Result<RenderedModule, CodegenError>;
}
