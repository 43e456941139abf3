//! End-to-end generation facade
//!
//! Chains the pipeline stages for one request: dependency closure, model
//! construction, module partitioning, rendering. Each request builds its
//! own closure, model and module list from scratch; nothing is shared
//! between requests.

use crate::typescript::{RenderedModule, TypeScriptEmitter};
use crate::{CodegenError, ModuleEmitter};
use serde::{Deserialize, Serialize};
use tracing::debug;
use typeshift_core::builder::ModelBuilder;
use typeshift_core::closure::ClosureResolver;
use typeshift_core::introspect::{Introspector, TypeHandle};
use typeshift_core::modules::ModulePartitioner;

/// Knobs for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Prefix prepended to every computed import path.
    pub root_prefix: String,
    /// Emit class shapes as interface declarations.
    pub interface_default: bool,
}

impl GeneratorConfig {
    pub fn new(root_prefix: impl Into<String>) -> Self {
        Self {
            root_prefix: root_prefix.into(),
            interface_default: true,
        }
    }

    pub fn with_interface_default(mut self, interface_default: bool) -> Self {
        self.interface_default = interface_default;
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new("")
    }
}

pub struct Generator<'a, I: Introspector> {
    introspector: &'a I,
    config: GeneratorConfig,
}

impl<'a, I: Introspector> Generator<'a, I> {
    pub fn new(introspector: &'a I, config: GeneratorConfig) -> Self {
        Self {
            introspector,
            config,
        }
    }

    /// Run the whole pipeline for `roots` and return one rendered module
    /// per computed location.
    pub fn generate(&self, roots: &[TypeHandle]) -> Result<Vec<RenderedModule>, CodegenError> {
        let closure = ClosureResolver::new(self.introspector).resolve(roots)?;
        let model =
            ModelBuilder::new(self.introspector, self.config.interface_default).build(&closure)?;
        let modules = ModulePartitioner::new(self.introspector).partition(&model)?;
        debug!(
            declarations = model.len(),
            modules = modules.len(),
            "rendering modules"
        );

        let emitter = TypeScriptEmitter::new(self.config.root_prefix.clone());
        modules
            .iter()
            .map(|module| emitter.render(&model, module))
            .collect()
    }
}
