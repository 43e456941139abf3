//! Module partitioning and cross-module import computation

use crate::error::CoreError;
use crate::introspect::Introspector;
use crate::ir::{DeclId, TypeModel};
use crate::location::{Location, LocationStrategy, NamespaceStrategy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// The distinct names one module imports from one foreign module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub from: Location,
    pub names: Vec<String>,
}

/// A location owning declarations, plus its computed imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub location: Location,
    /// Owned declarations, in model insertion order.
    pub decls: Vec<DeclId>,
    pub imports: Vec<Import>,
}

/// Groups declarations into modules by location and computes the minimal
/// cross-module import set.
pub struct ModulePartitioner<'a> {
    introspector: &'a dyn Introspector,
    strategy: Box<dyn LocationStrategy>,
}

impl<'a> ModulePartitioner<'a> {
    pub fn new(introspector: &'a dyn Introspector) -> Self {
        Self {
            introspector,
            strategy: Box::new(NamespaceStrategy::default()),
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn LocationStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn partition(&self, model: &TypeModel) -> Result<Vec<Module>, CoreError> {
        let mut modules: Vec<Module> = Vec::new();
        let mut by_location: HashMap<Location, usize> = HashMap::new();
        let mut owner: HashMap<DeclId, usize> = HashMap::new();

        for (id, decl) in model.iter() {
            let location = self.strategy.location_of(self.introspector, decl)?;
            let slot = match by_location.get(&location) {
                Some(&slot) => slot,
                None => {
                    modules.push(Module {
                        location: location.clone(),
                        decls: Vec::new(),
                        imports: Vec::new(),
                    });
                    by_location.insert(location, modules.len() - 1);
                    modules.len() - 1
                }
            };
            modules[slot].decls.push(id);
            owner.insert(id, slot);
        }

        let imports = (0..modules.len())
            .map(|slot| self.imports_of(model, &modules, slot, &owner))
            .collect::<Result<Vec<_>, _>>()?;
        for (module, imports) in modules.iter_mut().zip(imports) {
            module.imports = imports;
        }

        debug!(modules = modules.len(), "partitioned declarations");
        Ok(modules)
    }

    /// Walk every owned declaration's base and member type expressions,
    /// one level deep, and group the foreign references per source module.
    /// Same-module references are dropped; a module never imports itself.
    fn imports_of(
        &self,
        model: &TypeModel,
        modules: &[Module],
        slot: usize,
        owner: &HashMap<DeclId, usize>,
    ) -> Result<Vec<Import>, CoreError> {
        let mut referenced: Vec<DeclId> = Vec::new();
        for &id in &modules[slot].decls {
            model.decl(id).referenced_decls(&mut referenced);
        }

        let mut grouped: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
        for id in referenced {
            let target = *owner.get(&id).ok_or_else(|| {
                let decl = model.decl(id);
                CoreError::Configuration {
                    handle: decl.handle,
                    message: format!(
                        "referenced type {} does not belong to any module",
                        decl.name
                    ),
                }
            })?;
            if target == slot {
                continue;
            }
            grouped
                .entry(target)
                .or_default()
                .insert(model.decl(id).name.clone());
        }

        Ok(grouped
            .into_iter()
            .map(|(target, names)| Import {
                from: modules[target].location.clone(),
                names: names.into_iter().collect(),
            })
            .collect())
    }
}
