//! Module locations and the pluggable location-assignment strategy

use crate::error::CoreError;
use crate::introspect::Introspector;
use crate::ir::Declaration;
use serde::{Deserialize, Serialize};

/// Identity of a module: a name plus an ordered path. Segment order is
/// significant, so two equal-length, differently-ordered paths are distinct
/// locations with (almost surely) distinct hashes.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Location {
    pub name: String,
    pub path: Vec<String>,
}

impl Location {
    pub fn new(name: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            name: name.into(),
            path,
        }
    }

    /// Import path of this module under `root_prefix`, e.g.
    /// `Root/First/Second/Name`.
    pub fn import_path(&self, root_prefix: &str) -> String {
        let mut out = String::from(root_prefix);
        for segment in &self.path {
            out.push('/');
            out.push_str(segment);
        }
        out.push('/');
        out.push_str(&self.name);
        out
    }
}

/// Assigns each declaration to a module location.
pub trait LocationStrategy {
    fn location_of(
        &self,
        introspector: &dyn Introspector,
        declaration: &Declaration,
    ) -> Result<Location, CoreError>;
}

/// Default strategy: split the declaration's hierarchical logical location
/// on a separator; the last segment becomes the module name, the leading
/// segments the ordered path.
#[derive(Debug, Clone)]
pub struct NamespaceStrategy {
    separator: char,
}

impl NamespaceStrategy {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl Default for NamespaceStrategy {
    fn default() -> Self {
        Self::new('.')
    }
}

impl LocationStrategy for NamespaceStrategy {
    fn location_of(
        &self,
        introspector: &dyn Introspector,
        declaration: &Declaration,
    ) -> Result<Location, CoreError> {
        let raw = introspector
            .logical_location(declaration.handle)
            .filter(|location| !location.is_empty())
            .ok_or_else(|| CoreError::Configuration {
                handle: declaration.handle,
                message: format!("type {} is missing a logical location", declaration.name),
            })?;
        let mut segments: Vec<String> = raw
            .split(self.separator)
            .map(str::to_string)
            .collect();
        let name = segments.pop().unwrap_or_default();
        Ok(Location::new(name, segments))
    }
}
