//! Module dependency resolution.
//!
//! Maps a type's origin identity to the output module that owns it, and
//! decides how a reference from one rendered type to another must be
//! qualified. The map is read-only for the whole run.

use indexmap::IndexMap;
use mlgen_core::TypeIdentity;
use mlgen_core::utils::upper_first;

use crate::error::RenderError;

/// Location of an output module.
///
/// `file` is the path of the generated source file without extension; its
/// last segment names the top-level OCaml module. `submodules` is the path of
/// nested modules inside that file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModuleLocation {
    pub file: Vec<String>,
    #[serde(default)]
    pub submodules: Vec<String>,
}

impl ModuleLocation {
    pub fn new<S: Into<String>>(file: impl IntoIterator<Item = S>) -> Self {
        Self {
            file: file.into_iter().map(Into::into).collect(),
            submodules: Vec::new(),
        }
    }

    pub fn submodule(mut self, name: impl Into<String>) -> Self {
        self.submodules.push(name.into());
        self
    }

    fn is_valid(&self) -> bool {
        !self.file.is_empty()
            && self.file.iter().all(|s| !s.is_empty())
            && self.submodules.iter().all(|s| !s.is_empty())
    }

    /// Module path from the top level: file module, then submodules.
    fn full_path(&self) -> Vec<String> {
        let mut path = Vec::with_capacity(1 + self.submodules.len());
        if let Some(last) = self.file.last() {
            path.push(upper_first(last));
        }
        path.extend(self.submodules.iter().map(|s| upper_first(s)));
        path
    }

    /// Prefix needed to reach `target` from code located in `self`.
    fn prefix_to(&self, target: &ModuleLocation) -> String {
        let segments = if self.file != target.file {
            target.full_path()
        } else {
            let common = self
                .submodules
                .iter()
                .zip(&target.submodules)
                .take_while(|(a, b)| a == b)
                .count();
            target.submodules[common..]
                .iter()
                .map(|s| upper_first(s))
                .collect()
        };
        segments.iter().map(|s| format!("{s}.")).collect()
    }
}

/// Serialized form of one dependency map entry.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DependencyEntry {
    pub identity: TypeIdentity,
    pub location: ModuleLocation,
}

/// Identity → owning module, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<DependencyEntry>", into = "Vec<DependencyEntry>")]
pub struct DependencyMap(IndexMap<TypeIdentity, ModuleLocation>);

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: TypeIdentity, location: ModuleLocation) {
        self.0.insert(identity, location);
    }

    pub fn get(&self, identity: &TypeIdentity) -> Option<&ModuleLocation> {
        self.0.get(identity)
    }
}

impl From<Vec<DependencyEntry>> for DependencyMap {
    fn from(entries: Vec<DependencyEntry>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|e| (e.identity, e.location))
                .collect(),
        )
    }
}

impl From<DependencyMap> for Vec<DependencyEntry> {
    fn from(map: DependencyMap) -> Self {
        map.0
            .into_iter()
            .map(|(identity, location)| DependencyEntry { identity, location })
            .collect()
    }
}

impl FromIterator<(TypeIdentity, ModuleLocation)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (TypeIdentity, ModuleLocation)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Read-only qualification lookups over a dependency map.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    dependencies: &'a DependencyMap,
}

impl<'a> Resolver<'a> {
    pub fn new(dependencies: &'a DependencyMap) -> Self {
        Self { dependencies }
    }

    /// Validated location of `identity`, if it is mapped at all.
    pub fn location_of(
        &self,
        identity: &TypeIdentity,
    ) -> Result<Option<&'a ModuleLocation>, RenderError> {
        match self.dependencies.get(identity) {
            Some(location) if !location.is_valid() => Err(RenderError::InvalidLocation {
                identity: identity.clone(),
            }),
            other => Ok(other),
        }
    }

    /// Module prefix (e.g. `"Shapes.Geometry."`) for a reference to `target`
    /// from code rendered for `current`. Empty when no qualification is needed.
    pub fn qualifier(
        &self,
        current: &TypeIdentity,
        target: &TypeIdentity,
    ) -> Result<String, RenderError> {
        if current == target {
            return Ok(String::new());
        }

        let from = self.location_of(current)?;
        let Some(to) = self.location_of(target)? else {
            if target.shares_module_with(current) {
                return Ok(String::new());
            }
            return Err(RenderError::UnknownIdentity {
                identity: target.clone(),
                referenced_from: current.clone(),
            });
        };

        let prefix = match from {
            Some(from) => from.prefix_to(to),
            // An unmapped type is emitted alongside its origin module's types.
            None if target.shares_module_with(current) => String::new(),
            None => to.full_path().iter().map(|s| format!("{s}.")).collect(),
        };
        tracing::trace!(%current, %target, %prefix, "qualified reference");
        Ok(prefix)
    }
}
