//! Run-wide rendering options.
//!
//! One `Options` value is built per run and shared by reference across every
//! render call. Nothing in the renderers mutates it.

use mlgen_core::TypeIdentity;
use mlgen_core::utils::{
    lower_first, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case, upper_first,
};

use crate::resolver::{DependencyMap, ModuleLocation};

/// A single renaming step.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NameStep {
    /// Remove `prefix` when the name starts with it.
    DropPrefix { prefix: String },
    /// Remove the first `count` characters.
    DropChars { count: usize },
    SnakeCase,
    CamelCase,
    PascalCase,
    KebabCase,
    Lowercase,
    Uppercase,
    LowerFirst,
    UpperFirst,
}

impl NameStep {
    fn apply(&self, name: &str) -> String {
        match self {
            NameStep::DropPrefix { prefix } => {
                name.strip_prefix(prefix.as_str()).unwrap_or(name).to_string()
            }
            NameStep::DropChars { count } => name.chars().skip(*count).collect(),
            NameStep::SnakeCase => to_snake_case(name),
            NameStep::CamelCase => to_camel_case(name),
            NameStep::PascalCase => to_pascal_case(name),
            NameStep::KebabCase => to_kebab_case(name),
            NameStep::Lowercase => name.to_lowercase(),
            NameStep::Uppercase => name.to_uppercase(),
            NameStep::LowerFirst => lower_first(name),
            NameStep::UpperFirst => upper_first(name),
        }
    }
}

/// Ordered pipeline of renaming steps. The empty pipeline is the identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct NameTransform(Vec<NameStep>);

impl NameTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Append a step to the pipeline.
    pub fn then(mut self, step: NameStep) -> Self {
        self.0.push(step);
        self
    }

    pub fn apply(&self, name: &str) -> String {
        self.0
            .iter()
            .fold(name.to_string(), |acc, step| step.apply(&acc))
    }
}

impl From<NameStep> for NameTransform {
    fn from(step: NameStep) -> Self {
        Self(vec![step])
    }
}

/// Options shared by the declaration and decoder renderers.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Applied to record field names to obtain JSON keys
    pub(crate) field_label: NameTransform,
    /// Applied to constructor names to obtain JSON tags
    pub(crate) constructor_tag: NameTransform,
    /// Owning output module per type identity
    pub(crate) dependencies: DependencyMap,
    /// Whether signature text is produced alongside implementations
    pub(crate) signatures: bool,
}

impl Options {
    /// Create new Options with identity transforms and no dependencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from their JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the field-label transform.
    pub fn field_label(mut self, transform: impl Into<NameTransform>) -> Self {
        self.field_label = transform.into();
        self
    }

    /// Set the constructor-tag transform.
    pub fn constructor_tag(mut self, transform: impl Into<NameTransform>) -> Self {
        self.constructor_tag = transform.into();
        self
    }

    /// Register the output module owning `identity`.
    pub fn dependency(mut self, identity: TypeIdentity, location: ModuleLocation) -> Self {
        self.dependencies.insert(identity, location);
        self
    }

    /// Replace the whole dependency map.
    pub fn dependencies(mut self, dependencies: DependencyMap) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Set whether signatures are emitted.
    pub fn signatures(mut self, value: bool) -> Self {
        self.signatures = value;
        self
    }

    /// JSON key for a record field.
    pub fn json_key(&self, field: &str) -> String {
        self.field_label.apply(field)
    }

    /// JSON tag for a constructor.
    pub fn json_tag(&self, constructor: &str) -> String {
        self.constructor_tag.apply(constructor)
    }

    pub fn dependency_map(&self) -> &DependencyMap {
        &self.dependencies
    }

    pub fn emits_signatures(&self) -> bool {
        self.signatures
    }
}
