#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for mlgen type descriptors.
//!
//! A descriptor is the language-neutral shape of one exported type: records,
//! tagged sums, enumerations and generic parameters. Descriptors are produced
//! by an external extractor, deserialized once, and never mutated afterwards.
//!
//! Three layers:
//! - **Identity**: `TypeIdentity` ties a descriptor back to its origin definition
//! - **Constructors**: the closed set of top-level shapes a type can take
//! - **Values**: the recursive field-type tree (`ValueExpr`)

use std::collections::BTreeSet;
use std::fmt;

pub mod utils;

#[cfg(test)]
mod lib_tests;

// ============================================================================
// Identity
// ============================================================================

/// Globally unique identity of an origin type definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct TypeIdentity {
    pub package: String,
    pub module: String,
    pub name: String,
}

impl TypeIdentity {
    pub fn new(
        package: impl Into<String>,
        module: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            module: module.into(),
            name: name.into(),
        }
    }

    /// True when both identities live in the same origin module.
    pub fn shares_module_with(&self, other: &TypeIdentity) -> bool {
        self.package == other.package && self.module == other.module
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.package, self.module, self.name)
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// One exported type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypeDescriptor {
    pub identity: TypeIdentity,
    pub display_name: String,
    pub constructor: Constructor,
}

impl TypeDescriptor {
    pub fn new(identity: TypeIdentity, constructor: Constructor) -> Self {
        Self {
            display_name: identity.name.clone(),
            identity,
            constructor,
        }
    }

    /// Free type-parameter names, deduplicated and sorted.
    pub fn type_params(&self) -> Vec<String> {
        let mut params = BTreeSet::new();
        self.constructor.collect_type_params(&mut params);
        params.into_iter().collect()
    }

    /// Whether any value in the descriptor mentions `identity`.
    pub fn references(&self, identity: &TypeIdentity) -> bool {
        self.constructor.references(identity)
    }
}

/// Top-level shape of a type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constructor {
    /// Alias of a primitive, e.g. `newtype UserId = Int` flattened by the extractor.
    PrimitiveWrapper(Primitive),
    Value(ValueConstructor),
    /// Nullary constructors only; holds the tag names in declared order.
    Enumerator(Vec<String>),
    /// A sum whose every branch is a record. Branches get hoisted into
    /// standalone record types named `<type_name><Branch>`.
    SumOfRecords {
        type_name: String,
        branches: ValueConstructor,
    },
}

impl Constructor {
    fn collect_type_params(&self, out: &mut BTreeSet<String>) {
        match self {
            Constructor::PrimitiveWrapper(p) => p.collect_type_params(out),
            Constructor::Value(v) | Constructor::SumOfRecords { branches: v, .. } => {
                v.collect_type_params(out)
            }
            Constructor::Enumerator(_) => {}
        }
    }

    fn references(&self, identity: &TypeIdentity) -> bool {
        match self {
            Constructor::PrimitiveWrapper(p) => p.references(identity),
            Constructor::Value(v) | Constructor::SumOfRecords { branches: v, .. } => {
                v.references(identity)
            }
            Constructor::Enumerator(_) => false,
        }
    }
}

/// Constructor shape of a value-carrying type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueConstructor {
    /// Positional constructor; `value` is a `Product` chain, a single value, or `Empty`.
    Named { name: String, value: ValueExpr },
    /// Record constructor; `value` is a `Product` chain of `Field`s.
    Record { name: String, value: ValueExpr },
    Multiple(Vec<ValueConstructor>),
}

impl ValueConstructor {
    pub fn named(name: impl Into<String>, args: impl IntoIterator<Item = ValueExpr>) -> Self {
        ValueConstructor::Named {
            name: name.into(),
            value: ValueExpr::product(args),
        }
    }

    pub fn record<N, I>(name: impl Into<String>, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, ValueExpr)>,
    {
        ValueConstructor::Record {
            name: name.into(),
            value: ValueExpr::product(
                fields
                    .into_iter()
                    .map(|(label, value)| ValueExpr::field(label, value)),
            ),
        }
    }

    /// Branches in declared order, with nested `Multiple`s flattened.
    pub fn branches(&self) -> Vec<&ValueConstructor> {
        let mut out = Vec::new();
        self.push_branches(&mut out);
        out
    }

    fn push_branches<'a>(&'a self, out: &mut Vec<&'a ValueConstructor>) {
        match self {
            ValueConstructor::Multiple(items) => {
                for item in items {
                    item.push_branches(out);
                }
            }
            other => out.push(other),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ValueConstructor::Named { name, .. } | ValueConstructor::Record { name, .. } => {
                Some(name)
            }
            ValueConstructor::Multiple(_) => None,
        }
    }

    pub fn collect_type_params(&self, out: &mut BTreeSet<String>) {
        match self {
            ValueConstructor::Named { value, .. } | ValueConstructor::Record { value, .. } => {
                value.collect_type_params(out)
            }
            ValueConstructor::Multiple(items) => {
                for item in items {
                    item.collect_type_params(out);
                }
            }
        }
    }

    pub fn references(&self, identity: &TypeIdentity) -> bool {
        match self {
            ValueConstructor::Named { value, .. } | ValueConstructor::Record { value, .. } => {
                value.references(identity)
            }
            ValueConstructor::Multiple(items) => items.iter().any(|i| i.references(identity)),
        }
    }
}

// ============================================================================
// Values
// ============================================================================

/// Recursive field-type tree.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueExpr {
    TypeRef {
        identity: TypeIdentity,
        name: String,
    },
    /// Generic type applied to arguments; `args` is a `RefApplicationValues` chain.
    RefApplication {
        identity: TypeIdentity,
        args: Box<ValueExpr>,
    },
    Primitive(Primitive),
    TypeParameter(String),
    Field {
        name: String,
        value: Box<ValueExpr>,
    },
    /// Right-nested pair encoding an n-ary argument list.
    Product(Box<ValueExpr>, Box<ValueExpr>),
    RefApplicationValues(Box<ValueExpr>, Box<ValueExpr>),
    Empty,
}

impl ValueExpr {
    pub fn type_ref(identity: TypeIdentity) -> Self {
        ValueExpr::TypeRef {
            name: identity.name.clone(),
            identity,
        }
    }

    pub fn apply(identity: TypeIdentity, args: impl IntoIterator<Item = ValueExpr>) -> Self {
        ValueExpr::RefApplication {
            identity,
            args: Box::new(Self::right_nested(args, ValueExpr::RefApplicationValues)),
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        ValueExpr::TypeParameter(name.into())
    }

    pub fn field(name: impl Into<String>, value: ValueExpr) -> Self {
        ValueExpr::Field {
            name: name.into(),
            value: Box::new(value),
        }
    }

    /// Build the right-nested `Product` encoding of an argument list.
    ///
    /// Zero items give `Empty`, one item is returned as-is.
    pub fn product(items: impl IntoIterator<Item = ValueExpr>) -> Self {
        Self::right_nested(items, ValueExpr::Product)
    }

    fn right_nested(
        items: impl IntoIterator<Item = ValueExpr>,
        pair: fn(Box<ValueExpr>, Box<ValueExpr>) -> ValueExpr,
    ) -> Self {
        let mut items: Vec<ValueExpr> = items.into_iter().collect();
        let Some(mut acc) = items.pop() else {
            return ValueExpr::Empty;
        };
        while let Some(left) = items.pop() {
            acc = pair(Box::new(left), Box::new(acc));
        }
        acc
    }

    /// Flatten `Product` and `RefApplicationValues` chains into declared order.
    ///
    /// `Empty` contributes nothing.
    pub fn flatten(&self) -> Vec<&ValueExpr> {
        let mut out = Vec::new();
        self.push_flat(&mut out);
        out
    }

    fn push_flat<'a>(&'a self, out: &mut Vec<&'a ValueExpr>) {
        match self {
            ValueExpr::Product(l, r) | ValueExpr::RefApplicationValues(l, r) => {
                l.push_flat(out);
                r.push_flat(out);
            }
            ValueExpr::Empty => {}
            other => out.push(other),
        }
    }

    pub fn collect_type_params(&self, out: &mut BTreeSet<String>) {
        match self {
            ValueExpr::TypeParameter(name) => {
                out.insert(name.clone());
            }
            ValueExpr::RefApplication { args, .. } => args.collect_type_params(out),
            ValueExpr::Primitive(p) => p.collect_type_params(out),
            ValueExpr::Field { value, .. } => value.collect_type_params(out),
            ValueExpr::Product(l, r) | ValueExpr::RefApplicationValues(l, r) => {
                l.collect_type_params(out);
                r.collect_type_params(out);
            }
            ValueExpr::TypeRef { .. } | ValueExpr::Empty => {}
        }
    }

    pub fn references(&self, identity: &TypeIdentity) -> bool {
        match self {
            ValueExpr::TypeRef { identity: id, .. } => id == identity,
            ValueExpr::RefApplication { identity: id, args } => {
                id == identity || args.references(identity)
            }
            ValueExpr::Primitive(p) => p.references(identity),
            ValueExpr::Field { value, .. } => value.references(identity),
            ValueExpr::Product(l, r) | ValueExpr::RefApplicationValues(l, r) => {
                l.references(identity) || r.references(identity)
            }
            ValueExpr::TypeParameter(_) | ValueExpr::Empty => false,
        }
    }
}

impl From<Primitive> for ValueExpr {
    fn from(p: Primitive) -> Self {
        ValueExpr::Primitive(p)
    }
}

/// Built-in types with a fixed target mapping.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Bool,
    Char,
    Date,
    Float,
    Int,
    Int32,
    String,
    Unit,
    List(Box<ValueExpr>),
    Option(Box<ValueExpr>),
    Either(Box<ValueExpr>, Box<ValueExpr>),
    /// Two to six elements.
    Tuple(Vec<ValueExpr>),
}

impl Primitive {
    pub fn list(inner: impl Into<ValueExpr>) -> Self {
        Primitive::List(Box::new(inner.into()))
    }

    pub fn option(inner: impl Into<ValueExpr>) -> Self {
        Primitive::Option(Box::new(inner.into()))
    }

    pub fn either(left: impl Into<ValueExpr>, right: impl Into<ValueExpr>) -> Self {
        Primitive::Either(Box::new(left.into()), Box::new(right.into()))
    }

    /// `List(Char)`, rendered as a string rather than a list of characters.
    pub fn is_char_list(&self) -> bool {
        matches!(self, Primitive::List(inner) if **inner == ValueExpr::Primitive(Primitive::Char))
    }

    fn collect_type_params(&self, out: &mut BTreeSet<String>) {
        match self {
            Primitive::List(v) | Primitive::Option(v) => v.collect_type_params(out),
            Primitive::Either(l, r) => {
                l.collect_type_params(out);
                r.collect_type_params(out);
            }
            Primitive::Tuple(items) => {
                for item in items {
                    item.collect_type_params(out);
                }
            }
            _ => {}
        }
    }

    fn references(&self, identity: &TypeIdentity) -> bool {
        match self {
            Primitive::List(v) | Primitive::Option(v) => v.references(identity),
            Primitive::Either(l, r) => l.references(identity) || r.references(identity),
            Primitive::Tuple(items) => items.iter().any(|i| i.references(identity)),
            _ => false,
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a JSON array of descriptors as written by the extractor.
pub fn parse_descriptors(json: &str) -> Result<Vec<TypeDescriptor>, serde_json::Error> {
    serde_json::from_str(json)
}
