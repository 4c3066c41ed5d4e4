//! Shape classification shared by the declaration and decoder renderers.
//!
//! Both renderers match exhaustively on [`Shape`], so every constructor form
//! is validated once, in one place, before any text is produced.

use std::collections::BTreeSet;

use mlgen_core::{
    Constructor, Primitive, TypeDescriptor, TypeIdentity, ValueConstructor, ValueExpr,
};

use super::naming::hoisted_display_name;
use crate::error::RenderError;
use crate::options::Options;
use crate::resolver::Resolver;

/// Per-render context: the shared options plus the type being rendered.
pub(crate) struct RenderContext<'a> {
    pub options: &'a Options,
    pub identity: &'a TypeIdentity,
    pub display_name: &'a str,
    resolver: Resolver<'a>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(options: &'a Options, descriptor: &'a TypeDescriptor) -> Self {
        Self {
            options,
            identity: &descriptor.identity,
            display_name: &descriptor.display_name,
            resolver: Resolver::new(options.dependency_map()),
        }
    }

    /// Module prefix for a reference to `target`.
    pub(crate) fn qualifier(&self, target: &TypeIdentity) -> Result<String, RenderError> {
        self.resolver.qualifier(self.identity, target)
    }

    pub(crate) fn unexpected(&self, value: &ValueExpr, context: &'static str) -> RenderError {
        RenderError::UnexpectedValue {
            type_name: self.display_name.to_string(),
            found: value_kind(value),
            context,
        }
    }
}

fn value_kind(value: &ValueExpr) -> &'static str {
    match value {
        ValueExpr::TypeRef { .. } => "type reference",
        ValueExpr::RefApplication { .. } => "type application",
        ValueExpr::Primitive(_) => "primitive",
        ValueExpr::TypeParameter(_) => "type parameter",
        ValueExpr::Field { .. } => "field",
        ValueExpr::Product(..) => "product",
        ValueExpr::RefApplicationValues(..) => "type argument list",
        ValueExpr::Empty => "empty value",
    }
}

/// One record field, in declared order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Field<'a> {
    pub name: &'a str,
    pub value: &'a ValueExpr,
}

/// A positional constructor.
#[derive(Clone, Debug)]
pub(crate) struct Branch<'a> {
    pub name: &'a str,
    pub args: Vec<&'a ValueExpr>,
}

/// A sum-of-records branch lifted into its own record type.
#[derive(Clone, Debug)]
pub(crate) struct HoistedRecord<'a> {
    pub display_name: String,
    pub branch: &'a str,
    pub fields: Vec<Field<'a>>,
    /// Free type parameters of this record alone, sorted.
    pub type_params: Vec<String>,
}

#[derive(Clone, Debug)]
pub(crate) enum Shape<'a> {
    Alias(&'a Primitive),
    Record(Vec<Field<'a>>),
    /// Single positional constructor (untagged).
    Single(Branch<'a>),
    Sum(Vec<Branch<'a>>),
    Enumeration(&'a [String]),
    SumOfRecords(Vec<HoistedRecord<'a>>),
}

/// Classify a descriptor, rejecting malformed constructor trees.
pub(crate) fn classify(descriptor: &TypeDescriptor) -> Result<Shape<'_>, RenderError> {
    let type_name = descriptor.display_name.as_str();
    match &descriptor.constructor {
        Constructor::PrimitiveWrapper(p) => Ok(Shape::Alias(p)),
        Constructor::Enumerator(tags) if tags.is_empty() => Err(RenderError::NoConstructors {
            type_name: type_name.to_string(),
        }),
        Constructor::Enumerator(tags) => Ok(Shape::Enumeration(tags.as_slice())),
        Constructor::Value(value) => classify_value(type_name, value),
        Constructor::SumOfRecords {
            type_name: sum_name,
            branches,
        } => hoist(sum_name, branches).map(Shape::SumOfRecords),
    }
}

fn classify_value<'a>(
    type_name: &str,
    value: &'a ValueConstructor,
) -> Result<Shape<'a>, RenderError> {
    let branches = value.branches();
    let no_constructors = || RenderError::NoConstructors {
        type_name: type_name.to_string(),
    };

    if let [only] = branches.as_slice() {
        return match *only {
            ValueConstructor::Record { value, .. } => {
                record_fields(type_name, value).map(Shape::Record)
            }
            ValueConstructor::Named { name, value } => Ok(Shape::Single(Branch {
                name,
                args: value.flatten(),
            })),
            ValueConstructor::Multiple(_) => Err(no_constructors()),
        };
    }
    if branches.is_empty() {
        return Err(no_constructors());
    }

    branches
        .into_iter()
        .map(|branch| match branch {
            ValueConstructor::Named { name, value } => Ok(Branch {
                name,
                args: value.flatten(),
            }),
            ValueConstructor::Record { name, .. } => Err(RenderError::MixedRecordBranch {
                type_name: type_name.to_string(),
                branch: name.clone(),
            }),
            // `branches()` never yields a Multiple
            ValueConstructor::Multiple(_) => Err(no_constructors()),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Shape::Sum)
}

/// Record fields in declared order.
pub(crate) fn record_fields<'a>(
    type_name: &str,
    value: &'a ValueExpr,
) -> Result<Vec<Field<'a>>, RenderError> {
    let fields = value
        .flatten()
        .into_iter()
        .map(|item| match item {
            ValueExpr::Field { name, value } => Ok(Field { name, value }),
            other => Err(RenderError::UnexpectedValue {
                type_name: type_name.to_string(),
                found: value_kind(other),
                context: "record",
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if fields.is_empty() {
        return Err(RenderError::EmptyRecord {
            type_name: type_name.to_string(),
        });
    }
    Ok(fields)
}

/// Lift every branch of a sum of records into a standalone record.
///
/// Hoisted records keep branch order and are named `<type_name><Branch>`.
/// They are never entered into the dependency map.
pub(crate) fn hoist<'a>(
    type_name: &str,
    branches: &'a ValueConstructor,
) -> Result<Vec<HoistedRecord<'a>>, RenderError> {
    let branches = branches.branches();
    if branches.is_empty() {
        return Err(RenderError::NoConstructors {
            type_name: type_name.to_string(),
        });
    }

    branches
        .into_iter()
        .map(|branch| match branch {
            ValueConstructor::Record { name, value } => {
                let display_name = hoisted_display_name(type_name, name);
                let fields = record_fields(&display_name, value)?;
                let mut params = BTreeSet::new();
                value.collect_type_params(&mut params);
                Ok(HoistedRecord {
                    display_name,
                    branch: name,
                    fields,
                    type_params: params.into_iter().collect(),
                })
            }
            other => Err(RenderError::MalformedSumOfRecords {
                type_name: type_name.to_string(),
                branch: other.name().unwrap_or("<multiple>").to_string(),
            }),
        })
        .collect()
}
