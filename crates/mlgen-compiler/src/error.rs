//! Configuration-time render failures.
//!
//! Every variant means the input descriptor (or the dependency map it is
//! rendered against) is malformed. None of them are recoverable; rendering
//! of the affected type stops at the first one.

use mlgen_core::TypeIdentity;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("unknown type identity `{identity}` referenced from `{referenced_from}`")]
    UnknownIdentity {
        identity: TypeIdentity,
        referenced_from: TypeIdentity,
    },

    #[error("dependency map has an invalid module location for `{identity}`")]
    InvalidLocation { identity: TypeIdentity },

    #[error("sum of records `{type_name}` has non-record branch `{branch}`")]
    MalformedSumOfRecords { type_name: String, branch: String },

    #[error("record branch `{branch}` of `{type_name}` must be declared as a sum of records")]
    MixedRecordBranch { type_name: String, branch: String },

    #[error("type `{type_name}` has no constructors")]
    NoConstructors { type_name: String },

    #[error("record `{type_name}` has no fields")]
    EmptyRecord { type_name: String },

    #[error("tuple of {arity} elements is not supported (expected 2 to 6)")]
    TupleArity { arity: usize },

    #[error("unexpected {found} in {context} of `{type_name}`")]
    UnexpectedValue {
        type_name: String,
        found: &'static str,
        context: &'static str,
    },
}
