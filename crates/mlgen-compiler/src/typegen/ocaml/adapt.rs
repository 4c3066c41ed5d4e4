//! Calling-convention boundary for generated decoders.
//!
//! Runtime combinators in `Aeson.Decode` raise `DecodeError` on failure,
//! while every generated `decodeX` function returns a `Belt.Result.t`.
//! Generated code crosses between the two only through the fragments built
//! here: [`adapt`] for decoder values, and [`caught`] for turning a raised
//! error back into a result at the edge of a generated function.
//!
//! Runtime helpers used at the boundary:
//! - `Aeson.Decode.wrapResult d json`: runs a raising decoder, returns a result
//! - `Aeson.Decode.unwrapResult r`: returns the `Ok` value, raises on `Error`

use super::naming::string_literal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Convention {
    /// `Js.Json.t -> 'a`, raising `Aeson.Decode.DecodeError`.
    Raising,
    /// `Js.Json.t -> ('a, string) Belt.Result.t`.
    Result,
}

/// A decoder-valued OCaml expression tagged with its convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DecoderExpr {
    pub text: String,
    pub convention: Convention,
}

impl DecoderExpr {
    pub(crate) fn raising(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            convention: Convention::Raising,
        }
    }

    pub(crate) fn result(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            convention: Convention::Result,
        }
    }
}

/// Render `expr` so that it can be used where `to` is expected.
pub(crate) fn adapt(expr: DecoderExpr, to: Convention) -> String {
    match (expr.convention, to) {
        (Convention::Raising, Convention::Raising) | (Convention::Result, Convention::Result) => {
            expr.text
        }
        (Convention::Result, Convention::Raising) => {
            format!("(fun json -> Aeson.Decode.unwrapResult ({} json))", expr.text)
        }
        (Convention::Raising, Convention::Result) => {
            format!("(Aeson.Decode.wrapResult {})", expr.text)
        }
    }
}

/// Match arm converting a raised `DecodeError` into an error result whose
/// message is `prefix` followed by the raised message.
pub(crate) fn caught(prefix: &str) -> String {
    format!(
        "| exception Aeson.Decode.DecodeError message -> {}",
        error_concat(prefix, "message")
    )
}

pub(crate) fn ok(value: &str) -> String {
    format!("Belt.Result.Ok {value}")
}

/// Error result with a fixed message.
pub(crate) fn error_literal(message: &str) -> String {
    format!("Belt.Result.Error {}", string_literal(message))
}

/// Error result `prefix ^ variable`.
pub(crate) fn error_concat(prefix: &str, variable: &str) -> String {
    format!("Belt.Result.Error ({} ^ {variable})", string_literal(prefix))
}

/// Error result quoting an offending value: `prefix'value'suffix`.
pub(crate) fn error_quoting(prefix: &str, variable: &str, suffix: &str) -> String {
    format!(
        "Belt.Result.Error ({} ^ {variable} ^ {})",
        string_literal(&format!("{prefix}'")),
        string_literal(&format!("'{suffix}"))
    )
}
