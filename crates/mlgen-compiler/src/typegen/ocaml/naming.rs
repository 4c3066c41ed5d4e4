//! OCaml identifier generation.

use mlgen_core::utils::{lower_first, upper_first};

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "begin", "class", "constraint", "do", "done", "downto", "else", "end",
    "exception", "external", "false", "for", "fun", "function", "functor", "if", "in", "include",
    "inherit", "initializer", "lazy", "let", "match", "method", "module", "mutable", "new",
    "nonrec", "object", "of", "open", "or", "private", "rec", "sig", "struct", "then", "to",
    "true", "try", "type", "val", "virtual", "when", "while", "with",
];

fn escape_keyword(name: String) -> String {
    if KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Type constructor name, e.g. `Person` → `person`.
pub(crate) fn type_name(display_name: &str) -> String {
    escape_keyword(lower_first(display_name))
}

/// Variant constructor name.
pub(crate) fn constructor_name(name: &str) -> String {
    upper_first(name)
}

/// Record label for a field.
pub(crate) fn label(field: &str) -> String {
    escape_keyword(lower_first(field))
}

pub(crate) fn type_var(name: &str) -> String {
    format!("'{}", lower_first(name))
}

/// Decoder function name, e.g. `Person` → `decodePerson`.
pub(crate) fn decoder_name(display_name: &str) -> String {
    format!("decode{}", upper_first(display_name))
}

/// Decoder parameter threaded for a type variable, e.g. `a` → `decode_a`.
///
/// The variable is kept verbatim after an underscore, so distinct variables
/// never share a parameter and no parameter shadows a [`decoder_name`].
pub(crate) fn decoder_param(var: &str) -> String {
    format!("decode_{var}")
}

/// Display name of a record hoisted out of a sum branch.
pub(crate) fn hoisted_display_name(type_name: &str, branch: &str) -> String {
    format!("{type_name}{}", upper_first(branch))
}

/// Postfix type application: `t`, `a t`, `(a, b) t`.
pub(crate) fn apply_type(name: &str, args: &[String]) -> String {
    match args {
        [] => name.to_string(),
        [single] => format!("{single} {name}"),
        many => format!("({}) {name}", many.join(", ")),
    }
}

/// Parameter list preceding a declared type name.
pub(crate) fn declared_type(name: &str, params: &[String]) -> String {
    let vars: Vec<String> = params.iter().map(|p| type_var(p)).collect();
    apply_type(name, &vars)
}

/// OCaml string literal with escapes.
pub(crate) fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
