//! JSON decoder renderer.
//!
//! Produces `decodeX` functions that invert the aeson-style encoding:
//! records as objects keyed by the transformed field label, sums as objects
//! with a `"tag"` discriminator and a `"contents"` payload, multi-tag
//! enumerations as strings, and singleton enumerations as an empty array.
//!
//! Generic types take one result-returning decoder per free type variable,
//! in sorted order, ahead of the JSON value.

use mlgen_core::{Primitive, TypeDescriptor, ValueExpr};

use super::adapt::{
    Convention, DecoderExpr, adapt, caught, error_concat, error_literal, error_quoting, ok,
};
use super::naming::{
    constructor_name, decoder_name, decoder_param, declared_type, label, string_literal,
    type_name, type_var,
};
use super::shape::{Branch, Field, RenderContext, Shape, classify};
use super::writer::{INDENT, Writer};
use crate::error::RenderError;
use crate::options::Options;

const TAG_FIELD: &str = "tag";
const CONTENTS_FIELD: &str = "contents";
/// Raising decoder for a JSON array of undecoded elements.
const JSON_ARRAY: &str = "(Aeson.Decode.array (fun item -> item))";

/// Render the decoder function(s) for a descriptor.
///
/// Sums of records produce one decoder per hoisted record, then the sum's
/// own decoder.
pub fn render_decoder(
    descriptor: &TypeDescriptor,
    options: &Options,
) -> Result<String, RenderError> {
    tracing::debug!(type_name = %descriptor.display_name, "rendering decoder");
    let ctx = RenderContext::new(options, descriptor);
    DecoderRenderer { ctx: &ctx }.render(descriptor)
}

/// Render `val` declarations matching [`render_decoder`].
pub fn render_decoder_signature(
    descriptor: &TypeDescriptor,
    _options: &Options,
) -> Result<String, RenderError> {
    tracing::debug!(type_name = %descriptor.display_name, "rendering decoder signature");
    let shape = classify(descriptor)?;
    let mut w = Writer::new();

    if let Shape::SumOfRecords(records) = &shape {
        for record in records {
            w.line(decoder_val(
                &record.display_name,
                &type_name(&record.display_name),
                &record.type_params,
            ));
        }
    }
    w.line(decoder_val(
        &descriptor.display_name,
        &type_name(&descriptor.display_name),
        &descriptor.type_params(),
    ));
    Ok(w.finish())
}

fn decoder_val(display_name: &str, type_name: &str, params: &[String]) -> String {
    let mut parts: Vec<String> = params
        .iter()
        .map(|p| format!("(Js.Json.t -> ({}, string) Belt.Result.t)", type_var(p)))
        .collect();
    parts.push("Js.Json.t".to_string());
    parts.push(format!("({}, string) Belt.Result.t", declared_type(type_name, params)));
    format!("val {} : {}", decoder_name(display_name), parts.join(" -> "))
}

/// Function header `let decodeX decode_a decode_b json =`.
fn header(keyword: &str, display_name: &str, params: &[String]) -> String {
    let mut parts = vec![keyword.to_string(), decoder_name(display_name)];
    parts.extend(params.iter().map(|p| decoder_param(p)));
    parts.push("json".to_string());
    format!("{} =", parts.join(" "))
}

/// Lines of a `match expr with | exception ... | binding ->` step.
///
/// The continuation is written after the returned lines at the same depth.
fn attempt(lines: &mut Vec<String>, expr: &str, prefix: &str, binding: &str) {
    lines.push(format!("match {expr} with"));
    lines.push(caught(prefix));
    lines.push(format!("| {binding} ->"));
}

/// Wrap lines in parentheses, keeping them one expression.
fn parenthesize(mut lines: Vec<String>) -> Vec<String> {
    if let Some(first) = lines.first_mut() {
        first.insert(0, '(');
    }
    if let Some(last) = lines.last_mut() {
        last.push(')');
    }
    lines
}

/// Constructor application over positional bindings `v0 .. vn`.
fn construct(name: &str, arity: usize) -> String {
    let name = constructor_name(name);
    match arity {
        0 => name,
        1 => format!("({name} v0)"),
        n => {
            let vars: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
            format!("({name} ({}))", vars.join(", "))
        }
    }
}

struct DecoderRenderer<'c, 'a> {
    ctx: &'c RenderContext<'a>,
}

impl DecoderRenderer<'_, '_> {
    fn render(&self, descriptor: &TypeDescriptor) -> Result<String, RenderError> {
        let shape = classify(descriptor)?;
        let display = descriptor.display_name.as_str();
        let fn_name = decoder_name(display);
        let params = descriptor.type_params();
        let recursive = descriptor.references(&descriptor.identity);
        let keyword = if recursive { "let rec" } else { "let" };
        let mut w = Writer::new();

        let body = match &shape {
            Shape::Alias(p) => self.alias(&fn_name, p)?,
            Shape::Record(fields) => {
                let head = declared_type(&type_name(display), &params);
                self.record(&fn_name, &head, fields)?
            }
            Shape::Single(branch) => self.single(&fn_name, branch)?,
            Shape::Sum(branches) => self.sum(&fn_name, branches)?,
            Shape::Enumeration(tags) => self.enumeration(&fn_name, tags),
            Shape::SumOfRecords(records) => {
                let mut keyword = keyword;
                let mut arms = Vec::with_capacity(records.len());
                for record in records {
                    let record_fn = decoder_name(&record.display_name);
                    let params = &record.type_params;
                    let head = declared_type(&type_name(&record.display_name), params);
                    let body = self.record(&record_fn, &head, &record.fields)?;
                    let record_header = header(keyword, &record.display_name, params);
                    write_function(&mut w, &record_header, &body);
                    w.line("");
                    if recursive {
                        keyword = "and";
                    }

                    let mut call = vec![record_fn];
                    call.extend(params.iter().map(|p| decoder_param(p)));
                    call.push("json".to_string());
                    arms.push((record.branch, call.join(" ")));
                }
                let body = self.sum_of_records(&fn_name, &arms);
                write_function(&mut w, &header(keyword, display, &params), &body);
                return Ok(w.finish());
            }
        };

        write_function(&mut w, &header(keyword, display, &params), &body);
        Ok(w.finish())
    }

    fn alias(&self, fn_name: &str, primitive: &Primitive) -> Result<Vec<String>, RenderError> {
        let decoder = adapt(self.primitive(primitive)?, Convention::Raising);
        let mut lines = Vec::new();
        attempt(&mut lines, &format!("{decoder} json"), &format!("{fn_name}: "), "v");
        lines.push(ok("v"));
        Ok(lines)
    }

    /// Fields are read in declared order; the first failure names its key.
    fn record(
        &self,
        fn_name: &str,
        head: &str,
        fields: &[Field<'_>],
    ) -> Result<Vec<String>, RenderError> {
        let mut lines = Vec::new();
        let mut labels = Vec::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            let key = self.ctx.options.json_key(field.name);
            let read = match field.value {
                ValueExpr::Primitive(Primitive::Option(inner)) => format!(
                    "Aeson.Decode.optional (Aeson.Decode.field {} {}) json",
                    string_literal(&key),
                    self.raising(inner)?
                ),
                value => format!(
                    "Aeson.Decode.field {} {} json",
                    string_literal(&key),
                    self.raising(value)?
                ),
            };
            attempt(
                &mut lines,
                &read,
                &format!("{fn_name}: field '{key}': "),
                &format!("v{i}"),
            );
            labels.push(format!("{} = v{i}", label(field.name)));
        }
        lines.push(ok(&format!("({{ {} }} : {head})", labels.join("; "))));
        Ok(lines)
    }

    /// Untagged single constructor.
    fn single(&self, fn_name: &str, branch: &Branch<'_>) -> Result<Vec<String>, RenderError> {
        match branch.args.as_slice() {
            [] => Ok(self.empty_array(fn_name, &constructor_name(branch.name))),
            [arg] => {
                let mut lines = Vec::new();
                attempt(
                    &mut lines,
                    &format!("{} json", self.raising(arg)?),
                    &format!("{fn_name}: "),
                    "v0",
                );
                lines.push(ok(&construct(branch.name, 1)));
                Ok(lines)
            }
            args => self.positional(
                &format!("{JSON_ARRAY} json"),
                &format!("{fn_name}: "),
                branch.name,
                args,
            ),
        }
    }

    fn sum(&self, fn_name: &str, branches: &[Branch<'_>]) -> Result<Vec<String>, RenderError> {
        let mut arms = Vec::with_capacity(branches.len());
        for branch in branches {
            let tag = string_literal(&self.ctx.options.json_tag(branch.name));
            let prefix = format!("{fn_name}: {}: ", constructor_name(branch.name));
            let contents = |decoder: &str| {
                format!(
                    "Aeson.Decode.field {} {decoder} json",
                    string_literal(CONTENTS_FIELD)
                )
            };

            let arm = match branch.args.as_slice() {
                [] => vec![format!("| {tag} -> {}", ok(&construct(branch.name, 0)))],
                [arg] => {
                    let mut lines = Vec::new();
                    attempt(&mut lines, &contents(&self.raising(arg)?), &prefix, "v0");
                    lines.push(ok(&construct(branch.name, 1)));
                    tag_arm(&tag, lines)
                }
                args => {
                    let lines = self.positional(
                        &contents(JSON_ARRAY),
                        &prefix,
                        branch.name,
                        args,
                    )?;
                    tag_arm(&tag, lines)
                }
            };
            arms.push(arm);
        }
        Ok(self.dispatch(fn_name, arms))
    }

    fn sum_of_records(&self, fn_name: &str, records: &[(&str, String)]) -> Vec<String> {
        let arms = records
            .iter()
            .map(|(branch, call)| {
                let tag = string_literal(&self.ctx.options.json_tag(branch));
                let wrapped = format!("({} v)", constructor_name(branch));
                let failed = error_concat(&format!("{fn_name}: "), "message");
                let lines = vec![
                    format!("match {call} with"),
                    format!("| Belt.Result.Ok v -> {}", ok(&wrapped)),
                    format!("| Belt.Result.Error message -> {failed}"),
                ];
                tag_arm(&tag, lines)
            })
            .collect();
        self.dispatch(fn_name, arms)
    }

    /// Read the `"tag"` discriminator and select an arm.
    fn dispatch(&self, fn_name: &str, arms: Vec<Vec<String>>) -> Vec<String> {
        let mut lines = vec![
            format!(
                "match Aeson.Decode.field {} Aeson.Decode.string json with",
                string_literal(TAG_FIELD)
            ),
            caught(&format!("{fn_name}: ")),
        ];
        lines.extend(arms.into_iter().flatten());
        lines.push(format!(
            "| tag -> {}",
            error_quoting(&format!("{fn_name}: unknown tag value found "), "tag", ".")
        ));
        lines
    }

    /// Positional arguments from a JSON array, one step per position.
    ///
    /// `source` yields the elements as `Js.Json.t array`. A short array fails
    /// at its first missing position; a long one fails at position `args.len()`.
    fn positional(
        &self,
        source: &str,
        prefix: &str,
        name: &str,
        args: &[&ValueExpr],
    ) -> Result<Vec<String>, RenderError> {
        let n = args.len();
        let arity = format!(
            "Belt.Result.Error ({} ^ string_of_int (min (Array.length items) {n}) ^ {})",
            string_literal(&format!("{prefix}position ")),
            string_literal(&format!(": expected {n} elements."))
        );
        let mut lines = vec![
            format!("match {source} with"),
            caught(prefix),
            format!("| items when Array.length items <> {n} -> {arity}"),
            "| items ->".to_string(),
        ];
        for (i, arg) in args.iter().enumerate() {
            attempt(
                &mut lines,
                &format!("{} items.({i})", self.raising(arg)?),
                &format!("{prefix}position {i}: "),
                &format!("v{i}"),
            );
        }
        lines.push(ok(&construct(name, n)));
        Ok(lines)
    }

    fn enumeration(&self, fn_name: &str, tags: &[String]) -> Vec<String> {
        if let [only] = tags {
            return self.empty_array(fn_name, &constructor_name(only));
        }

        let mut lines = vec!["match Js.Json.decodeString json with".to_string()];
        for tag in tags {
            lines.push(format!(
                "| Some {} -> {}",
                string_literal(&self.ctx.options.json_tag(tag)),
                ok(&constructor_name(tag))
            ));
        }
        lines.push(format!(
            "| Some value -> {}",
            error_quoting(&format!("{fn_name}: unknown enumeration "), "value", ".")
        ));
        lines.push(format!(
            "| None -> {}",
            error_literal(&format!("{fn_name}: expected a top-level JSON string."))
        ));
        lines
    }

    /// Sole nullary constructor, encoded as `[]`.
    fn empty_array(&self, fn_name: &str, constructor: &str) -> Vec<String> {
        vec![
            "match Js.Json.decodeArray json with".to_string(),
            format!("| Some [||] -> {}", ok(constructor)),
            format!(
                "| Some _ | None -> {}",
                error_literal(&format!("{fn_name}: expected an empty JSON array."))
            ),
        ]
    }

    fn raising(&self, value: &ValueExpr) -> Result<String, RenderError> {
        Ok(adapt(self.decoder_expr(value)?, Convention::Raising))
    }

    fn decoder_expr(&self, value: &ValueExpr) -> Result<DecoderExpr, RenderError> {
        match value {
            ValueExpr::TypeRef { identity, name } => Ok(DecoderExpr::result(format!(
                "{}{}",
                self.ctx.qualifier(identity)?,
                decoder_name(name)
            ))),
            ValueExpr::RefApplication { identity, args } => {
                let mut parts = vec![format!(
                    "{}{}",
                    self.ctx.qualifier(identity)?,
                    decoder_name(&identity.name)
                )];
                for arg in args.flatten() {
                    parts.push(adapt(self.decoder_expr(arg)?, Convention::Result));
                }
                Ok(DecoderExpr::result(format!("({})", parts.join(" "))))
            }
            ValueExpr::Primitive(p) => self.primitive(p),
            ValueExpr::TypeParameter(var) => Ok(DecoderExpr::result(decoder_param(var))),
            other => Err(self.ctx.unexpected(other, "decoder position")),
        }
    }

    fn primitive(&self, primitive: &Primitive) -> Result<DecoderExpr, RenderError> {
        let text = match primitive {
            Primitive::Bool => "Aeson.Decode.bool".to_string(),
            Primitive::Char | Primitive::String => "Aeson.Decode.string".to_string(),
            Primitive::Date => "Aeson.Decode.date".to_string(),
            Primitive::Float => "Aeson.Decode.float".to_string(),
            Primitive::Int => "Aeson.Decode.int".to_string(),
            Primitive::Int32 => "Aeson.Decode.int32".to_string(),
            Primitive::Unit => "Aeson.Decode.unit".to_string(),
            p if p.is_char_list() => "Aeson.Decode.string".to_string(),
            Primitive::List(inner) => format!("(Aeson.Decode.list {})", self.raising(inner)?),
            Primitive::Option(inner) => {
                format!("(Aeson.Decode.optional {})", self.raising(inner)?)
            }
            Primitive::Either(l, r) => format!(
                "(Aeson.Decode.either {} {})",
                self.raising(l)?,
                self.raising(r)?
            ),
            Primitive::Tuple(items) => {
                if !(2..=6).contains(&items.len()) {
                    return Err(RenderError::TupleArity { arity: items.len() });
                }
                let items = items
                    .iter()
                    .map(|i| self.raising(i))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("(Aeson.Decode.tuple{} {})", items.len(), items.join(" "))
            }
        };
        Ok(DecoderExpr::raising(text))
    }
}

/// `| "Tag" ->` followed by the parenthesized arm body.
fn tag_arm(tag: &str, body: Vec<String>) -> Vec<String> {
    let mut lines = vec![format!("| {tag} ->")];
    lines.extend(parenthesize(body).into_iter().map(|l| format!("{INDENT}{l}")));
    lines
}

fn write_function(w: &mut Writer, header: &str, body: &[String]) {
    w.line(header);
    w.indented(|w| {
        for line in body {
            w.line(line);
        }
    });
}
