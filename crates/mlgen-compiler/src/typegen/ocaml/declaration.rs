//! Type declaration renderer.

use mlgen_core::{Primitive, TypeDescriptor, ValueExpr};

use super::naming::{apply_type, constructor_name, declared_type, label, type_name, type_var};
use super::shape::{Branch, Field, RenderContext, Shape, classify};
use super::writer::Writer;
use crate::error::RenderError;
use crate::options::Options;

/// Render the OCaml type declaration(s) for a descriptor.
///
/// Sums of records produce their hoisted record types first, then the sum.
pub fn render_declaration(
    descriptor: &TypeDescriptor,
    options: &Options,
) -> Result<String, RenderError> {
    tracing::debug!(type_name = %descriptor.display_name, "rendering declaration");
    let ctx = RenderContext::new(options, descriptor);
    DeclarationRenderer { ctx: &ctx }.render(descriptor)
}

/// Render the interface text for a descriptor's declaration.
///
/// Generated types are transparent, so the interface repeats the
/// declaration in full.
pub fn render_declaration_signature(
    descriptor: &TypeDescriptor,
    options: &Options,
) -> Result<String, RenderError> {
    render_declaration(descriptor, options)
}

struct DeclarationRenderer<'c, 'a> {
    ctx: &'c RenderContext<'a>,
}

impl DeclarationRenderer<'_, '_> {
    fn render(&self, descriptor: &TypeDescriptor) -> Result<String, RenderError> {
        let shape = classify(descriptor)?;
        let name = type_name(&descriptor.display_name);
        let head = declared_type(&name, &descriptor.type_params());
        let mut w = Writer::new();

        match shape {
            Shape::Alias(p) => {
                w.line(format!("type {head} = {}", self.primitive(p)?));
            }
            Shape::Record(fields) => self.record(&mut w, "type", &head, &fields)?,
            Shape::Single(branch) => self.variant(&mut w, "type", &head, &[branch])?,
            Shape::Sum(branches) => self.variant(&mut w, "type", &head, &branches)?,
            Shape::Enumeration(tags) => {
                w.line(format!("type {head} ="));
                w.indented(|w| {
                    for tag in tags {
                        w.line(format!("| {}", constructor_name(tag)));
                    }
                });
            }
            Shape::SumOfRecords(records) => {
                // Records that mention the sum must share its `type ... and` group.
                let recursive = descriptor.references(&descriptor.identity);
                let mut keyword = "type";
                let mut branches = Vec::with_capacity(records.len());
                for record in &records {
                    let record_name = type_name(&record.display_name);
                    let record_head = declared_type(&record_name, &record.type_params);
                    self.record(&mut w, keyword, &record_head, &record.fields)?;
                    w.line("");
                    if recursive {
                        keyword = "and";
                    }

                    let vars: Vec<String> =
                        record.type_params.iter().map(|p| type_var(p)).collect();
                    branches.push(format!(
                        "| {} of {}",
                        constructor_name(record.branch),
                        apply_type(&record_name, &vars)
                    ));
                }
                w.line(format!("{keyword} {head} ="));
                w.indented(|w| {
                    for branch in &branches {
                        w.line(branch);
                    }
                });
            }
        }

        Ok(w.finish())
    }

    fn record(
        &self,
        w: &mut Writer,
        keyword: &str,
        head: &str,
        fields: &[Field<'_>],
    ) -> Result<(), RenderError> {
        let rendered = fields
            .iter()
            .map(|f| -> Result<String, RenderError> {
                Ok(format!("{} : {}", label(f.name), self.type_expr(f.value)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        w.line(format!("{keyword} {head} ="));
        w.indented(|w| {
            for (i, field) in rendered.iter().enumerate() {
                let sep = if i == 0 { '{' } else { ';' };
                w.line(format!("{sep} {field}"));
            }
            w.line("}");
        });
        Ok(())
    }

    fn variant(
        &self,
        w: &mut Writer,
        keyword: &str,
        head: &str,
        branches: &[Branch<'_>],
    ) -> Result<(), RenderError> {
        let rendered = branches
            .iter()
            .map(|b| self.branch(b))
            .collect::<Result<Vec<_>, _>>()?;

        w.line(format!("{keyword} {head} ="));
        w.indented(|w| {
            for branch in &rendered {
                w.line(branch);
            }
        });
        Ok(())
    }

    fn branch(&self, branch: &Branch<'_>) -> Result<String, RenderError> {
        let name = constructor_name(branch.name);
        if branch.args.is_empty() {
            return Ok(format!("| {name}"));
        }
        let args = branch
            .args
            .iter()
            .map(|a| self.type_expr(a))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("| {name} of {}", args.join(" * ")))
    }

    fn type_expr(&self, value: &ValueExpr) -> Result<String, RenderError> {
        match value {
            ValueExpr::TypeRef { identity, name } => {
                Ok(format!("{}{}", self.ctx.qualifier(identity)?, type_name(name)))
            }
            ValueExpr::RefApplication { identity, args } => {
                let args = args
                    .flatten()
                    .into_iter()
                    .map(|a| self.type_expr(a))
                    .collect::<Result<Vec<_>, _>>()?;
                let qualifier = self.ctx.qualifier(identity)?;
                let name = format!("{qualifier}{}", type_name(&identity.name));
                Ok(apply_type(&name, &args))
            }
            ValueExpr::Primitive(p) => self.primitive(p),
            ValueExpr::TypeParameter(var) => Ok(type_var(var)),
            other => Err(self.ctx.unexpected(other, "type position")),
        }
    }

    fn primitive(&self, primitive: &Primitive) -> Result<String, RenderError> {
        let text = match primitive {
            Primitive::Bool => "bool".to_string(),
            Primitive::Char | Primitive::String => "string".to_string(),
            Primitive::Date => "Js_date.t".to_string(),
            Primitive::Float => "float".to_string(),
            Primitive::Int => "int".to_string(),
            Primitive::Int32 => "int32".to_string(),
            Primitive::Unit => "unit".to_string(),
            p if p.is_char_list() => "string".to_string(),
            Primitive::List(inner) => format!("{} list", self.type_expr(inner)?),
            Primitive::Option(inner) => format!("{} option", self.type_expr(inner)?),
            Primitive::Either(l, r) => apply_type(
                "Aeson.Compatibility.Either.t",
                &[self.type_expr(l)?, self.type_expr(r)?],
            ),
            Primitive::Tuple(items) => {
                if !(2..=6).contains(&items.len()) {
                    return Err(RenderError::TupleArity { arity: items.len() });
                }
                let items = items
                    .iter()
                    .map(|i| self.type_expr(i))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("({})", items.join(" * "))
            }
        };
        Ok(text)
    }
}
