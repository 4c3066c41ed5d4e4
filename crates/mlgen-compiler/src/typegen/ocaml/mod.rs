//! OCaml/BuckleScript code generation.
//!
//! Two renderers share one [`Options`] value:
//! - declarations: `type person = { ... }`
//! - decoders: `let decodePerson json = ...`, returning `Belt.Result.t`
//!
//! Rendering is pure; one `Options` can back any number of concurrent
//! renders.

mod adapt;
mod declaration;
mod decoder;
mod naming;
mod shape;
mod writer;

#[cfg(test)]
mod declaration_tests;

use mlgen_core::TypeDescriptor;

pub use declaration::{render_declaration, render_declaration_signature};
pub use decoder::{render_decoder, render_decoder_signature};

use crate::options::Options;
use writer::Writer;

/// Output of a full render: implementation text plus optional interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    /// Declarations followed by decoders, for the `.ml` file.
    pub implementation: String,
    /// Matching `.mli` text, when signatures are enabled.
    pub signature: Option<String>,
}

/// Renders descriptors against a fixed set of options.
#[derive(Clone, Copy, Debug)]
pub struct Renderer<'a> {
    options: &'a Options,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    pub fn declaration(&self, descriptor: &TypeDescriptor) -> crate::Result<String> {
        Ok(render_declaration(descriptor, self.options)?)
    }

    pub fn declaration_signature(&self, descriptor: &TypeDescriptor) -> crate::Result<String> {
        Ok(render_declaration_signature(descriptor, self.options)?)
    }

    pub fn decoder(&self, descriptor: &TypeDescriptor) -> crate::Result<String> {
        Ok(render_decoder(descriptor, self.options)?)
    }

    pub fn decoder_signature(&self, descriptor: &TypeDescriptor) -> crate::Result<String> {
        Ok(render_decoder_signature(descriptor, self.options)?)
    }

    /// Declaration and decoder for one descriptor, separated by a blank line.
    pub fn render(&self, descriptor: &TypeDescriptor) -> crate::Result<Rendered> {
        let mut implementation = Writer::new();
        implementation.block(&self.declaration(descriptor)?);
        implementation.block(&self.decoder(descriptor)?);

        let signature = if self.options.emits_signatures() {
            let mut w = Writer::new();
            w.block(&self.declaration_signature(descriptor)?);
            w.block(&self.decoder_signature(descriptor)?);
            Some(w.finish())
        } else {
            None
        };

        Ok(Rendered {
            implementation: implementation.finish(),
            signature,
        })
    }

    /// Render several descriptors into one module, in the given order.
    pub fn render_all<'d>(
        &self,
        descriptors: impl IntoIterator<Item = &'d TypeDescriptor>,
    ) -> crate::Result<Rendered> {
        let mut implementation = Writer::new();
        let mut signature = self.options.emits_signatures().then(Writer::new);
        for descriptor in descriptors {
            let rendered = self.render(descriptor)?;
            implementation.block(&rendered.implementation);
            if let (Some(w), Some(text)) = (signature.as_mut(), rendered.signature) {
                w.block(&text);
            }
        }
        Ok(Rendered {
            implementation: implementation.finish(),
            signature: signature.map(Writer::finish),
        })
    }
}
