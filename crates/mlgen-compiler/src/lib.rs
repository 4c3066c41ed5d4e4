//! mlgen compiler: OCaml type declarations and JSON decoders from descriptors.
//!
//! This crate provides the rendering pipeline for mlgen descriptors:
//! - `options` - naming transforms, dependency map, signature flag
//! - `resolver` - cross-module reference qualification
//! - `typegen` - declaration and decoder renderers for OCaml/BuckleScript

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod error;
pub mod options;
pub mod resolver;
pub mod typegen;

#[cfg(test)]
pub mod test_utils;

pub use error::RenderError;
pub use options::{NameStep, NameTransform, Options};
pub use resolver::{DependencyMap, ModuleLocation, Resolver};
pub use typegen::ocaml::{Rendered, Renderer};

/// Errors that can occur while configuring or running a render.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, Error>;
