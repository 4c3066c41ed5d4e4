//! Target-language source generation.

pub mod ocaml;
