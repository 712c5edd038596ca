//! Diagram model and code generation plugins
//!
//! `class` holds the diagram model and everything derived from it;
//! `codegen` turns the model into source text.

pub mod class;
pub mod codegen;

pub use class::*;
pub use codegen::*;
