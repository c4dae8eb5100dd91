//! Shared code generation building blocks for repogen.
//!
//! This crate provides language-agnostic abstractions used by the
//! language-specific generators (e.g., `repogen-codegen-go`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indent)
//! - [`generation`] - Output management (ImportCollector)
//! - [`language`] - Language-specific abstractions (NamingConvention)

pub mod builder;
pub mod generation;
pub mod language;

pub use builder::{CodeBuilder, Indent, align_columns};
pub use generation::{Import, ImportCollector};
pub use language::NamingConvention;
