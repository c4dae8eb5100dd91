//! Core utilities and types for the repogen repository generator.
//!
//! This crate provides the fundamental types shared across the repogen
//! crates: rendered units and their emission, naming utilities, and the
//! column type vocabulary.

mod codegen;
mod file;
mod inflect;
mod type_mapper;
mod utils;

pub use codegen::{GenerateResult, LanguageCodegen, PreviewFile};
// File emission
pub use file::{EmitError, Emitter, FsEmitter, MemoryEmitter, RenderedUnit};
// Naming
pub use inflect::singularize;
// Column types
pub use type_mapper::{MappedType, NullableType, SqlType, TypeMapper, base_type};
pub use utils::{to_pascal_case, to_private_name};

/// Header placed at the top of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by repogen. DO NOT EDIT.";
