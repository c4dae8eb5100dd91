//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Fluent API for building indented code
//! - [`Indent`] - Indentation configuration
//! - [`align_columns`] - Column alignment for declaration lists

mod align;
mod code_builder;
mod indent;

pub use align::align_columns;
pub use code_builder::CodeBuilder;
pub use indent::Indent;
