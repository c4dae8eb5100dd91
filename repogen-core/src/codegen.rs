//! Language-agnostic code generation traits.

use std::path::PathBuf;

use crate::Emitter;

/// Trait for language-specific repository generators.
///
/// Implement this trait to target another output language.
pub trait LanguageCodegen {
    /// Error returned when rendering or emission fails.
    type Error;

    /// Render every unit without writing anything.
    fn preview(&self) -> Result<Vec<PreviewFile>, Self::Error>;

    /// Render every unit, then emit all of them through `emitter`.
    fn generate(&self, emitter: &dyn Emitter) -> Result<GenerateResult, Self::Error>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Tables that were processed, in run order
    pub tables: Vec<String>,
    /// Files written, in emission order
    pub written: Vec<PathBuf>,
}

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Path relative to the destination root
    pub path: String,
    /// File content
    pub content: String,
}
