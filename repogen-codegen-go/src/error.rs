use std::path::PathBuf;

use miette::Diagnostic;
use repogen_core::EmitError;
use repogen_schema::ResolutionError;
use thiserror::Error;

/// Result type for Go generation
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid configuration: {message}")]
    #[diagnostic(code(repogen::config))]
    Config { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] repogen_schema::Error),

    #[error("entity '{entity}' has no field '{field}'")]
    #[diagnostic(code(repogen::unknown_field))]
    UnknownField { entity: String, field: String },

    #[error("failed to render {unit}: {message}")]
    #[diagnostic(
        code(repogen::render),
        help("the template produced invalid Go source; please report this")
    )]
    Render { unit: String, message: String },

    #[error("{unit} declares `{name}`, which {first} already declares in the same package")]
    #[diagnostic(
        code(repogen::duplicate_declaration),
        help("rename the table, or generate models into their own package with --model-dir")
    )]
    DuplicateDeclaration {
        name: String,
        unit: String,
        first: String,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(repogen::emission))]
    Emission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<ResolutionError> for Error {
    fn from(err: ResolutionError) -> Self {
        Self::Schema(err.into())
    }
}

impl From<EmitError> for Error {
    fn from(err: EmitError) -> Self {
        Self::Emission {
            path: err.path,
            source: err.source,
        }
    }
}
