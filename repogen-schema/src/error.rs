use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for repogen-schema operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to fetch schema of table '{table}'")]
    #[diagnostic(
        code(repogen::schema_fetch),
        help("check the database credentials and that the table exists")
    )]
    SchemaFetch {
        table: String,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Failure reported by a [`SchemaSource`](crate::SchemaSource).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("table '{table}' does not exist or has no columns")]
    NotFound { table: String },

    #[error("schema source failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FetchError {
    /// Wrap a collaborator error.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Source(Box::new(err))
    }
}

/// A table that cannot be described in the target language.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolutionError {
    #[error("unsupported type '{raw_type}' for column '{table}.{column}'")]
    #[diagnostic(
        code(repogen::unknown_type),
        help(
            "supported types are integers, strings, floats, dates and decimals; \
             change the column type or leave '{table}' out of the run"
        )
    )]
    UnknownType {
        table: String,
        column: String,
        raw_type: String,
        nullable: bool,
    },

    #[error("table '{table}' has no primary key")]
    #[diagnostic(
        code(repogen::missing_primary_key),
        help("add a primary key or generate with --query-only")
    )]
    MissingPrimaryKey { table: String },

    #[error("table '{table}' has a composite primary key ({})", .columns.join(", "))]
    #[diagnostic(
        code(repogen::composite_primary_key),
        help("only single-column primary keys are supported")
    )]
    CompositePrimaryKey { table: String, columns: Vec<String> },
}

/// Failure loading a static schema file.
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaFileError {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema file")]
    #[diagnostic(code(repogen::schema_file))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl SchemaFileError {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Self {
        let span = source.span().map(SourceSpan::from);
        Self::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        }
    }
}
