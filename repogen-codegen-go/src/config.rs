//! Generation configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, GO_NAMING, Result};

/// Fully resolved input of one generation run.
///
/// Built once by the front end and never mutated by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenerationConfig {
    /// Go module path, e.g. `github.com/acme/billing`
    pub module: String,
    /// Directory the namespaces are created in
    pub destination: PathBuf,
    /// Tables to generate, in order
    pub tables: Vec<String>,
    /// Package name of the model units
    pub model_package: String,
    /// Directory of the model units, relative to `destination`; defaults to `model_package`
    pub model_dir: Option<String>,
    /// Package name, and directory, of the repository units
    pub repository_package: String,
    /// Skip the mutation units
    pub query_only: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            module: String::new(),
            destination: PathBuf::from("."),
            tables: Vec::new(),
            model_package: "model".to_string(),
            model_dir: None,
            repository_package: "repository".to_string(),
            query_only: false,
        }
    }
}

impl GenerationConfig {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    pub fn with_destination(mut self, destination: impl AsRef<Path>) -> Self {
        self.destination = destination.as_ref().to_path_buf();
        self
    }

    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_model_package(mut self, package: impl Into<String>) -> Self {
        self.model_package = package.into();
        self
    }

    pub fn with_model_dir(mut self, dir: impl Into<String>) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    pub fn with_repository_package(mut self, package: impl Into<String>) -> Self {
        self.repository_package = package.into();
        self
    }

    pub fn with_query_only(mut self, query_only: bool) -> Self {
        self.query_only = query_only;
        self
    }

    /// Model directory relative to the destination, without `./` or trailing `/`.
    pub fn model_dir(&self) -> String {
        normalize_dir(self.model_dir.as_deref().unwrap_or(&self.model_package))
    }

    /// Repository directory relative to the destination.
    pub fn repository_dir(&self) -> String {
        normalize_dir(&self.repository_package)
    }

    /// Whether model and repository units land in the same Go package.
    pub fn shares_namespace(&self) -> bool {
        self.model_dir() == self.repository_dir()
    }

    /// Check that the configuration can produce compilable code.
    pub fn validate(&self) -> Result<()> {
        if self.module.trim().is_empty() {
            return Err(Error::config("module must not be empty"));
        }
        if self.tables.is_empty() {
            return Err(Error::config("at least one table is required"));
        }
        if let Some(pos) = self.tables.iter().position(|t| t.trim().is_empty()) {
            return Err(Error::config(format!("table #{} has an empty name", pos + 1)));
        }

        validate_package("model package", &self.model_package)?;
        validate_package("repository package", &self.repository_package)?;

        if self.model_dir().is_empty() {
            return Err(Error::config("model directory must not be empty"));
        }
        if self.shares_namespace() && self.model_package != self.repository_package {
            return Err(Error::config(format!(
                "model directory '{}' is the repository directory, so the model package must be '{}' (got '{}')",
                self.model_dir(),
                self.repository_package,
                self.model_package
            )));
        }
        Ok(())
    }
}

fn normalize_dir(dir: &str) -> String {
    let mut dir = dir.trim();
    while let Some(rest) = dir.strip_prefix("./") {
        dir = rest;
    }
    dir.trim_end_matches('/').to_string()
}

fn validate_package(context: &str, name: &str) -> Result<()> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !valid {
        return Err(Error::config(format!(
            "{context} '{name}' must be a lowercase Go identifier"
        )));
    }
    if GO_NAMING.is_reserved(name) {
        return Err(Error::config(format!(
            "{context} '{name}' collides with a Go keyword or an imported package"
        )));
    }
    Ok(())
}
