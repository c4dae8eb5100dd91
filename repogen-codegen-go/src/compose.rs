//! Template composition: from an [`Entity`] to formatted [`RenderedUnit`]s.

use std::{fmt, path::Path};

use repogen_core::RenderedUnit;
use repogen_schema::Entity;

use crate::{
    Error, Formatter, GenerationConfig, Result,
    files::{ModelGo, RepoArgsGo, RepoMutationGo, RepoQueryGo},
    resolve_cross_reference, resolve_cross_reference_from,
};

/// The kinds of unit a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Model,
    ReadQuery,
    Mutation,
    SharedHelpers,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::Model => "model",
            UnitKind::ReadQuery => "read query",
            UnitKind::Mutation => "mutation",
            UnitKind::SharedHelpers => "shared helpers",
        };
        f.write_str(name)
    }
}

/// How repository units refer to model types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelRef {
    /// Models live in the repository package and are referenced unqualified.
    Shared,
    /// Models are imported from `path`.
    Imported { path: String },
}

/// The aliased import a repository unit uses for its model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelImport {
    pub alias: String,
    pub path: String,
}

impl ModelImport {
    /// `alias.Name`
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.alias, name)
    }
}

impl ModelRef {
    /// Decide how models are referenced, resolving the model package path
    /// against the process working directory.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::build(config, |module, destination, model_dir| {
            resolve_cross_reference(module, destination, model_dir)
        })
    }

    /// Like [`ModelRef::from_config`], resolving against `cwd`.
    pub fn from_config_in(config: &GenerationConfig, cwd: &Path) -> Self {
        Self::build(config, |module, destination, model_dir| {
            resolve_cross_reference_from(cwd, module, destination, model_dir)
        })
    }

    fn build(config: &GenerationConfig, resolve: impl FnOnce(&str, &Path, &str) -> String) -> Self {
        if config.shares_namespace() {
            return Self::Shared;
        }
        let relative = resolve(&config.module, &config.destination, &config.model_dir());
        Self::Imported {
            path: format!("{}/{}", config.module.trim_end_matches('/'), relative),
        }
    }

    /// The import a unit rendering `entity` needs, if any.
    pub fn import_for(&self, entity: &Entity) -> Option<ModelImport> {
        match self {
            Self::Shared => None,
            Self::Imported { path } => Some(ModelImport {
                alias: format!("{}model", entity.name.to_lowercase()),
                path: path.clone(),
            }),
        }
    }
}

/// Renders units for one run.
pub struct Composer<'a> {
    config: &'a GenerationConfig,
    model_ref: ModelRef,
    formatters: &'a [Box<dyn Formatter>],
}

impl<'a> Composer<'a> {
    pub fn new(
        config: &'a GenerationConfig,
        model_ref: ModelRef,
        formatters: &'a [Box<dyn Formatter>],
    ) -> Self {
        Self {
            config,
            model_ref,
            formatters,
        }
    }

    /// Render one unit of `entity`.
    pub fn render(&self, entity: &Entity, kind: UnitKind) -> Result<RenderedUnit> {
        let repository = self.config.repository_package.as_str();
        let (source, file_name, subpath) = match kind {
            UnitKind::Model => {
                let unit = ModelGo::new(entity, &self.config.model_package);
                (unit.render(), unit.file_name(), self.config.model_dir())
            }
            UnitKind::ReadQuery => {
                let unit = RepoQueryGo::new(entity, repository, self.model_ref.import_for(entity));
                (unit.render(), unit.file_name(), self.config.repository_dir())
            }
            UnitKind::Mutation => {
                let unit =
                    RepoMutationGo::new(entity, repository, self.model_ref.import_for(entity));
                (unit.render()?, unit.file_name(), self.config.repository_dir())
            }
            UnitKind::SharedHelpers => return self.render_shared(),
        };
        self.finish(kind, source, file_name, subpath)
    }

    /// Render the helper unit shared by every table of the run.
    pub fn render_shared(&self) -> Result<RenderedUnit> {
        let unit = RepoArgsGo::new(&self.config.repository_package);
        self.finish(
            UnitKind::SharedHelpers,
            unit.render(),
            RepoArgsGo::FILE_NAME.to_string(),
            self.config.repository_dir(),
        )
    }

    fn finish(
        &self,
        kind: UnitKind,
        source: String,
        file_name: String,
        subpath: String,
    ) -> Result<RenderedUnit> {
        let mut text = source;
        for formatter in self.formatters {
            text = formatter.format(&text).map_err(|err| Error::Render {
                unit: format!("{kind} unit '{}'", join(&subpath, &file_name)),
                message: format!("{}: {}", formatter.name(), err),
            })?;
        }

        tracing::debug!(unit = %kind, file = %join(&subpath, &file_name), "rendered unit");
        Ok(RenderedUnit::new(text, file_name, subpath))
    }
}

fn join(subpath: &str, file_name: &str) -> String {
    if subpath.is_empty() {
        file_name.to_string()
    } else {
        format!("{subpath}/{file_name}")
    }
}
