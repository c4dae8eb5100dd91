use std::{
    collections::{HashMap, hash_map::Entry},
    path::PathBuf,
};

use repogen_core::{Emitter, GenerateResult, LanguageCodegen, PreviewFile, RenderedUnit};
use repogen_schema::{Introspector, SchemaSource};

use crate::{
    Composer, Error, Formatter, GenerationConfig, GoTypeMapper, GofmtFormatter, LayoutFormatter,
    ModelRef, Result, UnitKind, go_file::package_declarations,
};

/// Go repository generator: introspects every configured table, renders
/// its units and emits them under the destination directory.
///
/// Nothing is written unless every unit of the run renders.
pub struct Generator<'a> {
    config: GenerationConfig,
    source: &'a dyn SchemaSource,
    formatters: Vec<Box<dyn Formatter>>,
    cwd: Option<PathBuf>,
}

impl LanguageCodegen for Generator<'_> {
    type Error = Error;

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        Ok(self
            .render_all()?
            .into_iter()
            .map(|unit| PreviewFile {
                path: unit.relative_path(),
                content: unit.source_text().to_string(),
            })
            .collect())
    }

    fn generate(&self, emitter: &dyn Emitter) -> Result<GenerateResult> {
        let units = self.render_all()?;

        let mut written = Vec::with_capacity(units.len());
        for unit in &units {
            let path = unit.write(&self.config.destination, emitter)?;
            tracing::info!(path = %path.display(), "wrote file");
            written.push(path);
        }

        Ok(GenerateResult {
            tables: self.config.tables.clone(),
            written,
        })
    }
}

impl<'a> Generator<'a> {
    pub fn new(config: GenerationConfig, source: &'a dyn SchemaSource) -> Self {
        Self {
            config,
            source,
            formatters: vec![Box::new(LayoutFormatter)],
            cwd: None,
        }
    }

    /// Run `gofmt` after the built-in layout pass.
    pub fn with_gofmt(self) -> Self {
        self.with_formatter(GofmtFormatter::new())
    }

    /// Append a formatting pass.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatters.push(Box::new(formatter));
        self
    }

    /// Resolve the model import path against `cwd` instead of the process
    /// working directory.
    pub fn with_working_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Render every unit of the run, in emission order: model, read query
    /// and mutation per table, then the shared helpers once.
    pub fn render_all(&self) -> Result<Vec<RenderedUnit>> {
        self.config.validate()?;

        let model_ref = match &self.cwd {
            Some(cwd) => ModelRef::from_config_in(&self.config, cwd),
            None => ModelRef::from_config(&self.config),
        };
        let composer = Composer::new(&self.config, model_ref, &self.formatters);
        let introspector = Introspector::new(self.source, &GoTypeMapper);

        let mut kinds = vec![UnitKind::Model, UnitKind::ReadQuery];
        if !self.config.query_only {
            kinds.push(UnitKind::Mutation);
        }

        let mut units = Vec::new();
        for table in &self.config.tables {
            let entity = introspector.introspect(table)?;
            for kind in &kinds {
                units.push(composer.render(&entity, *kind)?);
            }
            tracing::info!(table = %table, entity = %entity.name, "rendered table");
        }
        units.push(composer.render_shared()?);
        check_declarations(&units)?;

        Ok(units)
    }
}

/// Units sharing a directory form one Go package, so no two of them may
/// declare the same name. A unit rendered twice (a repeated table) is the
/// same file and does not count.
fn check_declarations(units: &[RenderedUnit]) -> Result<()> {
    let mut declared: HashMap<(&str, &str), String> = HashMap::new();
    for unit in units {
        let file = unit.relative_path();
        for name in package_declarations(unit.source_text()) {
            match declared.entry((unit.destination_subpath(), name)) {
                Entry::Vacant(entry) => {
                    entry.insert(file.clone());
                }
                Entry::Occupied(entry) if *entry.get() != file => {
                    return Err(Error::DuplicateDeclaration {
                        name: name.to_string(),
                        unit: file,
                        first: entry.get().clone(),
                    });
                }
                Entry::Occupied(_) => {}
            }
        }
    }
    Ok(())
}
