use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use repogen_codegen_go::{Generator, LanguageCodegen};
use repogen_core::FsEmitter;

use super::{IntoReport, SourceArgs, default_tables};
use crate::{
    config::GenerateOverrides,
    reports::{GenerateReport, GenerationResult, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory the model and repository directories are created in
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Package name of the models (defaults to "model")
    #[arg(long)]
    pub model_package: Option<String>,

    /// Directory of the models, relative to the destination (defaults to the model package)
    #[arg(long)]
    pub model_dir: Option<String>,

    /// Package name, and directory, of the repositories (defaults to "repository")
    #[arg(long)]
    pub repository_package: Option<String>,

    /// Generate read queries only
    #[arg(long)]
    pub query_only: bool,

    /// Run gofmt after the built-in layout pass
    #[arg(long)]
    pub gofmt: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Report a failure but exit successfully, for pipelines without a database
    #[arg(long)]
    pub ignore_error: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        match self.execute() {
            Err(err) if self.ignore_error => {
                eprintln!("{err:?}");
                tracing::warn!("generation failed; ignoring the error as requested");
                Ok(())
            }
            result => result,
        }
    }

    fn execute(&self) -> Result<()> {
        let project = self.source.project()?;
        let mut config = self.overrides().apply(project.generate);
        let schema = self.source.schema_file()?;
        default_tables(&mut config, schema.as_ref());
        // Fail on bad input before opening a connection.
        config.validate().into_report()?;

        let database = self.source.database(project.database);
        let source = self.source.open(schema, &database, &config.module)?;

        let mut generator = Generator::new(config.clone(), source.as_ref());
        if self.gofmt {
            generator = generator.with_gofmt();
        }

        let result = if self.dry_run {
            GenerationResult::Preview(generator.preview().into_report()?)
        } else {
            let result = generator.generate(&FsEmitter).into_report()?;
            GenerationResult::Written(result.written)
        };

        GenerateReport {
            module: config.module,
            destination: config.destination,
            tables: config.tables,
            result,
        }
        .render(&mut TerminalOutput::new());

        Ok(())
    }

    fn overrides(&self) -> GenerateOverrides {
        GenerateOverrides {
            module: self.source.module.clone(),
            destination: self.destination.clone(),
            tables: self.source.tables.clone(),
            model_package: self.model_package.clone(),
            model_dir: self.model_dir.clone(),
            repository_package: self.repository_package.clone(),
            query_only: self.query_only,
        }
    }
}
