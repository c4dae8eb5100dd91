use clap::Args;
use eyre::{Result, bail};
use repogen_codegen_go::GoTypeMapper;
use repogen_schema::Introspector;

use super::{IntoReport, SourceArgs, default_tables};
use crate::{
    config::GenerateOverrides,
    reports::{DescribeReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct DescribeCommand {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl DescribeCommand {
    /// Run the describe command
    pub fn run(&self) -> Result<()> {
        let project = self.source.project()?;
        let mut config = GenerateOverrides {
            module: self.source.module.clone(),
            tables: self.source.tables.clone(),
            ..Default::default()
        }
        .apply(project.generate);
        let schema = self.source.schema_file()?;
        default_tables(&mut config, schema.as_ref());
        if config.tables.is_empty() {
            bail!("no tables given; pass --tables or list them in the project file");
        }

        let database = self.source.database(project.database);
        let source = self.source.open(schema, &database, &config.module)?;
        let introspector = Introspector::new(source.as_ref(), &GoTypeMapper);

        let entities = config
            .tables
            .iter()
            .map(|table| introspector.introspect(table))
            .collect::<Result<Vec<_>, _>>()
            .into_report()?;

        DescribeReport { entities }.render(&mut TerminalOutput::new());
        Ok(())
    }
}
