mod describe;
mod generate;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use describe::DescribeCommand;
use eyre::Result;
use generate::GenerateCommand;
use repogen_codegen_go::GenerationConfig;
use repogen_schema::{SchemaSource, StaticSchema};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::{DatabaseConfig, PROJECT_FILE, ProjectFile},
    database::{MySqlSchema, connect_options},
};

/// Extension trait rendering library diagnostics with miette before they
/// become eyre reports
pub(crate) trait IntoReport<T> {
    fn into_report(self) -> Result<T>;
}

impl<T, E> IntoReport<T> for std::result::Result<T, E>
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    fn into_report(self) -> Result<T> {
        self.map_err(|e| eyre::eyre!("{:?}", miette::Report::new(e)))
    }
}

/// Where tables are read from, shared by every command.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to the project file (defaults to ./repogen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Go module path, e.g. github.com/acme/billing
    #[arg(short, long)]
    pub module: Option<String>,

    /// Comma-separated list of tables (defaults to every table of --schema-file)
    #[arg(short, long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Read table definitions from a TOML file instead of a database
    #[arg(long, conflicts_with_all = ["creds", "env_file"])]
    pub schema_file: Option<PathBuf>,

    /// Connection string, as a mysql:// URL or a Go driver DSN
    #[arg(long)]
    pub creds: Option<String>,

    /// Env file holding REPOGEN_DB_* variables, searched in the module root
    /// when not found in the working directory
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Prefix of the REPOGEN_DB_* variables
    #[arg(long)]
    pub env_prefix: Option<String>,
}

impl SourceArgs {
    pub fn project(&self) -> Result<ProjectFile> {
        match &self.config {
            Some(path) => ProjectFile::load(path, true),
            None => ProjectFile::load(Path::new(PROJECT_FILE), false),
        }
    }

    pub fn database(&self, file: DatabaseConfig) -> DatabaseConfig {
        file.merge(DatabaseConfig {
            creds: self.creds.clone(),
            env_file: self.env_file.clone(),
            env_prefix: self.env_prefix.clone(),
        })
    }

    /// Load the schema file, when one was given.
    pub fn schema_file(&self) -> Result<Option<StaticSchema>> {
        let Some(path) = &self.schema_file else {
            return Ok(None);
        };
        tracing::info!(path = %path.display(), "reading schema file");
        StaticSchema::from_file(path).into_report().map(Some)
    }

    /// Use the loaded schema file, otherwise connect to MySQL.
    pub fn open(
        &self,
        schema: Option<StaticSchema>,
        database: &DatabaseConfig,
        module: &str,
    ) -> Result<Box<dyn SchemaSource>> {
        match schema {
            Some(schema) => Ok(Box::new(schema)),
            None => {
                let options = connect_options(database, module)?;
                Ok(Box::new(MySqlSchema::connect(options)?))
            }
        }
    }
}

/// With no tables configured, a schema file contributes all of its tables,
/// in file order.
pub(crate) fn default_tables(config: &mut GenerationConfig, schema: Option<&StaticSchema>) {
    if !config.tables.is_empty() {
        return;
    }
    if let Some(schema) = schema {
        config.tables = schema.tables().map(str::to_string).collect();
    }
}

#[derive(Parser)]
#[command(name = "repogen")]
#[command(version)]
#[command(about = "Generate Go sqlx repositories from MySQL tables")]
pub(crate) struct Cli {
    /// Log more (-v for info, -vv for debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        init_tracing(self.verbose);

        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Describe(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model and repository code for the given tables
    Generate(GenerateCommand),

    /// Show how tables resolve without generating anything
    Describe(DescribeCommand),
}

/// Logs go to stderr so previews on stdout stay clean.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> StaticSchema {
        "[[tables.invoices]]\nname = \"id\"\ntype = \"bigint\"\n\n\
         [[tables.customers]]\nname = \"id\"\ntype = \"int\"\n"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_schema_file_supplies_tables_in_file_order() {
        let mut config = GenerationConfig::new("github.com/acme/billing");
        default_tables(&mut config, Some(&schema()));
        assert_eq!(config.tables, vec!["invoices", "customers"]);
    }

    #[test]
    fn test_configured_tables_are_kept() {
        let mut config = GenerationConfig::new("github.com/acme/billing").with_tables(["customers"]);
        default_tables(&mut config, Some(&schema()));
        assert_eq!(config.tables, vec!["customers"]);

        let mut config = GenerationConfig::new("github.com/acme/billing");
        default_tables(&mut config, None);
        assert!(config.tables.is_empty());
    }
}
