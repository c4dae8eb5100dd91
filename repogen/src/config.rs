//! `repogen.toml` and its merge with command-line flags.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use repogen_codegen_go::GenerationConfig;
use serde::Deserialize;

/// Default project file, looked up in the working directory.
pub const PROJECT_FILE: &str = "repogen.toml";

/// Contents of a project file.
///
/// ```toml
/// [generate]
/// module = "github.com/acme/billing"
/// destination = "./internal"
/// tables = ["invoices", "customers"]
///
/// [database]
/// env-file = ".env"
/// env-prefix = "BILLING"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectFile {
    pub generate: GenerationConfig,
    pub database: DatabaseConfig,
}

/// Where database credentials come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection string, as a `mysql://` URL or a Go driver DSN
    pub creds: Option<String>,
    /// Env file holding `REPOGEN_DB_*` variables
    pub env_file: Option<PathBuf>,
    /// Prefix of the `REPOGEN_DB_*` variables
    pub env_prefix: Option<String>,
}

impl ProjectFile {
    /// Read `path`. A missing default project file is an empty project; a
    /// missing file that was asked for explicitly is an error.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "no project file");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).wrap_err_with(|| format!("Failed to parse {}", path.display()))
    }
}

/// Generation settings given on the command line. Each one set here wins
/// over the project file.
#[derive(Debug, Default)]
pub struct GenerateOverrides {
    pub module: Option<String>,
    pub destination: Option<PathBuf>,
    pub tables: Vec<String>,
    pub model_package: Option<String>,
    pub model_dir: Option<String>,
    pub repository_package: Option<String>,
    pub query_only: bool,
}

impl GenerateOverrides {
    pub fn apply(self, mut config: GenerationConfig) -> GenerationConfig {
        if let Some(module) = self.module {
            config.module = module;
        }
        if let Some(destination) = self.destination {
            config.destination = destination;
        }
        let tables: Vec<String> = self
            .tables
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !tables.is_empty() {
            config.tables = tables;
        }
        if let Some(package) = self.model_package {
            config.model_package = package;
        }
        if let Some(dir) = self.model_dir {
            config.model_dir = Some(dir);
        }
        if let Some(package) = self.repository_package {
            config.repository_package = package;
        }
        config.query_only |= self.query_only;
        config
    }
}

impl DatabaseConfig {
    /// Overlay command-line values on top of the project file's.
    pub fn merge(self, flags: DatabaseConfig) -> DatabaseConfig {
        DatabaseConfig {
            creds: flags.creds.or(self.creds),
            env_file: flags.env_file.or(self.env_file),
            env_prefix: flags.env_prefix.or(self.env_prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_default_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let project = ProjectFile::load(&dir.path().join(PROJECT_FILE), false).unwrap();
        assert_eq!(project.generate, GenerationConfig::default());
        assert_eq!(project.database, DatabaseConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProjectFile::load(&dir.path().join("other.toml"), true).is_err());
    }

    #[test]
    fn test_load_project_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(
            &path,
            r#"
[generate]
module = "github.com/acme/billing"
destination = "./internal"
tables = ["invoices", "customers"]
model-dir = "entity"
query-only = true

[database]
env-file = ".env"
env-prefix = "BILLING"
"#,
        )
        .unwrap();

        let project = ProjectFile::load(&path, false).unwrap();
        assert_eq!(project.generate.module, "github.com/acme/billing");
        assert_eq!(project.generate.tables, vec!["invoices", "customers"]);
        assert_eq!(project.generate.model_dir(), "entity");
        assert_eq!(project.generate.model_package, "model");
        assert!(project.generate.query_only);
        assert_eq!(project.database.env_prefix.as_deref(), Some("BILLING"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(&path, "[generate]\nmodul = \"x\"\n").unwrap();
        assert!(ProjectFile::load(&path, false).is_err());
    }

    #[test]
    fn test_flags_win() {
        let file = GenerationConfig::new("github.com/acme/billing")
            .with_tables(["invoices"])
            .with_destination("./internal");
        let config = GenerateOverrides {
            tables: vec!["customers".into(), " refunds ".into(), "".into()],
            repository_package: Some("store".into()),
            ..Default::default()
        }
        .apply(file);

        assert_eq!(config.module, "github.com/acme/billing");
        assert_eq!(config.destination, PathBuf::from("./internal"));
        assert_eq!(config.tables, vec!["customers", "refunds"]);
        assert_eq!(config.repository_package, "store");
    }

    #[test]
    fn test_database_merge() {
        let file = DatabaseConfig {
            env_file: Some(".env".into()),
            env_prefix: Some("BILLING".into()),
            ..Default::default()
        };
        let merged = file.merge(DatabaseConfig {
            env_prefix: Some("TEST".into()),
            ..Default::default()
        });
        assert_eq!(merged.env_file, Some(PathBuf::from(".env")));
        assert_eq!(merged.env_prefix.as_deref(), Some("TEST"));
        assert_eq!(merged.creds, None);
    }
}
