//! Live schema source backed by MySQL's `information_schema`.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use eyre::{Context, OptionExt, Result, bail};
use repogen_codegen_go::find_module_root;
use repogen_schema::{ColumnInfo, FetchError, KeyRole, SchemaSource};
use sqlx::{
    Row,
    mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow},
};
use tokio::runtime::Runtime;

use crate::config::DatabaseConfig;

const COLUMNS: &str = r#"
SELECT CAST(COLUMN_NAME AS CHAR) AS name,
       CAST(COLUMN_TYPE AS CHAR) AS raw_type,
       CAST(IS_NULLABLE AS CHAR) AS nullable,
       CAST(COLUMN_KEY AS CHAR) AS column_key,
       CAST(EXTRA AS CHAR) AS extra
FROM information_schema.COLUMNS
WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
ORDER BY ORDINAL_POSITION
"#;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3306;

/// Connection parameters, however they were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
}

/// Resolve connection options: an explicit connection string first, then
/// the `REPOGEN_DB_*` variables (loaded from the env file when one is given).
pub fn connect_options(config: &DatabaseConfig, module: &str) -> Result<MySqlConnectOptions> {
    if let Some(creds) = &config.creds {
        return parse_creds(creds);
    }

    match &config.env_file {
        Some(env_file) => {
            let path = locate_env_file(env_file, module)?;
            tracing::debug!(path = %path.display(), "loading env file");
            dotenvy::from_path(&path)
                .wrap_err_with(|| format!("Failed to load {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let credentials = Credentials::from_env(config.env_prefix.as_deref(), |name| {
        std::env::var(name).ok()
    })?;
    Ok(credentials.options())
}

impl Credentials {
    /// Read `{PREFIX_}REPOGEN_DB_{USERNAME,PASSWORD,HOST,PORT,DATABASE}`.
    pub fn from_env(prefix: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |suffix: &str| {
            let name = match prefix.filter(|p| !p.is_empty()) {
                Some(prefix) => format!("{prefix}_REPOGEN_DB_{suffix}"),
                None => format!("REPOGEN_DB_{suffix}"),
            };
            (lookup(&name).filter(|v| !v.is_empty()), name)
        };

        let (username, username_var) = var("USERNAME");
        let (database, database_var) = var("DATABASE");
        let (port, port_var) = var("PORT");
        let port = match port {
            Some(port) => port
                .parse::<u16>()
                .wrap_err_with(|| format!("{port_var} is not a port number: {port}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            username: username.ok_or_else(|| eyre::eyre!("{username_var} is not set"))?,
            password: var("PASSWORD").0,
            host: var("HOST").0.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database: database.ok_or_else(|| eyre::eyre!("{database_var} is not set"))?,
        })
    }

    /// Parse a Go driver DSN: `user:password@tcp(host:port)/database?params`.
    pub fn from_go_dsn(dsn: &str) -> Result<Self> {
        let (userinfo, rest) = match dsn.rsplit_once('@') {
            Some((userinfo, rest)) => (Some(userinfo), rest),
            None => (None, dsn),
        };
        let (address, database) = rest
            .split_once('/')
            .ok_or_eyre("DSN has no database name")?;
        let database = database.split('?').next().unwrap_or_default();
        if database.is_empty() {
            bail!("DSN has no database name");
        }

        // `tcp(host:port)`, `(host:port)` or empty
        let address = match address.find('(') {
            Some(open) => address[open + 1..]
                .strip_suffix(')')
                .ok_or_eyre("DSN address is missing ')'")?,
            None => address,
        };
        let (host, port) = match address.rsplit_once(':') {
            Some((host, port)) => (
                host,
                port.parse::<u16>()
                    .wrap_err_with(|| format!("DSN port is not a number: {port}"))?,
            ),
            None => (address, DEFAULT_PORT),
        };

        let (username, password) = match userinfo {
            Some(info) => match info.split_once(':') {
                Some((user, password)) => (user, Some(password.to_string())),
                None => (info, None),
            },
            None => ("", None),
        };
        if username.is_empty() {
            bail!("DSN has no user name");
        }

        Ok(Self {
            username: username.to_string(),
            password,
            host: if host.is_empty() { DEFAULT_HOST } else { host }.to_string(),
            port,
            database: database.to_string(),
        })
    }

    pub fn options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.database);
        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

fn parse_creds(creds: &str) -> Result<MySqlConnectOptions> {
    if creds.starts_with("mysql://") || creds.starts_with("mariadb://") {
        return MySqlConnectOptions::from_str(creds).wrap_err("Invalid connection URL");
    }
    Ok(Credentials::from_go_dsn(creds)?.options())
}

/// A relative env file missing from the working directory is looked up in
/// the module root.
fn locate_env_file(env_file: &Path, module: &str) -> Result<PathBuf> {
    if env_file.is_absolute() || env_file.exists() {
        return Ok(env_file.to_path_buf());
    }

    let cwd = std::env::current_dir().wrap_err("Failed to read the working directory")?;
    let candidate = find_module_root(&cwd, module).map(|root| root.join(env_file));
    match candidate {
        Some(path) if path.exists() => Ok(path),
        _ => bail!(
            "env file {} not found in the working directory or the module root",
            env_file.display()
        ),
    }
}

/// Describes tables through a single pooled connection, driven by a
/// current-thread runtime so callers stay synchronous.
pub struct MySqlSchema {
    runtime: Runtime,
    pool: MySqlPool,
}

impl MySqlSchema {
    pub fn connect(options: MySqlConnectOptions) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("Failed to start the async runtime")?;
        let pool = runtime
            .block_on(
                MySqlPoolOptions::new()
                    .max_connections(1)
                    .connect_with(options),
            )
            .wrap_err("Unable to connect to the database")?;
        Ok(Self { runtime, pool })
    }
}

impl SchemaSource for MySqlSchema {
    fn describe(&self, table: &str) -> Result<Vec<ColumnInfo>, FetchError> {
        let rows = self
            .runtime
            .block_on(sqlx::query(COLUMNS).bind(table).fetch_all(&self.pool))
            .map_err(FetchError::other)?;
        tracing::debug!(table, columns = rows.len(), "described table");

        rows.iter()
            .map(column)
            .collect::<Result<_, sqlx::Error>>()
            .map_err(FetchError::other)
    }
}

fn column(row: &MySqlRow) -> Result<ColumnInfo, sqlx::Error> {
    let nullable: String = row.try_get("nullable")?;
    let key: String = row.try_get("column_key")?;
    Ok(ColumnInfo {
        name: row.try_get("name")?,
        raw_type: row.try_get("raw_type")?,
        nullable: nullable.eq_ignore_ascii_case("YES"),
        key: KeyRole::from_mysql(&key),
        extra: row.try_get("extra")?,
    })
}
