//! CLI command for running the pipeline

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use serde::Deserialize;

use retail_etl::{EtlReport, PipelineConfig, StoreConfig, run_etl};

/// Store connection flags shared by `run` and `init`
#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// Load into PostgreSQL instead of the embedded store
    #[arg(long)]
    pub postgres: bool,

    /// PostgreSQL host
    #[arg(long)]
    pub pg_host: Option<String>,

    /// PostgreSQL port
    #[arg(long)]
    pub pg_port: Option<u16>,

    /// PostgreSQL database name
    #[arg(long)]
    pub pg_database: Option<String>,

    /// PostgreSQL user
    #[arg(long)]
    pub pg_user: Option<String>,

    /// PostgreSQL password
    #[arg(long)]
    pub pg_password: Option<String>,
}

impl StoreArgs {
    /// Resolve the store config: explicit flags win over the config file,
    /// which wins over defaults
    pub fn resolve(&self, base: Option<StoreConfig>) -> StoreConfig {
        let mut store = base.unwrap_or_default();
        if let Some(ref host) = self.pg_host {
            store.host = host.clone();
        }
        if let Some(port) = self.pg_port {
            store.port = port;
        }
        if let Some(ref database) = self.pg_database {
            store.database = database.clone();
        }
        if let Some(ref user) = self.pg_user {
            store.user = user.clone();
        }
        if let Some(ref password) = self.pg_password {
            store.password = password.clone();
        }
        store
    }
}

/// TOML configuration file contents
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Input file with the sales batch
    pub input: Option<PathBuf>,
    /// Field delimiter
    pub delimiter: Option<char>,
    /// Embedded database path
    pub database: Option<PathBuf>,
    /// Store connection parameters
    pub store: Option<StoreConfig>,
}

impl FileConfig {
    /// Load a config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Arguments for the `run` command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input CSV file with the sales batch
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Field delimiter for the input
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Embedded database path
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,

    /// TOML configuration file (explicit flags take precedence)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Handle the `run` command
pub fn handle_run(args: &RunArgs) -> anyhow::Result<()> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let input = args
        .input
        .clone()
        .or(file.input.clone())
        .context("An input file is required (--input or the config file's `input`)")?;
    let delimiter = delimiter_byte(args.delimiter.or(file.delimiter))?;

    let mut config = PipelineConfig::new()
        .with_input(input)
        .with_delimiter(delimiter)
        .with_verbose(args.verbose);

    if let Some(database) = args.database.clone().or(file.database.clone()) {
        config = config.with_database(database);
    }

    let report = if args.store.postgres {
        run_postgres(config.with_store(args.store.resolve(file.store)))?
    } else {
        run_etl(config).map_err(|e| anyhow::anyhow!(e.user_message()))?
    };

    report.print_summary();
    Ok(())
}

fn delimiter_byte(delimiter: Option<char>) -> anyhow::Result<u8> {
    match delimiter {
        None => Ok(b','),
        Some(c) if c.is_ascii() => Ok(c as u8),
        Some(c) => bail!("Delimiter must be a single ASCII character, got {c:?}"),
    }
}

#[cfg(feature = "postgres-backend")]
fn run_postgres(config: PipelineConfig) -> anyhow::Result<EtlReport> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime
        .block_on(retail_etl::run_etl_postgres(config))
        .map_err(|e| anyhow::anyhow!(e.user_message()))
}

#[cfg(not(feature = "postgres-backend"))]
fn run_postgres(_config: PipelineConfig) -> anyhow::Result<EtlReport> {
    bail!("This build has no PostgreSQL support. Rebuild with --features cli-full.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(None).unwrap(), b',');
        assert_eq!(delimiter_byte(Some(';')).unwrap(), b';');
        assert!(delimiter_byte(Some('€')).is_err());
    }

    #[test]
    fn test_store_args_resolution_order() {
        let args = StoreArgs {
            pg_host: Some("flag-host".to_string()),
            ..Default::default()
        };
        let base = StoreConfig::new()
            .with_host("file-host")
            .with_database("file-db");

        let resolved = args.resolve(Some(base));
        assert_eq!(resolved.host, "flag-host");
        assert_eq!(resolved.database, "file-db");
        // Untouched fields keep their defaults
        assert_eq!(resolved.port, 5432);
    }

    #[test]
    fn test_file_config_parse() {
        let file: FileConfig = toml::from_str(
            r#"
            input = "/data/sales.csv"
            delimiter = ";"

            [store]
            host = "db.internal"
            database = "sales"
            "#,
        )
        .unwrap();

        assert_eq!(file.input, Some(PathBuf::from("/data/sales.csv")));
        assert_eq!(file.delimiter, Some(';'));
        let store = file.store.unwrap();
        assert_eq!(store.host, "db.internal");
        assert_eq!(store.database, "sales");
    }
}
