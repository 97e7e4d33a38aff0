//! CLI command for provisioning the sales table

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use retail_etl::SalesDb;

use super::run::StoreArgs;

/// Arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Embedded database path
    #[arg(long, short = 'd', default_value = "sales.duckdb")]
    pub database: PathBuf,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Handle the `init` command.
///
/// Schema creation is idempotent, so this is safe to run before every
/// first scheduled pipeline run.
pub fn handle_init(args: &InitArgs) -> anyhow::Result<()> {
    if args.store.postgres {
        return init_postgres(&args.store);
    }

    let path = args.database.display().to_string();
    let db = SalesDb::open(&path).with_context(|| format!("Failed to open {path}"))?;
    db.init().context("Failed to create the sales table")?;
    eprintln!("Sales table ready in {path}");
    Ok(())
}

#[cfg(feature = "postgres-backend")]
fn init_postgres(store: &StoreArgs) -> anyhow::Result<()> {
    use retail_etl::{LoadError, SalesDbPostgres};

    let config = store.resolve(None);
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        let db = SalesDbPostgres::connect(&config).await?;
        db.init().await?;
        Ok::<_, LoadError>(())
    })?;
    eprintln!("Sales table ready in {}", config.display());
    Ok(())
}

#[cfg(not(feature = "postgres-backend"))]
fn init_postgres(_store: &StoreArgs) -> anyhow::Result<()> {
    anyhow::bail!("This build has no PostgreSQL support. Rebuild with --features cli-full.")
}
