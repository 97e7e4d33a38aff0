//! Pipeline orchestration for the full extract-transform-load run
//!
//! Sequences the three stages, stops at the first failing stage and
//! surfaces that stage's error unmodified. One invocation is one run;
//! scheduling, retry and backoff belong to the external caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use retail_etl::pipeline::{PipelineConfig, run_etl};
//!
//! let config = PipelineConfig::new()
//!     .with_input("/data/sales.csv")
//!     .with_database("sales.duckdb");
//!
//! let report = run_etl(config)?;
//! eprintln!("Loaded {} records in {}", report.records_loaded, report.duration_string());
//! ```
//!
//! For a PostgreSQL target, pass a [`crate::load::StoreConfig`] and use
//! [`run_etl_postgres`] instead.

mod config;
mod error;
mod executor;

pub use config::{PipelineConfig, PipelineStage};
pub use error::{PipelineError, PipelineResult};
pub use executor::{EtlReport, PipelineExecutor, PipelineStatus};

/// Run a pipeline against the embedded store.
///
/// Convenience wrapper for simple one-shot execution.
#[cfg(feature = "duckdb-backend")]
pub fn run_etl(config: PipelineConfig) -> PipelineResult<EtlReport> {
    let mut executor = PipelineExecutor::new(config)?;
    executor.run()
}

/// Run a pipeline against a PostgreSQL store
#[cfg(feature = "postgres-backend")]
pub async fn run_etl_postgres(config: PipelineConfig) -> PipelineResult<EtlReport> {
    let mut executor = PipelineExecutor::new(config)?;
    executor.run_postgres().await
}
