//! Retail ETL - batch pipeline for retail sales records
//!
//! Provides a three-stage pipeline that runs once per invocation:
//! - Extraction: decode delimited sales input into raw rows
//! - Transformation: impute missing prices, clamp quantities, normalize
//!   dates and derive totals
//! - Load: upsert records into a relational store inside a single
//!   transaction, keyed on `order_id`
//!
//! Re-running on the same or overlapping input never duplicates or
//! corrupts stored data: the latest run's values win per order id.

pub mod extract;
pub mod load;
pub mod pipeline;
pub mod transform;

// Re-export commonly used types
pub use extract::{CsvDecoder, DecodeError, RawRow};
#[cfg(feature = "duckdb-backend")]
pub use load::SalesDb;
#[cfg(feature = "postgres-backend")]
pub use load::SalesDbPostgres;
pub use load::{LoadError, StoreConfig};
#[cfg(feature = "duckdb-backend")]
pub use pipeline::run_etl;
#[cfg(feature = "postgres-backend")]
pub use pipeline::run_etl_postgres;
pub use pipeline::{
    EtlReport, PipelineConfig, PipelineError, PipelineExecutor, PipelineStage, PipelineStatus,
};
pub use transform::{NormalizedBatch, SalesRecord, ValidationError};
