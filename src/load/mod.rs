//! Persistence gateway for sales records
//!
//! Ensures the `sales` table exists and applies each record as an upsert
//! keyed on `order_id` (insert if new, otherwise overwrite every non-key
//! column). The whole batch for one run commits as a single transaction,
//! which makes re-running the pipeline on the same or overlapping input
//! converge storage to the latest values instead of duplicating rows.

mod config;
mod db;
mod error;
mod schema;

pub use config::StoreConfig;
#[cfg(feature = "duckdb-backend")]
pub use db::SalesDb;
#[cfg(feature = "postgres-backend")]
pub use db::SalesDbPostgres;
pub use error::LoadError;
pub use schema::{SALES_TABLE, SalesSchema};
