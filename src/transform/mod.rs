//! Field normalization for decoded sales rows
//!
//! Converts raw rows into typed [`SalesRecord`]s: missing or invalid
//! prices are imputed with the batch mean, quantities are clamped to at
//! least 1, order dates are canonicalized, and `total_sales` is derived.
//! Imputation needs a whole-batch statistic, so the normalizer is
//! batch-oriented by design.

mod error;
mod normalize;
mod record;

pub use error::ValidationError;
pub use normalize::{NormalizedBatch, mean_price, normalize_batch, parse_order_date};
pub use record::SalesRecord;
