//! Error types for batch normalization

use thiserror::Error;

/// Errors that can occur while normalizing a decoded batch.
///
/// Key fields that cannot be parsed are fatal to the whole batch: the
/// run persists nothing until every row is clean.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The order id is missing or not an integer
    #[error("Row {row}: order_id {value:?} is not an integer")]
    InvalidOrderId { row: usize, value: String },

    /// The order date is missing or in no recognized format
    #[error("Row {row}: order_date {value:?} is not a recognized date")]
    InvalidOrderDate { row: usize, value: String },
}
