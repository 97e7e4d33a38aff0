//! The validated sales record flowing between stages

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A cleaned, typed sales record ready for persistence.
///
/// Every instance produced by the normalizer satisfies `price >= 0`,
/// `quantity >= 1` and `total_sales == price * quantity`. `order_id` is
/// the sole identity key: a later run's record for the same id fully
/// supersedes the stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRecord {
    /// Unique order identifier (primary key for persistence)
    pub order_id: i64,
    /// Order date, canonical ISO form on output
    pub order_date: NaiveDate,
    /// Product name, free-form
    pub product: String,
    /// Product category, free-form
    pub category: String,
    /// Unit price, imputed when absent or invalid in the input
    pub price: f64,
    /// Ordered quantity, clamped to at least 1
    pub quantity: i32,
    /// Customer identifier
    pub customer_id: String,
    /// Derived revenue, recomputed every run and never trusted from input
    pub total_sales: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_canonical_date() {
        let record = SalesRecord {
            order_id: 1,
            order_date: NaiveDate::from_ymd_opt(2025, 5, 25).unwrap(),
            product: "Widget".to_string(),
            category: "Tools".to_string(),
            price: 9.99,
            quantity: 2,
            customer_id: "C001".to_string(),
            total_sales: 19.98,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["orderDate"], "2025-05-25");
        assert_eq!(json["orderId"], 1);
    }
}
