//! Batch normalization and mean-price imputation

use chrono::NaiveDate;
use tracing::debug;

use crate::extract::RawRow;

use super::error::ValidationError;
use super::record::SalesRecord;

/// Accepted input formats for `order_date`, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y"];

/// Outcome of normalizing one decoded batch
#[derive(Debug, Clone)]
pub struct NormalizedBatch {
    /// One record per input row, in input order
    pub records: Vec<SalesRecord>,
    /// Number of rows whose price was imputed with the batch mean
    pub prices_imputed: usize,
    /// The mean used for imputation (0.0 when no row had a usable price)
    pub mean_price: f64,
}

/// Normalize a whole decoded batch into sales records.
///
/// Two explicit passes: the imputation mean is computed over the full
/// batch first, then threaded as a value into every per-row conversion.
/// Row order is preserved; the first row with an unparseable key field
/// fails the whole batch.
pub fn normalize_batch(rows: &[RawRow]) -> Result<NormalizedBatch, ValidationError> {
    let mean = mean_price(rows).unwrap_or(0.0);

    let mut prices_imputed = 0;
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let (record, imputed) = normalize_row(row, mean)?;
        if imputed {
            prices_imputed += 1;
        }
        records.push(record);
    }

    debug!(
        records = records.len(),
        prices_imputed,
        mean_price = mean,
        "Normalized batch"
    );

    Ok(NormalizedBatch {
        records,
        prices_imputed,
        mean_price: mean,
    })
}

/// Arithmetic mean of all usable prices in the batch.
///
/// A price is usable when present, numeric and non-negative; anything
/// else is invisible to the mean. Present-but-invalid is therefore
/// indistinguishable from absent. Returns `None` for a batch with no
/// usable price.
pub fn mean_price(rows: &[RawRow]) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for row in rows {
        if let Some(price) = usable_price(row) {
            sum += price;
            count += 1;
        }
    }
    if count == 0 { None } else { Some(sum / count as f64) }
}

/// Parse an order date in any accepted format
pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn usable_price(row: &RawRow) -> Option<f64> {
    row.get("price")
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p >= 0.0)
}

fn normalize_row(row: &RawRow, mean: f64) -> Result<(SalesRecord, bool), ValidationError> {
    let order_id = row
        .get("order_id")
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| ValidationError::InvalidOrderId {
            row: row.index,
            value: field_repr(row, "order_id"),
        })?;

    let order_date = row
        .get("order_date")
        .and_then(parse_order_date)
        .ok_or_else(|| ValidationError::InvalidOrderDate {
            row: row.index,
            value: field_repr(row, "order_date"),
        })?;

    let (price, imputed) = match usable_price(row) {
        Some(price) => (price, false),
        None => (mean, true),
    };

    let quantity = row
        .get("quantity")
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|q| q.is_finite())
        .map(|q| (q as i32).max(1))
        .unwrap_or(1);

    let total_sales = price * f64::from(quantity);

    let record = SalesRecord {
        order_id,
        order_date,
        product: text_field(row, "product"),
        category: text_field(row, "category"),
        price,
        quantity,
        customer_id: text_field(row, "customer_id"),
        total_sales,
    };

    Ok((record, imputed))
}

fn text_field(row: &RawRow, column: &str) -> String {
    row.get(column).unwrap_or_default().to_string()
}

fn field_repr(row: &RawRow, column: &str) -> String {
    row.raw(column).unwrap_or("<absent>").to_string()
}
