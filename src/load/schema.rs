//! Schema definitions for the sales table

/// Target table name
pub const SALES_TABLE: &str = "sales";

/// Schema and statements for the sales table
pub struct SalesSchema;

impl SalesSchema {
    /// Get the DDL for creating the sales table (DuckDB syntax).
    ///
    /// Idempotent: safe to run on every invocation.
    #[cfg(feature = "duckdb-backend")]
    pub fn create_table_duckdb() -> &'static str {
        r#"
CREATE TABLE IF NOT EXISTS sales (
    order_id     BIGINT PRIMARY KEY,
    order_date   DATE,
    product      VARCHAR,
    category     VARCHAR,
    price        DOUBLE,
    quantity     INTEGER,
    customer_id  VARCHAR,
    total_sales  DOUBLE
);
"#
    }

    /// Get the DDL for creating the sales table (PostgreSQL syntax)
    #[cfg(feature = "postgres-backend")]
    pub fn create_table_postgres() -> &'static str {
        r#"
CREATE TABLE IF NOT EXISTS sales (
    order_id     BIGINT PRIMARY KEY,
    order_date   DATE,
    product      VARCHAR,
    category     VARCHAR,
    price        DOUBLE PRECISION,
    quantity     INTEGER,
    customer_id  VARCHAR,
    total_sales  DOUBLE PRECISION
);
"#
    }

    /// Get the upsert statement (DuckDB syntax).
    ///
    /// On an `order_id` collision every non-key column is overwritten
    /// with the incoming values.
    #[cfg(feature = "duckdb-backend")]
    pub fn upsert_duckdb() -> &'static str {
        "INSERT INTO sales (order_id, order_date, product, category, price, quantity, customer_id, total_sales)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT (order_id) DO UPDATE SET
             order_date = EXCLUDED.order_date,
             product = EXCLUDED.product,
             category = EXCLUDED.category,
             price = EXCLUDED.price,
             quantity = EXCLUDED.quantity,
             customer_id = EXCLUDED.customer_id,
             total_sales = EXCLUDED.total_sales"
    }

    /// Get the upsert statement (PostgreSQL syntax)
    #[cfg(feature = "postgres-backend")]
    pub fn upsert_postgres() -> &'static str {
        "INSERT INTO sales (order_id, order_date, product, category, price, quantity, customer_id, total_sales)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         ON CONFLICT (order_id) DO UPDATE SET
             order_date = EXCLUDED.order_date,
             product = EXCLUDED.product,
             category = EXCLUDED.category,
             price = EXCLUDED.price,
             quantity = EXCLUDED.quantity,
             customer_id = EXCLUDED.customer_id,
             total_sales = EXCLUDED.total_sales"
    }
}
