//! Sales store implementation
//!
//! Supports both DuckDB (embedded) and PostgreSQL backends. Each backend
//! applies a run's records inside a single transaction: either every
//! upsert lands or none does, which is what makes re-runs safe.

#[cfg(feature = "duckdb-backend")]
use chrono::NaiveDate;
#[cfg(feature = "duckdb-backend")]
use tracing::debug;

#[cfg(feature = "duckdb-backend")]
use crate::transform::SalesRecord;

#[cfg(feature = "duckdb-backend")]
use super::error::LoadError;
#[cfg(feature = "duckdb-backend")]
use super::schema::SalesSchema;

/// Embedded sales store backed by DuckDB
#[cfg(feature = "duckdb-backend")]
pub struct SalesDb {
    conn: duckdb::Connection,
    path: Option<String>,
}

#[cfg(feature = "duckdb-backend")]
impl SalesDb {
    /// Open or create a sales database at the given path
    pub fn open(path: &str) -> Result<Self, LoadError> {
        let conn =
            duckdb::Connection::open(path).map_err(|e| LoadError::Connection(e.to_string()))?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn memory() -> Result<Self, LoadError> {
        let conn = duckdb::Connection::open_in_memory()
            .map_err(|e| LoadError::Connection(e.to_string()))?;
        Ok(Self { conn, path: None })
    }

    /// Get the database path (if not in-memory)
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Create the sales table if it does not exist
    pub fn init(&self) -> Result<(), LoadError> {
        self.conn.execute_batch(SalesSchema::create_table_duckdb())?;
        Ok(())
    }

    /// Apply a batch of records as upserts inside one transaction.
    ///
    /// Records are applied in order, so a later occurrence of an
    /// `order_id` within the batch wins. The transaction is rolled back
    /// on the first failing statement and on every non-commit exit path.
    pub fn upsert_all(&mut self, records: &[SalesRecord]) -> Result<usize, LoadError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(SalesSchema::upsert_duckdb())?;
            for record in records {
                stmt.execute(duckdb::params![
                    record.order_id,
                    record.order_date.to_string(),
                    record.product,
                    record.category,
                    record.price,
                    record.quantity,
                    record.customer_id,
                    record.total_sales,
                ])?;
            }
        }
        tx.commit()?;

        debug!(records = records.len(), "Committed upsert batch");
        Ok(records.len())
    }

    /// Get the total number of stored sales rows
    pub fn record_count(&self) -> Result<i64, LoadError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sales", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Fetch one stored row by order id
    pub fn get(&self, order_id: i64) -> Result<Option<SalesRecord>, LoadError> {
        let result = self.conn.query_row(
            "SELECT order_id, CAST(order_date AS VARCHAR), product, category,
                    price, quantity, customer_id, total_sales
             FROM sales WHERE order_id = ?1",
            duckdb::params![order_id],
            |row| {
                Ok(SalesRecord {
                    order_id: row.get(0)?,
                    order_date: row
                        .get::<_, String>(1)?
                        .parse::<NaiveDate>()
                        .unwrap_or_default(),
                    product: row.get(2)?,
                    category: row.get(3)?,
                    price: row.get(4)?,
                    quantity: row.get(5)?,
                    customer_id: row.get(6)?,
                    total_sales: row.get(7)?,
                })
            },
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// PostgreSQL Implementation
// ============================================================================

#[cfg(feature = "postgres-backend")]
pub use postgres_impl::SalesDbPostgres;

#[cfg(feature = "postgres-backend")]
mod postgres_impl {
    use tokio_postgres::NoTls;
    use tracing::debug;

    use crate::load::config::StoreConfig;
    use crate::load::error::LoadError;
    use crate::load::schema::SalesSchema;
    use crate::transform::SalesRecord;

    /// PostgreSQL sales store (async)
    pub struct SalesDbPostgres {
        client: tokio_postgres::Client,
    }

    impl SalesDbPostgres {
        /// Connect to a PostgreSQL store.
        ///
        /// A failure here means the store was never reached; nothing was
        /// written.
        pub async fn connect(config: &StoreConfig) -> Result<Self, LoadError> {
            let (client, connection) =
                tokio_postgres::connect(&config.connection_string(), NoTls)
                    .await
                    .map_err(|e| LoadError::Connection(e.to_string()))?;

            // Drive the connection until the client is dropped
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::error!("PostgreSQL connection error: {}", e);
                }
            });

            Ok(Self { client })
        }

        /// Create the sales table if it does not exist
        pub async fn init(&self) -> Result<(), LoadError> {
            self.client
                .batch_execute(SalesSchema::create_table_postgres())
                .await
                .map_err(|e| LoadError::Persistence(e.to_string()))?;
            Ok(())
        }

        /// Apply a batch of records as upserts inside one transaction.
        ///
        /// Records are applied in order, so a later occurrence of an
        /// `order_id` within the batch wins. Dropping the transaction on
        /// any error path issues a rollback.
        pub async fn upsert_all(&mut self, records: &[SalesRecord]) -> Result<usize, LoadError> {
            let tx = self
                .client
                .transaction()
                .await
                .map_err(|e| LoadError::Connection(e.to_string()))?;

            let stmt = tx
                .prepare(SalesSchema::upsert_postgres())
                .await
                .map_err(|e| LoadError::Persistence(e.to_string()))?;

            for record in records {
                tx.execute(
                    &stmt,
                    &[
                        &record.order_id,
                        &record.order_date,
                        &record.product,
                        &record.category,
                        &record.price,
                        &record.quantity,
                        &record.customer_id,
                        &record.total_sales,
                    ],
                )
                .await
                .map_err(|e| LoadError::Persistence(e.to_string()))?;
            }

            tx.commit()
                .await
                .map_err(|e| LoadError::Persistence(e.to_string()))?;

            debug!(records = records.len(), "Committed upsert batch");
            Ok(records.len())
        }

        /// Get the total number of stored sales rows
        pub async fn record_count(&self) -> Result<i64, LoadError> {
            let row = self
                .client
                .query_one("SELECT COUNT(*) FROM sales", &[])
                .await
                .map_err(|e| LoadError::Persistence(e.to_string()))?;
            Ok(row.get(0))
        }
    }
}
