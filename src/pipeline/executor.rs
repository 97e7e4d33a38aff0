//! Pipeline executor for running the extract-transform-load sequence

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

use crate::extract::{CsvDecoder, RawRow};
use crate::transform::{self, NormalizedBatch};

use super::config::PipelineConfig;
use super::error::{PipelineError, PipelineResult};

/// Status of a pipeline run.
///
/// Moves strictly forward through the three active states; `Succeeded`
/// and `Failed` are terminal and no state is re-entered within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    /// Run not started yet
    Idle,
    /// Decoding input rows
    Extracting,
    /// Normalizing rows into records
    Transforming,
    /// Upserting records into the store
    Loading,
    /// Run completed and committed
    Succeeded,
    /// Run aborted at some stage
    Failed,
}

impl PipelineStatus {
    /// Check whether the run has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStatus::Succeeded | PipelineStatus::Failed)
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStatus::Idle => "idle",
            PipelineStatus::Extracting => "extracting",
            PipelineStatus::Transforming => "transforming",
            PipelineStatus::Loading => "loading",
            PipelineStatus::Succeeded => "succeeded",
            PipelineStatus::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// What the load stage handed back
struct LoadOutcome {
    batch: NormalizedBatch,
    records_loaded: usize,
}

/// Pipeline executor that runs all three stages in order.
///
/// Performs no retries itself; the hosting scheduler reacts to the
/// returned error and decides on retry and backoff.
pub struct PipelineExecutor {
    config: PipelineConfig,
    run_id: String,
    status: PipelineStatus,
}

impl PipelineExecutor {
    /// Create a new pipeline executor
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self {
            config,
            run_id: Uuid::new_v4().to_string(),
            status: PipelineStatus::Idle,
        })
    }

    /// Get the run ID
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the current status
    pub fn status(&self) -> PipelineStatus {
        self.status
    }

    /// Run the pipeline against the embedded store
    #[cfg(feature = "duckdb-backend")]
    pub fn run(&mut self) -> PipelineResult<EtlReport> {
        let _span = info_span!("etl_run", run_id = %self.run_id).entered();
        let start = Instant::now();

        let result = self.run_embedded();
        self.finish(start, result)
    }

    /// Run the pipeline against a PostgreSQL store
    #[cfg(feature = "postgres-backend")]
    pub async fn run_postgres(&mut self) -> PipelineResult<EtlReport> {
        use tracing::Instrument;

        let start = Instant::now();
        let span = info_span!("etl_run", run_id = %self.run_id);

        let result = self.run_store().instrument(span).await;
        self.finish(start, result)
    }

    #[cfg(feature = "duckdb-backend")]
    fn run_embedded(&mut self) -> PipelineResult<LoadOutcome> {
        let rows = self.extract()?;
        let batch = self.transform(&rows)?;

        self.enter(PipelineStatus::Loading);
        let database = self.config.database.display().to_string();
        let mut db = crate::load::SalesDb::open(&database)?;
        db.init()?;
        let records_loaded = db.upsert_all(&batch.records)?;
        info!(records = records_loaded, database = %database, "Load complete");

        Ok(LoadOutcome {
            batch,
            records_loaded,
        })
    }

    #[cfg(feature = "postgres-backend")]
    async fn run_store(&mut self) -> PipelineResult<LoadOutcome> {
        let rows = self.extract()?;
        let batch = self.transform(&rows)?;

        self.enter(PipelineStatus::Loading);
        let store = self.config.store.clone().ok_or_else(|| {
            PipelineError::Config("Store connection parameters are required".to_string())
        })?;
        let mut db = crate::load::SalesDbPostgres::connect(&store).await?;
        db.init().await?;
        let records_loaded = db.upsert_all(&batch.records).await?;
        info!(records = records_loaded, store = %store.display(), "Load complete");

        Ok(LoadOutcome {
            batch,
            records_loaded,
        })
    }

    fn extract(&mut self) -> PipelineResult<Vec<RawRow>> {
        self.enter(PipelineStatus::Extracting);
        let input = self
            .config
            .input
            .as_ref()
            .ok_or_else(|| PipelineError::Config("Input path is required".to_string()))?;

        let decoder = CsvDecoder::new(input).with_delimiter(self.config.delimiter);
        let rows = decoder.read_rows()?;
        info!(rows = rows.len(), input = %input.display(), "Extraction complete");

        if self.config.verbose {
            eprintln!("Extracted {} rows from {}", rows.len(), input.display());
        }
        Ok(rows)
    }

    fn transform(&mut self, rows: &[RawRow]) -> PipelineResult<NormalizedBatch> {
        self.enter(PipelineStatus::Transforming);
        let batch = transform::normalize_batch(rows)?;
        info!(
            records = batch.records.len(),
            prices_imputed = batch.prices_imputed,
            "Transformation complete"
        );

        if self.config.verbose && batch.prices_imputed > 0 {
            eprintln!(
                "Imputed {} missing prices with batch mean {:.2}",
                batch.prices_imputed, batch.mean_price
            );
        }
        Ok(batch)
    }

    fn enter(&mut self, status: PipelineStatus) {
        debug!(from = %self.status, to = %status, "Stage transition");
        self.status = status;
    }

    fn finish(
        &mut self,
        start: Instant,
        result: PipelineResult<LoadOutcome>,
    ) -> PipelineResult<EtlReport> {
        match result {
            Ok(outcome) => {
                self.status = PipelineStatus::Succeeded;
                let duration_ms = start.elapsed().as_millis() as u64;
                info!(
                    run_id = %self.run_id,
                    records = outcome.records_loaded,
                    duration_ms,
                    "Pipeline completed"
                );
                Ok(EtlReport {
                    run_id: self.run_id.clone(),
                    records_extracted: outcome.batch.records.len(),
                    records_loaded: outcome.records_loaded,
                    prices_imputed: outcome.batch.prices_imputed,
                    mean_price: outcome.batch.mean_price,
                    duration_ms,
                })
            }
            Err(e) => {
                self.status = PipelineStatus::Failed;
                let stage = e.stage().map(|s| s.name()).unwrap_or("config");
                error!(run_id = %self.run_id, stage, error = %e, "Pipeline failed");
                Err(e)
            }
        }
    }
}

/// Report from a successful pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlReport {
    /// Run ID
    pub run_id: String,
    /// Rows decoded from the input
    pub records_extracted: usize,
    /// Records upserted into the store
    pub records_loaded: usize,
    /// Rows whose price was imputed
    pub prices_imputed: usize,
    /// The imputation mean used for this batch
    pub mean_price: f64,
    /// Total duration in milliseconds
    pub duration_ms: u64,
}

impl EtlReport {
    /// Format the duration as a human-readable string
    pub fn duration_string(&self) -> String {
        let secs = self.duration_ms / 1000;
        if secs < 60 {
            format!("{}s", secs)
        } else {
            format!("{}m {}s", secs / 60, secs % 60)
        }
    }

    /// Print a summary to stderr
    pub fn print_summary(&self) {
        eprintln!();
        eprintln!("Run {} - succeeded", self.run_id);
        eprintln!("Duration: {}", self.duration_string());
        eprintln!(
            "Records: {} extracted, {} loaded",
            self.records_extracted, self.records_loaded
        );
        if self.prices_imputed > 0 {
            eprintln!(
                "Imputed {} prices with batch mean {:.2}",
                self.prices_imputed, self.mean_price
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::config::PipelineStage;

    #[test]
    fn test_executor_requires_input() {
        let err = PipelineExecutor::new(PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_executor_starts_idle() {
        let config = PipelineConfig::new().with_input("/data/sales.csv");
        let executor = PipelineExecutor::new(config).unwrap();
        assert_eq!(executor.status(), PipelineStatus::Idle);
        assert!(!executor.status().is_terminal());
        assert!(!executor.run_id().is_empty());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PipelineStatus::Extracting.to_string(), "extracting");
        assert_eq!(PipelineStatus::Succeeded.to_string(), "succeeded");
        assert!(PipelineStatus::Failed.is_terminal());
    }

    #[cfg(feature = "duckdb-backend")]
    #[test]
    fn test_run_fails_on_missing_input_file() {
        use tempfile::TempDir;

        let temp = TempDir::new().unwrap();
        let config = PipelineConfig::new()
            .with_input(temp.path().join("absent.csv"))
            .with_database(temp.path().join("sales.duckdb"));

        let mut executor = PipelineExecutor::new(config).unwrap();
        let err = executor.run().unwrap_err();
        assert_eq!(err.stage(), Some(PipelineStage::Extract));
        assert_eq!(executor.status(), PipelineStatus::Failed);
    }

    #[cfg(feature = "duckdb-backend")]
    #[test]
    fn test_run_end_to_end() {
        use std::fs;
        use tempfile::TempDir;

        let temp = TempDir::new().unwrap();
        let input = temp.path().join("sales.csv");
        fs::write(
            &input,
            "order_id,order_date,product,category,price,quantity,customer_id\n\
             1,05/25/2025,Widget,Tools,10,2,C001\n\
             2,2025-05-26,Gadget,Toys,,0,C002\n\
             3,2025-05-27,Sprocket,Tools,20,1,C003\n",
        )
        .unwrap();

        let config = PipelineConfig::new()
            .with_input(&input)
            .with_database(temp.path().join("sales.duckdb"));

        let mut executor = PipelineExecutor::new(config).unwrap();
        let report = executor.run().unwrap();

        assert_eq!(executor.status(), PipelineStatus::Succeeded);
        assert_eq!(report.records_extracted, 3);
        assert_eq!(report.records_loaded, 3);
        assert_eq!(report.prices_imputed, 1);
        assert_eq!(report.mean_price, 15.0);

        let db =
            crate::load::SalesDb::open(temp.path().join("sales.duckdb").to_str().unwrap()).unwrap();
        // Date normalized, quantity clamped, price imputed
        let first = db.get(1).unwrap().unwrap();
        assert_eq!(first.order_date.to_string(), "2025-05-25");
        let second = db.get(2).unwrap().unwrap();
        assert_eq!(second.quantity, 1);
        assert_eq!(second.price, 15.0);
        assert_eq!(second.total_sales, 15.0);
    }

    #[test]
    fn test_report_duration_string() {
        let report = EtlReport {
            run_id: "test".to_string(),
            records_extracted: 10,
            records_loaded: 10,
            prices_imputed: 0,
            mean_price: 0.0,
            duration_ms: 65_000,
        };
        assert_eq!(report.duration_string(), "1m 5s");
    }
}
