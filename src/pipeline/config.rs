//! Pipeline configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::load::StoreConfig;

/// Main pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input file with the sales batch
    pub input: Option<PathBuf>,
    /// Field delimiter for the input
    pub delimiter: u8,
    /// Embedded database path (DuckDB backend)
    pub database: PathBuf,
    /// Connection parameters for the PostgreSQL backend
    pub store: Option<StoreConfig>,
    /// Verbose output
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: None,
            delimiter: b',',
            database: PathBuf::from("sales.duckdb"),
            store: None,
            verbose: false,
        }
    }
}

impl PipelineConfig {
    /// Create a new pipeline config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input file
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the embedded database path
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = path.into();
        self
    }

    /// Set the store connection parameters
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = Some(store);
        self
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.input.is_none() {
            return Err("Input path is required".to_string());
        }
        Ok(())
    }
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// Stage 1: Decode raw input into rows
    Extract,
    /// Stage 2: Normalize rows into sales records
    Transform,
    /// Stage 3: Upsert records into the store
    Load,
}

impl PipelineStage {
    /// Get all stages in execution order
    pub fn all() -> Vec<Self> {
        vec![Self::Extract, Self::Transform, Self::Load]
    }

    /// Get stage name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Transform => "transform",
            Self::Load => "load",
        }
    }

    /// Get stage description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Extract => "Decode raw input into rows",
            Self::Transform => "Normalize rows into sales records",
            Self::Load => "Upsert records into the store",
        }
    }

    /// Get stage index (1-based)
    pub fn index(&self) -> usize {
        match self {
            Self::Extract => 1,
            Self::Transform => 2,
            Self::Load => 3,
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PipelineStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extract" | "1" => Ok(Self::Extract),
            "transform" | "2" => Ok(Self::Transform),
            "load" | "3" => Ok(Self::Load),
            _ => Err(format!("Unknown stage: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.database, PathBuf::from("sales.duckdb"));
        assert_eq!(config.delimiter, b',');
        assert!(config.input.is_none());
    }

    #[test]
    fn test_pipeline_config_builder() {
        let config = PipelineConfig::new()
            .with_input("/data/sales.csv")
            .with_database("test.duckdb")
            .with_delimiter(b';')
            .with_verbose(true);

        assert_eq!(config.input, Some(PathBuf::from("/data/sales.csv")));
        assert_eq!(config.database, PathBuf::from("test.duckdb"));
        assert_eq!(config.delimiter, b';');
        assert!(config.verbose);
    }

    #[test]
    fn test_config_validation() {
        // Input is required
        assert!(PipelineConfig::default().validate().is_err());
        assert!(
            PipelineConfig::new()
                .with_input("/data/sales.csv")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_pipeline_stage_parse() {
        assert_eq!(
            "extract".parse::<PipelineStage>().unwrap(),
            PipelineStage::Extract
        );
        assert_eq!("2".parse::<PipelineStage>().unwrap(), PipelineStage::Transform);
        assert!("invalid".parse::<PipelineStage>().is_err());
    }

    #[test]
    fn test_pipeline_stage_order() {
        let stages = PipelineStage::all();
        assert_eq!(stages.len(), 3);
        let indexes: Vec<usize> = stages.iter().map(|s| s.index()).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
    }
}
