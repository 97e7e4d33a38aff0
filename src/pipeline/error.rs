//! Error types for pipeline execution
//!
//! Stage errors pass through unmodified so the caller sees the original
//! failure; the external scheduler decides whether to retry.

use thiserror::Error;

use crate::extract::DecodeError;
use crate::load::LoadError;
use crate::transform::ValidationError;

use super::config::PipelineStage;

/// Errors that can occur during a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Pipeline configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction failed; no rows were processed
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Transformation failed; the whole batch was abandoned
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Loading failed; any open transaction was rolled back
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// Get the stage this error originated from, if any
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            PipelineError::Config(_) => None,
            PipelineError::Decode(_) => Some(PipelineStage::Extract),
            PipelineError::Validation(_) => Some(PipelineStage::Transform),
            PipelineError::Load(_) => Some(PipelineStage::Load),
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Config(msg) => {
                format!("Configuration error: {msg}\n\nHint: Check the run configuration.")
            }
            PipelineError::Decode(err) => {
                format!(
                    "Extraction failed: {err}\n\nHint: Check that the input file exists and carries the expected header row."
                )
            }
            PipelineError::Validation(err) => {
                format!(
                    "Transformation failed: {err}\n\nHint: Fix the offending row; nothing is persisted until the whole batch is clean."
                )
            }
            PipelineError::Load(err @ LoadError::Connection(_)) => {
                format!(
                    "Loading failed: {err}\n\nHint: Check that the store is reachable and the connection parameters are correct."
                )
            }
            PipelineError::Load(err) => {
                format!(
                    "Loading failed: {err}\n\nHint: The run's writes were rolled back; re-run once the cause is fixed."
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_attribution() {
        let err = PipelineError::Config("missing input".to_string());
        assert_eq!(err.stage(), None);

        let err = PipelineError::from(LoadError::Connection("refused".to_string()));
        assert_eq!(err.stage(), Some(PipelineStage::Load));

        let err = PipelineError::from(ValidationError::InvalidOrderId {
            row: 3,
            value: "abc".to_string(),
        });
        assert_eq!(err.stage(), Some(PipelineStage::Transform));
    }

    #[test]
    fn test_stage_error_passes_through_unmodified() {
        let inner = ValidationError::InvalidOrderDate {
            row: 7,
            value: "soon".to_string(),
        };
        let inner_text = inner.to_string();
        let err = PipelineError::from(inner);
        // Transparent wrapping: the display text is the stage error's own
        assert_eq!(err.to_string(), inner_text);
    }

    #[test]
    fn test_user_message_has_hint() {
        let err = PipelineError::from(LoadError::Connection("refused".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("refused"));
        assert!(msg.contains("Hint:"));
    }
}
