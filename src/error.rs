//! Error types for the credit approval pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Load error: {0}")]
    LoadError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Target error: {0}")]
    TargetError(String),

    #[error("Write error: {0}")]
    WriteError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Visualization error: {0}")]
    VisualizationError(String),

    #[error("{0} is not fitted")]
    NotFitted(&'static str),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<polars::error::PolarsError> for PipelineError {
    fn from(err: polars::error::PolarsError) -> Self {
        PipelineError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::SerializationError(err.to_string())
    }
}
