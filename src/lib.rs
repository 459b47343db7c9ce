//! Credit approval - data pipeline for credit card application decisions
//!
//! This crate turns the raw credit application file into model-ready
//! partitions and reports on classifiers trained over them:
//! - Loading, imputation, one-hot encoding, label conversion, normalization
//! - Sort-then-slice train/test splitting and CSV persistence
//! - Model training with per-model metrics and confusion matrices
//! - Evaluation exports and SVG charts
//!
//! # Modules
//!
//! - [`preprocessing`] - Raw file to processed partitions
//! - [`training`] - Model training
//! - [`evaluation`] - Metrics tables, best model, result hand-off
//! - [`visualization`] - SVG charts
//! - [`config`] - Pipeline configuration and data layout
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;
pub mod config;

// Pipeline phases
pub mod preprocessing;
pub mod training;
pub mod evaluation;
pub mod visualization;

// Services
pub mod cli;

pub use error::{PipelineError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{PipelineError, Result};

    // Configuration
    pub use crate::config::PipelineConfig;

    // Preprocessing
    pub use crate::preprocessing::{
        preprocess_file, CreditPreprocessor, DatasetSchema, PreprocessingConfig, TableWriter,
        TrainTestSplitter,
    };

    // Training
    pub use crate::training::{ModelResult, ModelType, TrainEngine, TrainingConfig};

    // Evaluation
    pub use crate::evaluation::ModelEvaluation;

    // Visualization
    pub use crate::visualization::generate_all;
}
