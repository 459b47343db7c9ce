//! Model training
//!
//! Trains the configured classifiers on the processed partitions and returns
//! their metrics as a [`ModelEvaluation`](crate::evaluation::ModelEvaluation).

mod config;
mod engine;
mod models;

pub use config::{ModelType, TrainingConfig};
pub use engine::TrainEngine;
pub use models::{f1, ConfusionMatrix, ModelResult};
