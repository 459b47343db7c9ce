//! Training configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classifiers the training phase reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    LogisticRegression,
    RandomForest,
    DecisionTree,
    GradientBoosting,
}

impl ModelType {
    /// Every supported model, in training order
    pub fn all() -> Vec<ModelType> {
        vec![
            ModelType::LogisticRegression,
            ModelType::RandomForest,
            ModelType::DecisionTree,
            ModelType::GradientBoosting,
        ]
    }

    /// Display name used in reports and output file names
    pub fn name(&self) -> &'static str {
        match self {
            ModelType::LogisticRegression => "Logistic Regression",
            ModelType::RandomForest => "Random Forest",
            ModelType::DecisionTree => "Decision Tree",
            ModelType::GradientBoosting => "Gradient Boosting",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for the training phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Models to train, in order
    pub models: Vec<ModelType>,
    /// Random seed for reproducibility; entropy when unset
    pub seed: Option<u64>,
    /// Label column of the processed partitions
    pub target_column: String,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            models: ModelType::all(),
            seed: None,
            target_column: crate::preprocessing::schema::TARGET_COLUMN.to_string(),
        }
    }
}

impl TrainingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_models(mut self, models: Vec<ModelType>) -> Self {
        self.models = models;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
