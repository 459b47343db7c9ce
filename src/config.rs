//! Pipeline configuration and on-disk layout
//!
//! All phases read and write well-known paths below a project root:
//!
//! ```text
//! <root>/data/raw/crx.data
//! <root>/data/processed/{train.csv, test.csv, model_evaluation.csv, model_results.json}
//! <root>/data/processed/{visualizations, confusion_matrices}/
//! ```

use crate::error::Result;
use crate::preprocessing::PreprocessingConfig;
use crate::training::TrainingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default project root
pub const ROOT_ENV_VAR: &str = "CREDIT_APPROVAL_ROOT";

/// Configuration shared by every phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Project root holding the `data/` tree
    pub root: PathBuf,
    pub preprocessing: PreprocessingConfig,
    pub training: TrainingConfig,
    /// Decimals of the metrics written to the evaluation CSV
    pub report_float_precision: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: std::env::var(ROOT_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            preprocessing: PreprocessingConfig::default(),
            training: TrainingConfig::default(),
            report_float_precision: 4,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the project root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Builder method to set the test fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.preprocessing.test_size = test_size;
        self
    }

    /// Builder method to seed the mock training RNG
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.training.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.preprocessing.validate()
    }

    pub fn raw_data_path(&self) -> PathBuf {
        self.root.join("data").join("raw").join("crx.data")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.join("data").join("processed")
    }

    pub fn train_path(&self) -> PathBuf {
        self.processed_dir().join("train.csv")
    }

    pub fn test_path(&self) -> PathBuf {
        self.processed_dir().join("test.csv")
    }

    pub fn evaluation_path(&self) -> PathBuf {
        self.processed_dir().join("model_evaluation.csv")
    }

    pub fn results_path(&self) -> PathBuf {
        self.processed_dir().join("model_results.json")
    }

    pub fn visualization_dir(&self) -> PathBuf {
        self.processed_dir().join("visualizations")
    }

    pub fn confusion_matrix_dir(&self) -> PathBuf {
        self.processed_dir().join("confusion_matrices")
    }

    /// Save the configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
