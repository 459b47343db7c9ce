//! Preprocessing configuration

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the preprocessing phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Fraction of rows placed in the test partition
    pub test_size: f64,

    /// Fixed decimals for float cells in the written partitions.
    /// `None` writes full precision.
    pub partition_float_precision: Option<usize>,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            partition_float_precision: None,
        }
    }
}

impl PreprocessingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the test fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Builder method to set partition float precision
    pub fn with_float_precision(mut self, decimals: usize) -> Self {
        self.partition_float_precision = Some(decimals);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.test_size) {
            return Err(PipelineError::ConfigError(format!(
                "test_size must be within [0, 1], got {}",
                self.test_size
            )));
        }
        Ok(())
    }
}
