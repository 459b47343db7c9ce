//! Train/test partitioning
//!
//! Rows are stable-sorted by the target and then sliced, so the partitions are
//! grouped by label rather than shuffled.

use super::as_string_series;
use crate::error::{PipelineError, Result};
use polars::prelude::*;

/// Sort-then-slice splitter
#[derive(Debug, Clone)]
pub struct TrainTestSplitter {
    target_column: String,
    test_size: f64,
}

impl TrainTestSplitter {
    pub fn new(target_column: impl Into<String>, test_size: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&test_size) {
            return Err(PipelineError::ConfigError(format!(
                "test_size must be within [0, 1], got {}",
                test_size
            )));
        }
        Ok(Self {
            target_column: target_column.into(),
            test_size,
        })
    }

    /// Rows that go to the train partition: round((1 - test_size) * total)
    pub fn train_rows(&self, total: usize) -> usize {
        let rows = ((1.0 - self.test_size) * total as f64).round() as usize;
        rows.min(total)
    }

    /// Split into `(train, test)`
    pub fn split(&self, df: &DataFrame) -> Result<(DataFrame, DataFrame)> {
        if df.column(&self.target_column).is_err() {
            return Err(PipelineError::TargetError(format!(
                "label column '{}' not found",
                self.target_column
            )));
        }

        let sorted = df.sort(
            [self.target_column.as_str()],
            SortMultipleOptions::default().with_maintain_order(true),
        )?;

        let total = sorted.height();
        let train_rows = self.train_rows(total);
        let train = sorted.slice(0, train_rows);
        let test = sorted.slice(train_rows as i64, total - train_rows);

        Ok((train, test))
    }
}

/// Count the rows of `df` whose `column` renders as `label`
pub fn count_label(df: &DataFrame, column: &str, label: &str) -> Result<usize> {
    let column = df
        .column(column)
        .map_err(|_| PipelineError::FeatureNotFound(column.to_string()))?;
    let strings = as_string_series(column.as_materialized_series())?;
    let count = strings
        .str()?
        .into_iter()
        .filter(|v| *v == Some(label))
        .count();
    Ok(count)
}
