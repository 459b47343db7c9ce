//! Binary conversion of the approval label

use super::{as_string_series, DatasetSchema};
use crate::error::{PipelineError, Result};
use polars::prelude::*;

/// Replaces the label column with 1 for the approved literal and 0 otherwise
#[derive(Debug, Clone)]
pub struct TargetConverter {
    target_column: String,
    positive_label: String,
}

impl TargetConverter {
    pub fn new(target_column: impl Into<String>, positive_label: impl Into<String>) -> Self {
        Self {
            target_column: target_column.into(),
            positive_label: positive_label.into(),
        }
    }

    pub fn from_schema(schema: &DatasetSchema) -> Self {
        Self::new(schema.target.clone(), schema.approved_label.clone())
    }

    /// Convert the label column to `Int32`; missing labels become 0
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let column = df.column(&self.target_column).map_err(|_| {
            PipelineError::TargetError(format!("label column '{}' not found", self.target_column))
        })?;

        let strings = as_string_series(column.as_materialized_series())?;
        let labels: Vec<i32> = strings
            .str()?
            .into_iter()
            .map(|v| i32::from(v == Some(self.positive_label.as_str())))
            .collect();

        let mut result = df.clone();
        result.with_column(Series::new(self.target_column.as_str().into(), labels))?;
        Ok(result)
    }
}
