//! One-hot encoding of categorical columns

use super::{as_string_series, DatasetSchema};
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Appends a `<col>_<value>` 0/1 indicator column per observed category.
///
/// Categories are enumerated in first-seen order. The source columns are
/// kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    schema: DatasetSchema,
    // column name -> distinct categories, first-seen order
    categories: Vec<(String, Vec<String>)>,
    is_fitted: bool,
}

impl OneHotEncoder {
    /// Create a new encoder for the given layout
    pub fn new(schema: DatasetSchema) -> Self {
        Self {
            schema,
            categories: Vec::new(),
            is_fitted: false,
        }
    }

    /// Collect the distinct non-null, non-empty values of each categorical column
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        self.categories.clear();

        for col_name in &self.schema.categorical {
            let Ok(column) = df.column(col_name) else {
                warn!(column = %col_name, "Categorical column not found, skipping");
                continue;
            };

            let strings = as_string_series(column.as_materialized_series())?;
            let mut seen = HashSet::new();
            let mut values = Vec::new();
            for val in strings.str()?.into_iter().flatten() {
                if !val.is_empty() && seen.insert(val) {
                    values.push(val.to_string());
                }
            }

            debug!(column = %col_name, categories = values.len(), "Collected categories");
            self.categories.push((col_name.clone(), values));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Append the indicator columns.
    ///
    /// Fails with [`PipelineError::EncodingError`] when an indicator name is
    /// already present in the table.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted("OneHotEncoder"));
        }

        let mut result = df.clone();

        for (col_name, values) in &self.categories {
            let column = df
                .column(col_name)
                .map_err(|_| PipelineError::FeatureNotFound(col_name.clone()))?;
            let strings = as_string_series(column.as_materialized_series())?;
            let ca = strings.str()?;

            for value in values {
                let name = Self::indicator_name(col_name, value);
                if result.column(&name).is_ok() {
                    return Err(PipelineError::EncodingError(format!(
                        "indicator column '{}' already exists",
                        name
                    )));
                }

                let indicator: Vec<i32> = ca
                    .into_iter()
                    .map(|v| i32::from(v == Some(value.as_str())))
                    .collect();

                result
                    .with_column(Series::new(name.as_str().into(), indicator))
                    .map_err(|e| {
                        PipelineError::EncodingError(format!("cannot append '{}': {}", name, e))
                    })?;
            }
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Categories found for `column`, in first-seen order
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, values)| values.as_slice())
    }

    /// Total number of indicator columns `transform` appends
    pub fn n_indicators(&self) -> usize {
        self.categories.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn indicator_name(column: &str, value: &str) -> String {
        format!("{}_{}", column, value)
    }
}
