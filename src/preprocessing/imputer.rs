//! Missing value imputation
//!
//! Sentinel cells become nulls first; categorical columns are then filled
//! with their mode and continuous columns with their mean.

use super::{as_string_series, numeric_values, DatasetSchema};
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fill value computed for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeValue {
    /// Most frequent string (categorical)
    Mode(String),
    /// Arithmetic mean of the parseable cells (continuous)
    Mean(f64),
}

/// Replace every string cell equal to `marker` with null.
///
/// Non-string columns and cells that are already null are left untouched.
pub fn mask_sentinels(df: &DataFrame, marker: &str) -> Result<DataFrame> {
    let mut result = df.clone();

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if series.dtype() != &DataType::String {
            continue;
        }

        let ca = series.str()?;
        if !ca.into_iter().any(|v| v == Some(marker)) {
            continue;
        }

        let masked: Vec<Option<&str>> = ca
            .into_iter()
            .map(|v| v.filter(|s| *s != marker))
            .collect();
        result.with_column(Series::new(series.name().clone(), masked))?;
    }

    Ok(result)
}

/// Imputer for the credit dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingValueImputer {
    schema: DatasetSchema,
    fill_values: HashMap<String, ImputeValue>,
    is_fitted: bool,
}

impl MissingValueImputer {
    /// Create a new imputer for the given layout
    pub fn new(schema: DatasetSchema) -> Self {
        Self {
            schema,
            fill_values: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Compute the fill value of every categorical and continuous column
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        let masked = mask_sentinels(df, &self.schema.missing_marker)?;
        self.fill_values.clear();

        for col_name in &self.schema.categorical {
            let Ok(column) = masked.column(col_name) else {
                warn!(column = %col_name, "Categorical column not found, skipping");
                continue;
            };
            let mode = Self::compute_mode(column.as_materialized_series())?;
            debug!(column = %col_name, mode = %mode, "Categorical fill value");
            self.fill_values.insert(col_name.clone(), ImputeValue::Mode(mode));
        }

        for col_name in &self.schema.continuous {
            let Ok(column) = masked.column(col_name) else {
                warn!(column = %col_name, "Continuous column not found, skipping");
                continue;
            };
            let mean = Self::compute_mean(column.as_materialized_series())?;
            debug!(column = %col_name, mean, "Continuous fill value");
            self.fill_values.insert(col_name.clone(), ImputeValue::Mean(mean));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Mask sentinels and fill every missing cell of the fitted columns
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted("MissingValueImputer"));
        }

        let mut result = mask_sentinels(df, &self.schema.missing_marker)?;

        for (col_name, fill_value) in &self.fill_values {
            let series = result
                .column(col_name)
                .map_err(|_| PipelineError::FeatureNotFound(col_name.clone()))?
                .as_materialized_series()
                .clone();
            let filled = Self::fill_series(&series, fill_value)?;
            result.with_column(filled)?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Fill value computed for `column`, if it was fitted
    pub fn fill_value(&self, column: &str) -> Option<&ImputeValue> {
        self.fill_values.get(column)
    }

    /// Most frequent non-null value; ties go to the value seen first.
    /// An all-null column yields the empty string.
    fn compute_mode(series: &Series) -> Result<String> {
        let strings = as_string_series(series)?;
        let ca = strings.str()?;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();
        for val in ca.into_iter().flatten() {
            let count = counts.entry(val).or_insert_with(|| {
                first_seen.push(val);
                0
            });
            *count += 1;
        }

        let mut mode = "";
        let mut best = 0usize;
        for val in first_seen {
            let count = counts.get(val).copied().unwrap_or(0);
            if count > best {
                best = count;
                mode = val;
            }
        }

        Ok(mode.to_string())
    }

    /// Mean over parseable cells, 0.0 when none parse
    fn compute_mean(series: &Series) -> Result<f64> {
        let (sum, count) = numeric_values(series)?
            .into_iter()
            .flatten()
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        Ok(if count > 0 { sum / count as f64 } else { 0.0 })
    }

    fn fill_series(series: &Series, fill_value: &ImputeValue) -> Result<Series> {
        let name = series.name().clone();
        match fill_value {
            ImputeValue::Mode(mode) => {
                let strings = as_string_series(series)?;
                let filled: Vec<&str> = strings
                    .str()?
                    .into_iter()
                    .map(|v| v.unwrap_or(mode.as_str()))
                    .collect();
                Ok(Series::new(name, filled))
            }
            ImputeValue::Mean(mean) => {
                let filled: Vec<f64> = numeric_values(series)?
                    .into_iter()
                    .map(|v| v.unwrap_or(*mean))
                    .collect();
                Ok(Series::new(name, filled))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_dataframe() -> DataFrame {
        df!(
            "A1" => &[Some("b"), Some("?"), Some("a"), Some("a"), None],
            "A2" => &[Some("30.83"), Some("?"), Some("24.50"), Some("x"), Some("20.17")],
            "A16" => &[Some("+"), Some("?"), Some("-"), Some("+"), Some("-")],
        )
        .unwrap()
    }

    fn schema() -> DatasetSchema {
        let mut schema = DatasetSchema::credit();
        schema.categorical = vec!["A1".to_string()];
        schema.continuous = vec!["A2".to_string()];
        schema
    }

    #[test]
    fn test_mask_sentinels_all_columns() {
        let df = create_test_dataframe();
        let masked = mask_sentinels(&df, "?").unwrap();

        assert_eq!(masked.column("A1").unwrap().null_count(), 2);
        assert_eq!(masked.column("A2").unwrap().null_count(), 1);
        assert_eq!(masked.column("A16").unwrap().null_count(), 1);
    }

    #[test]
    fn test_no_missing_after_imputation() {
        let df = create_test_dataframe();
        let mut imputer = MissingValueImputer::new(schema());
        let result = imputer.fit_transform(&df).unwrap();

        assert_eq!(result.column("A1").unwrap().null_count(), 0);
        assert_eq!(result.column("A2").unwrap().null_count(), 0);
        assert_eq!(result.column("A2").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_categorical_mode_fill() {
        let df = create_test_dataframe();
        let mut imputer = MissingValueImputer::new(schema());
        let result = imputer.fit_transform(&df).unwrap();

        assert_eq!(imputer.fill_value("A1"), Some(&ImputeValue::Mode("a".to_string())));
        let a1 = result.column("A1").unwrap().as_materialized_series().str().unwrap().clone();
        assert_eq!(a1.get(1), Some("a"));
        assert_eq!(a1.get(4), Some("a"));
        assert_eq!(a1.get(0), Some("b"));
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        let df = df!("A1" => &["y", "x", "x", "y", "?"]).unwrap();
        let mut imputer = MissingValueImputer::new(schema());
        imputer.fit(&df).unwrap();
        assert_eq!(imputer.fill_value("A1"), Some(&ImputeValue::Mode("y".to_string())));
    }

    #[test]
    fn test_all_missing_categorical_fills_empty_string() {
        let df = df!("A1" => &[Some("?"), None]).unwrap();
        let mut imputer = MissingValueImputer::new(schema());
        let result = imputer.fit_transform(&df).unwrap();

        let a1 = result.column("A1").unwrap().as_materialized_series().str().unwrap().clone();
        assert_eq!(a1.get(0), Some(""));
        assert_eq!(a1.get(1), Some(""));
    }

    #[test]
    fn test_continuous_mean_skips_unparseable() {
        let df = create_test_dataframe();
        let mut imputer = MissingValueImputer::new(schema());
        let result = imputer.fit_transform(&df).unwrap();

        let expected = (30.83 + 24.50 + 20.17) / 3.0;
        match imputer.fill_value("A2") {
            Some(ImputeValue::Mean(mean)) => assert!((mean - expected).abs() < 1e-9),
            other => panic!("unexpected fill value {:?}", other),
        }

        let a2 = result.column("A2").unwrap().as_materialized_series().f64().unwrap().clone();
        assert!((a2.get(1).unwrap() - expected).abs() < 1e-9);
        assert!((a2.get(3).unwrap() - expected).abs() < 1e-9);
        assert!((a2.get(0).unwrap() - 30.83).abs() < 1e-9);
    }

    #[test]
    fn test_no_parseable_values_fills_zero() {
        let df = df!("A2" => &["?", "n/a"]).unwrap();
        let mut imputer = MissingValueImputer::new(schema());
        let result = imputer.fit_transform(&df).unwrap();

        let a2 = result.column("A2").unwrap().as_materialized_series().f64().unwrap().clone();
        assert_eq!(a2.get(0), Some(0.0));
        assert_eq!(a2.get(1), Some(0.0));
    }

    #[test]
    fn test_imputing_twice_is_a_no_op() {
        let df = create_test_dataframe();
        let mut imputer = MissingValueImputer::new(schema());
        let once = imputer.fit_transform(&df).unwrap();

        let mut again = MissingValueImputer::new(schema());
        let twice = again.fit_transform(&once).unwrap();

        match (imputer.fill_value("A2"), again.fill_value("A2")) {
            (Some(ImputeValue::Mean(first)), Some(ImputeValue::Mean(second))) => {
                assert!((first - second).abs() < 1e-9)
            }
            other => panic!("unexpected fill values {:?}", other),
        }
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let imputer = MissingValueImputer::new(schema());
        let result = imputer.transform(&create_test_dataframe());
        assert!(matches!(result, Err(PipelineError::NotFitted(_))));
    }
}
