//! Min-max normalization of continuous columns

use super::{numeric_values, DatasetSchema};
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Suffix of the appended normalized columns
pub const NORM_SUFFIX: &str = "_norm";

/// Observed range of a continuous column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxParams {
    pub min: f64,
    pub max: f64,
}

impl MinMaxParams {
    fn scale(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

/// Appends `<col>_norm` = (x - min) / (max - min) for every continuous column.
///
/// Columns whose range is degenerate (min == max, or nothing parseable) get no
/// `_norm` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxNormalizer {
    schema: DatasetSchema,
    params: Vec<(String, MinMaxParams)>,
    skipped: Vec<String>,
    is_fitted: bool,
}

impl MinMaxNormalizer {
    pub fn new(schema: DatasetSchema) -> Self {
        Self {
            schema,
            params: Vec::new(),
            skipped: Vec::new(),
            is_fitted: false,
        }
    }

    /// Compute min and max over the parseable cells of each continuous column
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        self.params.clear();
        self.skipped.clear();

        for col_name in &self.schema.continuous {
            let Ok(column) = df.column(col_name) else {
                warn!(column = %col_name, "Continuous column not found, skipping");
                continue;
            };

            let (min, max) = numeric_values(column.as_materialized_series())?
                .into_iter()
                .flatten()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });

            if min >= max {
                debug!(column = %col_name, "Degenerate range, no normalized column");
                self.skipped.push(col_name.clone());
                continue;
            }

            self.params.push((col_name.clone(), MinMaxParams { min, max }));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Append the normalized columns; unparseable cells map to 0.0
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PipelineError::NotFitted("MinMaxNormalizer"));
        }

        let mut result = df.clone();

        for (col_name, params) in &self.params {
            let column = df
                .column(col_name)
                .map_err(|_| PipelineError::FeatureNotFound(col_name.clone()))?;

            let scaled: Vec<f64> = numeric_values(column.as_materialized_series())?
                .into_iter()
                .map(|v| v.map(|x| params.scale(x)).unwrap_or(0.0))
                .collect();

            let name = Self::normalized_name(col_name);
            result.with_column(Series::new(name.into(), scaled))?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Fitted range of `column`, if it is normalized
    pub fn params(&self, column: &str) -> Option<MinMaxParams> {
        self.params
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, params)| *params)
    }

    /// Continuous columns left without a normalized counterpart
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn normalized_name(column: &str) -> String {
        format!("{}{}", column, NORM_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> DatasetSchema {
        let mut schema = DatasetSchema::credit();
        schema.continuous = vec!["A2".to_string()];
        schema
    }

    fn normalized(df: &DataFrame) -> Vec<f64> {
        df.column("A2_norm")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect()
    }

    #[test]
    fn test_min_max_scaling() {
        let df = df!("A2" => &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut normalizer = MinMaxNormalizer::new(schema());
        let result = normalizer.fit_transform(&df).unwrap();

        let expected = [0.0, 0.3333, 0.6667, 1.0];
        for (got, want) in normalized(&result).iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-4, "got {}, want {}", got, want);
        }
        assert_eq!(normalizer.params("A2"), Some(MinMaxParams { min: 1.0, max: 4.0 }));
        assert!(result.column("A2").is_ok());
    }

    #[test]
    fn test_accepts_string_cells() {
        let df = df!("A2" => &[Some("1"), Some("2"), Some("abc"), None, Some("4")]).unwrap();
        let mut normalizer = MinMaxNormalizer::new(schema());
        let result = normalizer.fit_transform(&df).unwrap();

        let values = normalized(&result);
        assert!((values[1] - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(values[2], 0.0);
        assert_eq!(values[3], 0.0);
        assert_eq!(values[4], 1.0);
    }

    #[test]
    fn test_constant_column_is_skipped() {
        let df = df!("A2" => &[5.0, 5.0, 5.0]).unwrap();
        let mut normalizer = MinMaxNormalizer::new(schema());
        let result = normalizer.fit_transform(&df).unwrap();

        assert!(result.column("A2_norm").is_err());
        assert_eq!(result.width(), 1);
        assert_eq!(normalizer.skipped(), &["A2".to_string()]);
    }

    #[test]
    fn test_unparseable_column_is_skipped() {
        let df = df!("A2" => &["x", "y"]).unwrap();
        let mut normalizer = MinMaxNormalizer::new(schema());
        let result = normalizer.fit_transform(&df).unwrap();
        assert!(result.column("A2_norm").is_err());
    }
}
