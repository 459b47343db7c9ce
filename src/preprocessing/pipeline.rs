//! Data preprocessing pipeline

use super::{
    count_label, load_dataset, DatasetSchema, MinMaxNormalizer, MissingValueImputer,
    OneHotEncoder, PreprocessingConfig, TableWriter, TargetConverter, TrainTestSplitter,
};
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Imputation, encoding, label conversion and normalization in sequence.
///
/// Each stage takes the previous table and returns a new one; nothing is
/// mutated in place.
#[derive(Debug, Clone)]
pub struct CreditPreprocessor {
    schema: DatasetSchema,
    imputer: MissingValueImputer,
    encoder: OneHotEncoder,
    target: TargetConverter,
    normalizer: MinMaxNormalizer,
    is_fitted: bool,
    /// Timing: seconds spent in last fit_transform call
    fit_time: Option<f64>,
}

impl CreditPreprocessor {
    /// Create a preprocessor for the credit dataset layout
    pub fn new() -> Self {
        Self::with_schema(DatasetSchema::credit())
    }

    pub fn with_schema(schema: DatasetSchema) -> Self {
        Self {
            imputer: MissingValueImputer::new(schema.clone()),
            encoder: OneHotEncoder::new(schema.clone()),
            target: TargetConverter::from_schema(&schema),
            normalizer: MinMaxNormalizer::new(schema.clone()),
            schema,
            is_fitted: false,
            fit_time: None,
        }
    }

    /// Run every stage on a freshly loaded table
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        let start = Instant::now();

        let imputed = self.imputer.fit_transform(df)?;
        info!(rows = imputed.height(), "Imputed missing values");

        let encoded = self.encoder.fit_transform(&imputed)?;
        info!(indicators = self.encoder.n_indicators(), "Encoded categorical features");

        let labelled = self.target.transform(&encoded)?;
        info!(column = %self.schema.target, "Converted target variable");

        let normalized = self.normalizer.fit_transform(&labelled)?;
        info!(
            skipped = self.normalizer.skipped().len(),
            cols = normalized.width(),
            "Normalized continuous features"
        );

        self.is_fitted = true;
        self.fit_time = Some(start.elapsed().as_secs_f64());
        Ok(normalized)
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn imputer(&self) -> &MissingValueImputer {
        &self.imputer
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    pub fn normalizer(&self) -> &MinMaxNormalizer {
        &self.normalizer
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    pub fn fit_time(&self) -> Option<f64> {
        self.fit_time
    }
}

impl Default for CreditPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a preprocessing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessSummary {
    pub input_rows: usize,
    pub output_columns: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_approved: usize,
    pub test_approved: usize,
    pub elapsed_secs: f64,
}

/// Load the raw file, preprocess it, split it and write both partitions.
///
/// The train partition is written before the test partition; a failure on the
/// second write leaves the first file in place.
pub fn preprocess_file(
    input: &Path,
    train_out: &Path,
    test_out: &Path,
    config: &PreprocessingConfig,
) -> Result<PreprocessSummary> {
    config.validate()?;
    let start = Instant::now();
    let schema = DatasetSchema::credit();

    let raw = load_dataset(input, &schema)?;
    info!(path = %input.display(), rows = raw.height(), "Loaded raw data");

    let mut preprocessor = CreditPreprocessor::with_schema(schema.clone());
    let processed = preprocessor.fit_transform(&raw)?;

    let splitter = TrainTestSplitter::new(schema.target.clone(), config.test_size)?;
    let (train, test) = splitter.split(&processed)?;

    let writer = TableWriter::new(config.partition_float_precision);
    writer.write(&train, train_out)?;
    writer.write(&test, test_out)?;
    info!(
        train = %train_out.display(),
        test = %test_out.display(),
        train_rows = train.height(),
        test_rows = test.height(),
        "Saved processed partitions"
    );

    Ok(PreprocessSummary {
        input_rows: raw.height(),
        output_columns: processed.width(),
        train_rows: train.height(),
        test_rows: test.height(),
        train_approved: count_label(&train, &schema.target, "1")?,
        test_approved: count_label(&test, &schema.target, "1")?,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::ImputeValue;

    fn create_raw_dataframe() -> DataFrame {
        let rows = [
            ["b", "30.83", "0", "u", "g", "w", "v", "1.25", "t", "t", "01", "f", "g", "00202", "0", "+"],
            ["a", "58.67", "4.46", "u", "g", "q", "h", "3.04", "t", "t", "06", "f", "g", "00043", "560", "+"],
            ["?", "24.50", "0.5", "u", "g", "q", "h", "1.5", "t", "f", "0", "f", "g", "00280", "824", "-"],
            ["b", "?", "1.54", "y", "p", "w", "v", "3.75", "t", "t", "05", "t", "g", "00100", "3", "-"],
        ];
        let columns: Vec<Column> = (0..16)
            .map(|c| {
                let values: Vec<&str> = rows.iter().map(|r| r[c]).collect();
                Column::new(format!("A{}", c + 1).into(), values)
            })
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_preprocessor_creation() {
        let preprocessor = CreditPreprocessor::new();
        assert!(!preprocessor.is_fitted());
        assert!(preprocessor.fit_time().is_none());
    }

    #[test]
    fn test_fit_transform_appends_columns() {
        let df = create_raw_dataframe();
        let mut preprocessor = CreditPreprocessor::new();
        let result = preprocessor.fit_transform(&df).unwrap();

        assert_eq!(result.height(), 4);
        assert!(result.width() > df.width());
        assert!(preprocessor.is_fitted());

        // Originals kept, derived columns appended
        assert!(result.column("A1").is_ok());
        assert!(result.column("A1_b").is_ok());
        assert!(result.column("A1_a").is_ok());
        assert!(result.column("A2_norm").is_ok());
        assert_eq!(result.column("A16").unwrap().dtype(), &DataType::Int32);

        // A1 mode is "b" (2 of 3), filling the "?" row
        assert_eq!(
            preprocessor.imputer().fill_value("A1"),
            Some(&ImputeValue::Mode("b".to_string()))
        );
        assert_eq!(preprocessor.encoder().categories("A1").unwrap(), &["b", "a"]);
    }

    #[test]
    fn test_all_feature_columns_imputed() {
        let df = create_raw_dataframe();
        let mut preprocessor = CreditPreprocessor::new();
        let result = preprocessor.fit_transform(&df).unwrap();

        let schema = DatasetSchema::credit();
        for name in schema.categorical.iter().chain(schema.continuous.iter()) {
            assert_eq!(result.column(name).unwrap().null_count(), 0, "{}", name);
        }
    }

    #[test]
    fn test_constant_column_has_no_norm() {
        let df = create_raw_dataframe();
        let mut preprocessor = CreditPreprocessor::new();
        let result = preprocessor.fit_transform(&df).unwrap();

        // constant categorical columns are still encoded
        assert!(result.column("A13_g").is_ok());
        for name in &DatasetSchema::credit().continuous {
            let has_norm = result.column(&format!("{}_norm", name)).is_ok();
            let skipped = preprocessor.normalizer().skipped().contains(name);
            assert!(has_norm != skipped, "{}", name);
        }
    }
}
