//! Data preprocessing module
//!
//! Turns the raw credit application file into model-ready partitions:
//! - Loading the headerless 16-column file as strings
//! - Missing value imputation (mode for categorical, mean for continuous)
//! - One-hot encoding of categorical columns
//! - Binary conversion of the approval label
//! - Min-max normalization of continuous columns
//! - Sort-then-slice train/test splitting and CSV persistence

mod config;
mod encoder;
mod imputer;
mod loader;
mod normalizer;
mod pipeline;
pub mod schema;
mod split;
mod target;
mod writer;

pub use config::PreprocessingConfig;
pub use encoder::OneHotEncoder;
pub use imputer::{mask_sentinels, ImputeValue, MissingValueImputer};
pub use loader::{load_dataset, load_partition};
pub use normalizer::{MinMaxNormalizer, MinMaxParams, NORM_SUFFIX};
pub use pipeline::{preprocess_file, CreditPreprocessor, PreprocessSummary};
pub use schema::{ColumnType, DatasetSchema};
pub use split::{count_label, TrainTestSplitter};
pub use target::TargetConverter;
pub use writer::TableWriter;

use crate::error::Result;
use polars::prelude::*;

/// Read every cell of a series as `f64`.
///
/// String cells are parsed, numeric cells are cast. Missing, unparseable and
/// non-finite cells come back as `None`.
pub fn numeric_values(series: &Series) -> Result<Vec<Option<f64>>> {
    let values: Vec<Option<f64>> = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|v| v.and_then(|s| s.parse::<f64>().ok()))
            .collect(),
        _ => {
            let casted = series.cast(&DataType::Float64)?;
            let ca = casted.f64()?;
            ca.into_iter().collect()
        }
    };

    Ok(values
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

/// View a series as strings, casting non-string dtypes
pub(crate) fn as_string_series(series: &Series) -> Result<Series> {
    if series.dtype() == &DataType::String {
        Ok(series.clone())
    } else {
        Ok(series.cast(&DataType::String)?)
    }
}
