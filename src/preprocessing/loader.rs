//! Dataset loading

use super::DatasetSchema;
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Load the raw headerless dataset.
///
/// Every field is read as a string and the schema's column names are
/// assigned in order. Empty fields stay empty strings and the `?` sentinel is
/// kept verbatim for the imputer. Every record must carry exactly as many
/// fields as the schema has columns.
pub fn load_dataset(path: &Path, schema: &DatasetSchema) -> Result<DataFrame> {
    let load_err = |e: &dyn std::fmt::Display| {
        PipelineError::LoadError(format!("{}: {}", path.display(), e))
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| load_err(&e))?;

    let width = schema.width();
    let mut columns: Vec<Vec<String>> = vec![Vec::new(); width];
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| load_err(&e))?;
        if record.len() != width {
            return Err(load_err(&format!(
                "record {} has {} fields, expected {}",
                row + 1,
                record.len(),
                width
            )));
        }
        for (values, field) in columns.iter_mut().zip(record.iter()) {
            values.push(field.to_string());
        }
    }

    if columns.first().map_or(true, Vec::is_empty) {
        return Err(load_err(&"file contains no records"));
    }

    let df = DataFrame::new(
        schema
            .columns
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name.as_str().into(), values))
            .collect(),
    )
    .map_err(|e| load_err(&e))?;

    debug!(path = %path.display(), rows = df.height(), "Loaded raw dataset");
    Ok(df)
}

/// Load a processed partition written by [`super::TableWriter`].
///
/// The header row supplies the column names and dtypes are inferred from the
/// full file.
pub fn load_partition(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .map_err(|e| PipelineError::LoadError(format!("{}: {}", path.display(), e)))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| PipelineError::LoadError(format!("{}: {}", path.display(), e)))?;

    debug!(path = %path.display(), rows = df.height(), cols = df.width(), "Loaded partition");
    Ok(df)
}
