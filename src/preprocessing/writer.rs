//! Delimited-text persistence of tables

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

/// Writes a table as CSV: header row, then one line per record.
/// Missing cells are written as empty fields.
#[derive(Debug, Clone, Default)]
pub struct TableWriter {
    float_precision: Option<usize>,
}

impl TableWriter {
    /// `float_precision` fixes the decimals of float cells; `None` keeps full precision
    pub fn new(float_precision: Option<usize>) -> Self {
        Self { float_precision }
    }

    /// Write `df` to `path`, replacing any existing file and creating parent directories
    pub fn write(&self, df: &DataFrame, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| PipelineError::WriteError(format!("{}: {}", parent.display(), e)))?;
        }

        let mut file = File::create(path)
            .map_err(|e| PipelineError::WriteError(format!("{}: {}", path.display(), e)))?;

        let mut out = df.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_float_precision(self.float_precision)
            .finish(&mut out)
            .map_err(|e| PipelineError::WriteError(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), rows = df.height(), cols = df.width(), "Wrote table");
        Ok(())
    }
}
