//! Model evaluation
//!
//! Collects per-model results, picks the best model by F1 and exports the
//! metrics table, confusion matrices and the JSON hand-off file read by phases
//! that run on their own.

mod report;

pub use report::render_table;

use crate::error::{PipelineError, Result};
use crate::preprocessing::TableWriter;
use crate::training::ModelResult;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header of the metrics export
pub const METRIC_COLUMNS: [&str; 5] = ["Model", "Accuracy", "Precision", "Recall", "F1 Score"];

/// Model results keyed by model name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelEvaluation {
    results: BTreeMap<String, ModelResult>,
}

impl ModelEvaluation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_results(results: impl IntoIterator<Item = ModelResult>) -> Self {
        let mut evaluation = Self::new();
        for result in results {
            evaluation.add_result(result);
        }
        evaluation
    }

    /// Insert a result, replacing any earlier one for the same model
    pub fn add_result(&mut self, result: ModelResult) {
        self.results.insert(result.model_name.clone(), result);
    }

    /// Results in model-name order
    pub fn results(&self) -> impl Iterator<Item = &ModelResult> {
        self.results.values()
    }

    pub fn get(&self, model_name: &str) -> Option<&ModelResult> {
        self.results.get(model_name)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Model with the highest F1 score; ties go to the first name
    pub fn best_model(&self) -> Option<&ModelResult> {
        let mut best: Option<&ModelResult> = None;
        for result in self.results.values() {
            if best.map_or(true, |b| result.f1_score > b.f1_score) {
                best = Some(result);
            }
        }
        best
    }

    /// One row per model with the exported metric columns
    pub fn to_metrics_frame(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.results.keys().map(String::as_str).collect();
        let metric = |f: fn(&ModelResult) -> f64| -> Vec<f64> {
            self.results.values().map(f).collect()
        };

        let df = DataFrame::new(vec![
            Column::new(METRIC_COLUMNS[0].into(), names),
            Column::new(METRIC_COLUMNS[1].into(), metric(|r| r.accuracy)),
            Column::new(METRIC_COLUMNS[2].into(), metric(|r| r.precision)),
            Column::new(METRIC_COLUMNS[3].into(), metric(|r| r.recall)),
            Column::new(METRIC_COLUMNS[4].into(), metric(|r| r.f1_score)),
        ])?;
        Ok(df)
    }

    /// Write the metrics table with `precision` decimals
    pub fn save_results_csv(&self, path: &Path, precision: usize) -> Result<()> {
        let df = self.to_metrics_frame()?;
        TableWriter::new(Some(precision)).write(&df, path)?;
        info!(path = %path.display(), models = self.len(), "Saved evaluation results");
        Ok(())
    }

    /// Write `<model>_confusion_matrix.csv` for every model into `dir`
    pub fn save_confusion_matrices(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let writer = TableWriter::default();
        let mut written = Vec::with_capacity(self.len());

        for (name, result) in &self.results {
            let cm = &result.confusion_matrix;
            let mut columns = vec![Column::new("Actual/Predicted".into(), cm.labels.clone())];
            for predicted in &cm.labels {
                let counts: Vec<i64> = cm
                    .labels
                    .iter()
                    .map(|actual| cm.get(actual, predicted).unwrap_or(0) as i64)
                    .collect();
                columns.push(Column::new(predicted.as_str().into(), counts));
            }

            let path = dir.join(format!("{}_confusion_matrix.csv", name));
            writer.write(&DataFrame::new(columns)?, &path)?;
            debug!(model = %name, path = %path.display(), "Saved confusion matrix");
            written.push(path);
        }

        Ok(written)
    }

    /// Persist the results for later phases
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|e| PipelineError::WriteError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| PipelineError::LoadError(format!("{}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Feature importance scores, highest first.
    ///
    /// The trainer does not fit real models, so these are fixed scores over the
    /// raw feature columns.
    pub fn feature_importance() -> Vec<(String, f64)> {
        let mut scores: Vec<(String, f64)> = [
            ("A2", 0.15),
            ("A3", 0.12),
            ("A8", 0.18),
            ("A11", 0.09),
            ("A14", 0.14),
            ("A15", 0.11),
            ("A1", 0.07),
            ("A4", 0.06),
            ("A5", 0.05),
            ("A6", 0.03),
        ]
        .into_iter()
        .map(|(name, score)| (name.to_string(), score))
        .collect();
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
    }
}
