//! Training results and confusion matrices

use super::ModelType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Square count table indexed by `[actual][predicted]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    /// Two-class matrix over labels `0` and `1`
    pub fn binary(tn: u64, fp: u64, fn_: u64, tp: u64) -> Self {
        Self {
            labels: vec!["0".to_string(), "1".to_string()],
            counts: vec![vec![tn, fp], vec![fn_, tp]],
        }
    }

    /// The matrix reported by the mock trainer
    pub fn mock() -> Self {
        Self::binary(80, 20, 15, 85)
    }

    fn index(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Count of rows with class `actual` predicted as `predicted`
    pub fn get(&self, actual: &str, predicted: &str) -> Option<u64> {
        let row = self.index(actual)?;
        let col = self.index(predicted)?;
        self.counts.get(row)?.get(col).copied()
    }

    /// Precision, recall and F1 for `positive`; zero where undefined.
    ///
    /// Cells missing from a ragged table count as zero.
    pub fn precision_recall_f1(&self, positive: &str) -> (f64, f64, f64) {
        let Some(p) = self.index(positive) else {
            return (0.0, 0.0, 0.0);
        };
        let cell = |row: &Vec<u64>| row.get(p).copied().unwrap_or(0);

        let tp = self.counts.get(p).map_or(0, cell);
        let predicted: u64 = self.counts.iter().map(cell).sum();
        let actual: u64 = self.counts.get(p).map_or(0, |row| row.iter().sum());

        let precision = if predicted > 0 { tp as f64 / predicted as f64 } else { 0.0 };
        let recall = if actual > 0 { tp as f64 / actual as f64 } else { 0.0 };
        (precision, recall, f1(precision, recall))
    }
}

/// Harmonic mean of precision and recall
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Metrics of one trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub model_name: String,
    pub model_type: ModelType,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub trained_at: DateTime<Utc>,
}
