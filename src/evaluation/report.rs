//! Plain-text metrics table

use super::{ModelEvaluation, METRIC_COLUMNS};
use crate::training::ModelResult;
use std::fmt::Write;

fn row(out: &mut String, result: &ModelResult) {
    let _ = writeln!(
        out,
        "{:<20} {:<10.4} {:<10.4} {:<10.4} {:<10.4}",
        result.model_name, result.accuracy, result.precision, result.recall, result.f1_score
    );
}

/// Every model's metrics followed by the best model
pub fn render_table(evaluation: &ModelEvaluation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<10} {:<10} {:<10} {:<10}",
        METRIC_COLUMNS[0], METRIC_COLUMNS[1], METRIC_COLUMNS[2], METRIC_COLUMNS[3], METRIC_COLUMNS[4]
    );
    let _ = writeln!(out, "{}", "-".repeat(60));

    for result in evaluation.results() {
        row(&mut out, result);
    }

    if let Some(best) = evaluation.best_model() {
        let _ = writeln!(out, "\nBest Model (by F1 Score):");
        row(&mut out, best);

        let (precision, recall, f1) = best.confusion_matrix.precision_recall_f1("1");
        let _ = writeln!(
            out,
            "Confusion matrix (class 1): precision {:.4}, recall {:.4}, F1 {:.4}",
            precision, recall, f1
        );
    }

    out
}
