//! Charts of the processed data and model results, written as SVG files

mod charts;
mod svg;

pub use charts::{
    class_distribution, feature_distribution, feature_importance, model_comparison, Histogram,
    HISTOGRAM_BINS,
};
pub use svg::{escape, Anchor, Color, SvgDocument};

use crate::error::{PipelineError, Result};
use crate::evaluation::ModelEvaluation;
use crate::preprocessing::{count_label, load_partition, numeric_values, DatasetSchema};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn feature_values(df: &DataFrame, feature: &str) -> Result<Vec<f64>> {
    let column = df
        .column(feature)
        .map_err(|_| PipelineError::FeatureNotFound(feature.to_string()))?;
    Ok(numeric_values(column.as_materialized_series())?
        .into_iter()
        .flatten()
        .collect())
}

/// Render every chart into `output_dir` and return the written paths.
///
/// Class and feature charts come from the train partition. A feature that
/// cannot be plotted is logged and skipped; the model comparison is only
/// drawn when `evaluation` holds results.
pub fn generate_all(
    train_path: &Path,
    output_dir: &Path,
    evaluation: &ModelEvaluation,
    schema: &DatasetSchema,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let df = load_partition(train_path)?;
    let mut written = Vec::new();

    let approved = count_label(&df, &schema.target, "1")?;
    let path = output_dir.join("class_distribution.svg");
    class_distribution(approved, df.height() - approved).save(&path)?;
    written.push(path);

    for feature in &schema.continuous {
        let path = output_dir.join(format!("{}_distribution.svg", feature));
        let chart = feature_values(&df, feature).and_then(|v| feature_distribution(feature, &v));
        match chart {
            Ok(doc) => {
                doc.save(&path)?;
                written.push(path);
            }
            Err(e) => warn!(feature = %feature, error = %e, "Skipping feature distribution"),
        }
    }

    if !evaluation.is_empty() {
        let path = output_dir.join("model_comparison.svg");
        model_comparison(evaluation).save(&path)?;
        written.push(path);
    }

    let path = output_dir.join("feature_importance.svg");
    feature_importance(&ModelEvaluation::feature_importance()).save(&path)?;
    written.push(path);

    info!(dir = %output_dir.display(), charts = written.len(), "Generated visualizations");
    Ok(written)
}
