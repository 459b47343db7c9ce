//! Chart builders

use super::svg::{Anchor, Color, SvgDocument};
use crate::error::{PipelineError, Result};
use crate::evaluation::ModelEvaluation;
use std::f64::consts::PI;

/// Number of histogram bins for feature distributions
pub const HISTOGRAM_BINS: usize = 10;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;

/// Equal-width bin counts over `[min, min + bins * bin_width]`
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values`; the maximum lands in the last bin. A constant input gets
    /// unit-width bins.
    pub fn compute(values: &[f64], bins: usize) -> Result<Self> {
        if values.is_empty() || bins == 0 {
            return Err(PipelineError::VisualizationError(
                "no numeric values to bin".to_string(),
            ));
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let mut bin_width = (max - min) / bins as f64;
        if bin_width == 0.0 {
            bin_width = 1.0;
        }

        let mut counts = vec![0; bins];
        for &v in values {
            let index = (((v - min) / bin_width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        Ok(Self { min, bin_width, counts })
    }

    /// `lower-upper` label of bin `i`, two decimals
    pub fn label(&self, i: usize) -> String {
        let lower = self.min + i as f64 * self.bin_width;
        format!("{:.2}-{:.2}", lower, lower + self.bin_width)
    }
}

/// One bar of a bar chart
#[derive(Debug, Clone)]
struct Bar {
    label: String,
    value: f64,
    color: Color,
}

/// Draw axes, ticks and bars. `gap` is the fraction of each slot left empty.
fn bar_chart(
    title: &str,
    y_label: &str,
    bars: &[Bar],
    width: u32,
    height: u32,
    y_max: Option<f64>,
    gap: f64,
) -> SvgDocument {
    let mut doc = SvgDocument::new(width, height);
    doc.title(title);

    let plot_w = doc.width() - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = doc.height() - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    let largest = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let y_max = y_max.unwrap_or(if largest > 0.0 { largest * 1.1 } else { 1.0 });

    doc.line(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, baseline, Color::GREY);
    doc.line(MARGIN_LEFT, baseline, MARGIN_LEFT + plot_w, baseline, Color::GREY);
    for tick in 0..=5 {
        let value = y_max * tick as f64 / 5.0;
        let y = baseline - plot_h * tick as f64 / 5.0;
        doc.line(MARGIN_LEFT - 4.0, y, MARGIN_LEFT, y, Color::GREY);
        doc.text(MARGIN_LEFT - 6.0, y + 4.0, &format!("{:.2}", value), 10, Anchor::End);
    }
    doc.vertical_text(18.0, MARGIN_TOP + plot_h / 2.0, y_label, 12);

    if bars.is_empty() {
        return doc;
    }

    let slot = plot_w / bars.len() as f64;
    let bar_w = slot * (1.0 - gap);
    for (i, bar) in bars.iter().enumerate() {
        let h = plot_h * (bar.value / y_max).clamp(0.0, 1.0);
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_w) / 2.0;
        doc.rect(x, baseline - h, bar_w, h, bar.color);
        if !bar.label.is_empty() {
            doc.text(x + bar_w / 2.0, baseline + 16.0, &bar.label, 9, Anchor::Middle);
        }
    }

    doc
}

/// Pie of approved vs rejected applications
pub fn class_distribution(approved: usize, rejected: usize) -> SvgDocument {
    let mut doc = SvgDocument::new(512, 512);
    doc.title("Credit Card Approval Distribution");

    let (cx, cy, r) = (256.0, 266.0, 180.0);
    let total = (approved + rejected) as f64;
    let slices = [("Approved", approved, Color::GREEN), ("Rejected", rejected, Color::RED)];

    let mut start = -PI / 2.0;
    for (label, count, color) in slices {
        if count == 0 {
            continue;
        }
        let fraction = count as f64 / total;
        if count as f64 == total {
            doc.circle(cx, cy, r, color);
        } else {
            let end = start + fraction * 2.0 * PI;
            let large_arc = if fraction > 0.5 { 1 } else { 0 };
            let d = format!(
                "M {:.2} {:.2} L {:.2} {:.2} A {r:.2} {r:.2} 0 {} 1 {:.2} {:.2} Z",
                cx,
                cy,
                cx + r * start.cos(),
                cy + r * start.sin(),
                large_arc,
                cx + r * end.cos(),
                cy + r * end.sin(),
            );
            doc.path(&d, color);
            start = end;
        }

        let mid = start - fraction * PI;
        let (lx, ly) = if count as f64 == total {
            (cx, cy)
        } else {
            (cx + r * 0.6 * mid.cos(), cy + r * 0.6 * mid.sin())
        };
        doc.text(
            lx,
            ly,
            &format!("{} {} ({:.1}%)", label, count, fraction * 100.0),
            13,
            Anchor::Middle,
        );
    }

    doc
}

/// 10-bin histogram of one continuous feature
pub fn feature_distribution(feature: &str, values: &[f64]) -> Result<SvgDocument> {
    let histogram = Histogram::compute(values, HISTOGRAM_BINS).map_err(|_| {
        PipelineError::VisualizationError(format!(
            "no valid numeric values found for feature {}",
            feature
        ))
    })?;

    let bars: Vec<Bar> = histogram
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| Bar {
            label: histogram.label(i),
            value: count as f64,
            color: Color::BLUE,
        })
        .collect();

    Ok(bar_chart(
        &format!("Distribution of {}", feature),
        "Frequency",
        &bars,
        600,
        400,
        None,
        0.0,
    ))
}

/// Accuracy, precision, recall and F1 side by side for every model
pub fn model_comparison(evaluation: &ModelEvaluation) -> SvgDocument {
    let series = [
        ("Accuracy", Color::BLUE),
        ("Precision", Color::GREEN),
        ("Recall", Color::RED),
        ("F1 Score", Color::PURPLE),
    ];

    let mut bars = Vec::with_capacity(evaluation.len() * series.len());
    for result in evaluation.results() {
        let values = [result.accuracy, result.precision, result.recall, result.f1_score];
        for (i, ((_, color), value)) in series.iter().zip(values).enumerate() {
            bars.push(Bar {
                // group label under the second bar of each group
                label: if i == 1 { result.model_name.clone() } else { String::new() },
                value,
                color: *color,
            });
        }
    }

    let mut doc = bar_chart(
        "Model Performance Comparison",
        "Score",
        &bars,
        800,
        500,
        Some(1.0),
        0.15,
    );

    let legend_y = doc.height() - 20.0;
    for (i, (name, color)) in series.iter().enumerate() {
        let x = MARGIN_LEFT + i as f64 * 120.0;
        doc.rect(x, legend_y - 10.0, 12.0, 12.0, *color);
        doc.text(x + 18.0, legend_y, name, 11, Anchor::Start);
    }

    doc
}

/// Horizontal-order bar chart of the ten highest scores
pub fn feature_importance(scores: &[(String, f64)]) -> SvgDocument {
    let mut sorted: Vec<&(String, f64)> = scores.iter().collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
    sorted.truncate(10);

    let bars: Vec<Bar> = sorted
        .into_iter()
        .map(|(name, score)| Bar {
            label: name.clone(),
            value: *score,
            color: Color::BLUE,
        })
        .collect();

    bar_chart("Feature Importance", "Importance Score", &bars, 800, 500, None, 0.3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::{ConfusionMatrix, ModelResult, ModelType};

    #[test]
    fn test_histogram_bins() {
        let values: Vec<f64> = (0..=10).map(|v| v as f64).collect();
        let hist = Histogram::compute(&values, 10).unwrap();
        assert_eq!(hist.bin_width, 1.0);
        assert_eq!(hist.counts.len(), 10);
        assert_eq!(hist.counts.iter().sum::<usize>(), 11);
        // maximum folds into the last bin
        assert_eq!(hist.counts[9], 2);
        assert_eq!(hist.label(0), "0.00-1.00");
    }

    #[test]
    fn test_histogram_constant_values() {
        let hist = Histogram::compute(&[3.0, 3.0, 3.0], 10).unwrap();
        assert_eq!(hist.bin_width, 1.0);
        assert_eq!(hist.counts[0], 3);
    }

    #[test]
    fn test_histogram_empty_is_error() {
        assert!(matches!(
            Histogram::compute(&[], 10),
            Err(PipelineError::VisualizationError(_))
        ));
    }

    #[test]
    fn test_class_distribution_slices() {
        let svg = class_distribution(3, 1).render();
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("Approved 3 (75.0%)"));
        assert!(svg.contains("Rejected 1 (25.0%)"));

        let single = class_distribution(0, 5).render();
        assert!(single.contains("<circle"));
        assert!(!single.contains("Approved"));
    }

    #[test]
    fn test_feature_distribution_has_ten_bars() {
        let svg = feature_distribution("A2", &[1.0, 2.0, 3.0, 4.0]).unwrap().render();
        assert!(svg.contains("Distribution of A2"));
        // background + 10 bars
        assert_eq!(svg.matches("<rect").count(), 11);
        assert!(feature_distribution("A2", &[]).is_err());
    }

    #[test]
    fn test_model_comparison_bars() {
        let eval = ModelEvaluation::from_results(ModelType::all().into_iter().map(|m| ModelResult {
            model_name: m.name().to_string(),
            model_type: m,
            accuracy: 0.8,
            precision: 0.8,
            recall: 0.8,
            f1_score: 0.8,
            confusion_matrix: ConfusionMatrix::mock(),
            trained_at: chrono::Utc::now(),
        }));
        let svg = model_comparison(&eval).render();
        // background + 16 bars + 4 legend swatches
        assert_eq!(svg.matches("<rect").count(), 21);
        assert!(svg.contains(">Gradient Boosting</text>"));
    }

    #[test]
    fn test_feature_importance_top_ten() {
        let mut scores: Vec<(String, f64)> =
            (0..12).map(|i| (format!("F{}", i), i as f64 / 100.0)).collect();
        scores.reverse();
        let svg = feature_importance(&scores).render();
        assert_eq!(svg.matches("<rect").count(), 11);
        assert!(svg.contains(">F11</text>"));
        assert!(!svg.contains(">F1</text>"));
    }
}
