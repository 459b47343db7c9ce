//! Credit approval CLI module
//!
//! Runs the pipeline phases selected by flags, in order: preprocess, train,
//! evaluate, visualize. With no phase flag every phase runs.

use anyhow::Context;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::evaluation::{render_table, ModelEvaluation};
use crate::preprocessing::{preprocess_file, DatasetSchema};
use crate::training::TrainEngine;
use crate::visualization::generate_all;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn kv(key: &str, val: &str) {
    println!("  {:<16} {}", muted(key), val.white());
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "credit-approval")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Credit card approval prediction pipeline")]
#[command(long_about = None)]
pub struct Cli {
    /// Run data preprocessing
    #[arg(long)]
    pub preprocess: bool,

    /// Run model training
    #[arg(long)]
    pub train: bool,

    /// Run model evaluation
    #[arg(long)]
    pub evaluate: bool,

    /// Generate visualizations
    #[arg(long)]
    pub visualize: bool,

    /// JSON pipeline configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project root holding the data/ directory
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Fraction of rows assigned to the test partition
    #[arg(long)]
    pub test_size: Option<f64>,

    /// Seed for the training RNG
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Phases selected for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phases {
    pub preprocess: bool,
    pub train: bool,
    pub evaluate: bool,
    pub visualize: bool,
}

impl Cli {
    pub fn phases(&self) -> Phases {
        let none = !(self.preprocess || self.train || self.evaluate || self.visualize);
        Phases {
            preprocess: none || self.preprocess,
            train: none || self.train,
            evaluate: none || self.evaluate,
            visualize: none || self.visualize,
        }
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn pipeline_config(&self) -> crate::error::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(root) = &self.root {
            config = config.with_root(root.clone());
        }
        if let Some(test_size) = self.test_size {
            config = config.with_test_size(test_size);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_preprocess(config: &PipelineConfig) -> anyhow::Result<()> {
    section("Preprocess");

    let input = config.raw_data_path();
    step_run(&format!("Processing {}", input.display()));
    let summary = preprocess_file(
        &input,
        &config.train_path(),
        &config.test_path(),
        &config.preprocessing,
    )
    .with_context(|| format!("preprocessing {} failed", input.display()))?;
    step_done(&format!("{:.3}s", summary.elapsed_secs));

    kv("Input rows", &summary.input_rows.to_string());
    kv("Columns", &summary.output_columns.to_string());
    kv(
        "Train",
        &format!("{} rows ({} approved)", summary.train_rows, summary.train_approved),
    );
    kv(
        "Test",
        &format!("{} rows ({} approved)", summary.test_rows, summary.test_approved),
    );
    Ok(())
}

pub fn cmd_train(config: &PipelineConfig) -> anyhow::Result<ModelEvaluation> {
    section("Train");

    step_run(&format!("Training {} models", config.training.models.len()));
    let start = Instant::now();
    let mut engine = TrainEngine::new(config.training.clone());
    let evaluation = engine
        .train_all(&config.train_path(), &config.test_path())
        .context("training failed")?;
    step_done(&format!("{:?}", start.elapsed()));

    for result in evaluation.results() {
        println!(
            "  {} {:<20} {}",
            ok("✓"),
            result.model_name,
            dim(&format!("f1 {:.4}", result.f1_score))
        );
    }

    evaluation.save_json(&config.results_path())?;
    Ok(evaluation)
}

pub fn cmd_evaluate(config: &PipelineConfig, evaluation: &ModelEvaluation) -> anyhow::Result<()> {
    section("Evaluate");

    for line in render_table(evaluation).lines() {
        println!("  {}", line);
    }

    step_run("Saving metrics");
    let path = config.evaluation_path();
    evaluation.save_results_csv(&path, config.report_float_precision)?;
    step_done(&path.display().to_string());

    step_run("Saving confusion matrices");
    let written = evaluation.save_confusion_matrices(&config.confusion_matrix_dir())?;
    step_done(&format!("{} files", written.len()));

    println!();
    println!("  {}", muted("Feature importance"));
    for (feature, score) in ModelEvaluation::feature_importance() {
        println!("  {:<6} {:.4}", feature, score);
    }
    Ok(())
}

pub fn cmd_visualize(config: &PipelineConfig, evaluation: &ModelEvaluation) -> anyhow::Result<()> {
    section("Visualize");

    step_run("Rendering charts");
    let written = generate_all(
        &config.train_path(),
        &config.visualization_dir(),
        evaluation,
        &DatasetSchema::credit(),
    )
    .context("visualization failed")?;
    step_done(&format!("{} charts → {}", written.len(), config.visualization_dir().display()));
    Ok(())
}

/// Results from this run, or the ones persisted by an earlier `--train`
fn saved_results(config: &PipelineConfig) -> anyhow::Result<ModelEvaluation> {
    let path = config.results_path();
    ModelEvaluation::load_json(&path)
        .with_context(|| format!("no model results at {}; run --train first", path.display()))
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.pipeline_config()?;
    let phases = cli.phases();
    tracing::debug!(?phases, root = %config.root.display(), "Starting pipeline");

    let mut evaluation: Option<ModelEvaluation> = None;

    if phases.preprocess {
        cmd_preprocess(&config)?;
    }

    if phases.train {
        evaluation = Some(cmd_train(&config)?);
    }

    if phases.evaluate {
        let results = match evaluation.take() {
            Some(results) => results,
            None => saved_results(&config)?,
        };
        cmd_evaluate(&config, &results)?;
        evaluation = Some(results);
    }

    if phases.visualize {
        let results = match evaluation {
            Some(results) => results,
            None if config.results_path().exists() => saved_results(&config)?,
            None => {
                tracing::warn!("No model results found, skipping model comparison");
                ModelEvaluation::new()
            }
        };
        cmd_visualize(&config, &results)?;
    }

    println!();
    println!("  {}", ok("Pipeline completed successfully"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_runs_all_phases() {
        let cli = Cli::try_parse_from(["credit-approval"]).unwrap();
        let phases = cli.phases();
        assert!(phases.preprocess && phases.train && phases.evaluate && phases.visualize);
    }

    #[test]
    fn test_selected_phases_only() {
        let cli = Cli::try_parse_from(["credit-approval", "--train", "--evaluate"]).unwrap();
        assert_eq!(
            cli.phases(),
            Phases {
                preprocess: false,
                train: true,
                evaluate: true,
                visualize: false,
            }
        );
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from([
            "credit-approval",
            "--root",
            "/data/credit",
            "--test-size",
            "0.3",
            "--seed",
            "9",
        ])
        .unwrap();
        let config = cli.pipeline_config().unwrap();
        assert_eq!(config.root, PathBuf::from("/data/credit"));
        assert_eq!(config.preprocessing.test_size, 0.3);
        assert_eq!(config.training.seed, Some(9));
    }

    #[test]
    fn test_invalid_test_size_rejected() {
        let cli = Cli::try_parse_from(["credit-approval", "--test-size", "1.5"]).unwrap();
        assert!(cli.pipeline_config().is_err());
    }

    #[test]
    fn test_evaluate_alone_needs_results() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "credit-approval",
            "--evaluate",
            "--root",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("run --train first"));
    }
}
