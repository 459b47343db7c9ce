//! Integration test: full pipeline (preprocess → train → evaluate → visualize)

use clap::Parser;
use credit_approval::cli::{run, Cli};
use credit_approval::config::PipelineConfig;
use credit_approval::evaluation::ModelEvaluation;
use credit_approval::training::{ModelType, TrainEngine, TrainingConfig};
use std::path::{Path, PathBuf};

fn setup_root() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("data").join("raw");
    std::fs::create_dir_all(&raw).unwrap();
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/crx_sample.data");
    std::fs::copy(fixture, raw.join("crx.data")).unwrap();
    dir
}

fn cli(root: &Path, flags: &[&str]) -> Cli {
    let mut args = vec!["credit-approval", "--root", root.to_str().unwrap(), "--seed", "7"];
    args.extend_from_slice(flags);
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_all_phases_write_outputs() {
    let root = setup_root();
    run(&cli(root.path(), &[])).unwrap();

    let config = PipelineConfig::new().with_root(root.path());
    assert!(config.train_path().exists());
    assert!(config.test_path().exists());
    assert!(config.results_path().exists());

    let metrics = std::fs::read_to_string(config.evaluation_path()).unwrap();
    let lines: Vec<&str> = metrics.lines().collect();
    assert_eq!(lines[0], "Model,Accuracy,Precision,Recall,F1 Score");
    assert_eq!(lines.len(), 5);
    for line in &lines[1..] {
        for cell in line.split(',').skip(1) {
            assert_eq!(cell.split('.').nth(1).map(str::len), Some(4), "{}", line);
        }
    }

    for model in ModelType::all() {
        let path = config
            .confusion_matrix_dir()
            .join(format!("{}_confusion_matrix.csv", model.name()));
        assert!(path.exists(), "{}", path.display());
    }

    let viz = config.visualization_dir();
    for name in [
        "class_distribution.svg",
        "A2_distribution.svg",
        "A3_distribution.svg",
        "A8_distribution.svg",
        "A11_distribution.svg",
        "A14_distribution.svg",
        "A15_distribution.svg",
        "model_comparison.svg",
        "feature_importance.svg",
    ] {
        assert!(viz.join(name).exists(), "{}", name);
    }
}

#[test]
fn test_phases_run_separately_share_results() {
    let root = setup_root();
    run(&cli(root.path(), &["--preprocess"])).unwrap();
    run(&cli(root.path(), &["--train"])).unwrap();

    let config = PipelineConfig::new().with_root(root.path());
    assert!(!config.evaluation_path().exists());
    let saved = ModelEvaluation::load_json(&config.results_path()).unwrap();
    assert_eq!(saved.len(), 4);

    run(&cli(root.path(), &["--evaluate", "--visualize"])).unwrap();
    assert!(config.evaluation_path().exists());
    assert!(config.visualization_dir().join("model_comparison.svg").exists());
}

#[test]
fn test_visualize_without_results_skips_comparison() {
    let root = setup_root();
    run(&cli(root.path(), &["--preprocess"])).unwrap();
    run(&cli(root.path(), &["--visualize"])).unwrap();

    let viz = PipelineConfig::new().with_root(root.path()).visualization_dir();
    assert!(viz.join("class_distribution.svg").exists());
    assert!(!viz.join("model_comparison.svg").exists());
}

#[test]
fn test_train_without_partitions_fails() {
    let root = setup_root();
    assert!(run(&cli(root.path(), &["--train"])).is_err());
}

#[test]
fn test_seeded_training_is_reproducible() {
    let root = setup_root();
    run(&cli(root.path(), &["--preprocess"])).unwrap();
    let config = PipelineConfig::new().with_root(root.path());

    let train = |seed| {
        TrainEngine::new(TrainingConfig::new().with_seed(seed))
            .train_all(&config.train_path(), &config.test_path())
            .unwrap()
    };
    let (a, b) = (train(11), train(11));
    for (ra, rb) in a.results().zip(b.results()) {
        assert_eq!(ra.model_name, rb.model_name);
        assert_eq!(ra.accuracy, rb.accuracy);
        assert_eq!(ra.f1_score, rb.f1_score);
    }
    assert_eq!(a.best_model().unwrap().model_name, b.best_model().unwrap().model_name);
}
