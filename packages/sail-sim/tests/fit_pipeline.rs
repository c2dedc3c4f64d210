//! End-to-end: generate → CSV → read back → fit → score against the optimum

use sail_model::{score_on_grid, BoatModel, FixedTrim, ModelVariant, SailTrim, ScoringGrid};
use sail_sim::config::FullConfig;
use sail_sim::dataset::{read_csv, write_csv, Sample};
use sail_sim::generator::{generate, GeneratorSettings};
use sail_sim::manifest::{check_dataset, DatasetManifest};
use sail_sim::pipeline::fit_and_score;
use sail_sim::report::Strategy;

fn temp_path(name: &str) -> String {
    let mut p = std::env::temp_dir();
    p.push(format!("sail_sim_it_{}_{name}", std::process::id()));
    p.to_string_lossy().into_owned()
}

fn settings(length: usize, seed: u64) -> GeneratorSettings {
    GeneratorSettings {
        length,
        seed,
        noise: 0.0,
        max_wind_speed: 18.0,
        near_optimal_fraction: 0.2,
        near_optimal_offset_deg: 3.0,
    }
}

fn dataset(model: &BoatModel, name: &str, length: usize) -> (String, Vec<Sample>) {
    let path = temp_path(name);
    let generation = generate(model, &settings(length, 11)).unwrap();
    write_csv(&path, &generation.rows).unwrap();
    let rows = read_csv(&path).unwrap();
    assert_eq!(rows, generation.rows);
    (path, rows)
}

fn small_config() -> FullConfig {
    let mut cfg = FullConfig::default();
    cfg.forest.n_trees = 10;
    cfg.forest.max_depth = 12;
    cfg.forest.search_step_deg = 10.0;
    cfg.knn.neighbors = 100;
    cfg
}

/// Both sails sheeted hard whatever the wind
fn sheeted_baseline(model: &BoatModel) -> f64 {
    score_on_grid(model, &FixedTrim(SailTrim::new(0.0, 5.0)), &ScoringGrid::default())
        .unwrap()
        .mse
}

#[test]
fn test_fitted_controllers_beat_sheeted_trim() {
    let model = BoatModel::reference(ModelVariant::Base);
    let (path, rows) = dataset(&model, "base.csv", 4000);
    let cfg = small_config();
    let baseline = sheeted_baseline(&model);

    for strategy in [Strategy::Forest, Strategy::Knn] {
        let report = fit_and_score(strategy, &rows, &path, &model, &cfg).unwrap();
        assert_eq!(report.score.samples, 17 * 130);
        assert!(
            report.score.mse < baseline,
            "{strategy}: {} not below baseline {baseline}",
            report.score.mse
        );
    }
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_linear_fit_reports_regression_stats() {
    let model = BoatModel::reference(ModelVariant::Base);
    let (path, rows) = dataset(&model, "linear.csv", 3000);
    let report = fit_and_score(Strategy::Linear, &rows, &path, &model, &small_config()).unwrap();

    let train = report.train.unwrap();
    let val = report.validation.unwrap();
    assert_eq!(train.rows + val.rows, 3000);
    assert_eq!(val.rows, 600);
    assert!(train.r2.unwrap() > 0.5, "train R² {:?}", train.r2);
    assert!(report.score.mse.is_finite());
    assert_eq!(report.variant, ModelVariant::Base);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_knn_report_has_no_regression_stats() {
    let model = BoatModel::reference(ModelVariant::Planing);
    let (path, rows) = dataset(&model, "planing.csv", 1500);
    let report = fit_and_score(Strategy::Knn, &rows, &path, &model, &small_config()).unwrap();
    assert!(report.train.is_none());
    assert!(report.validation.is_none());
    assert_eq!(report.variant, ModelVariant::Planing);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_manifest_tracks_generated_file() {
    let model = BoatModel::reference(ModelVariant::Planing);
    let path = temp_path("manifest.csv");
    let generation = generate(&model, &settings(500, 2)).unwrap();
    let sha256 = write_csv(&path, &generation.rows).unwrap();

    let manifest = DatasetManifest {
        file: path.clone(),
        rows: generation.rows.len(),
        seed: 2,
        noise: 0.0,
        variant: model.variant(),
        near_optimal_rows: generation.near_optimal_rows,
        sha256,
        generated_at: chrono::Utc::now(),
        generator_version: "test".to_string(),
    };
    let manifest_path = manifest.write().unwrap();

    let checked = check_dataset(&path).unwrap();
    assert_eq!(checked.near_optimal_rows, 100);
    assert!(checked.verify(&path).unwrap());

    std::fs::remove_file(&path).ok();
    std::fs::remove_file(&manifest_path).ok();
}
