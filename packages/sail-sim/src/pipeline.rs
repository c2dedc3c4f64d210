//! pipeline.rs — Split, fit, build the controller and score it

use chrono::Utc;
use tracing::info;

use sail_model::{coarse_error_v_opt, BoatModel, Controller};

use crate::config::FullConfig;
use crate::controllers::GridSearchController;
use crate::dataset::{train_validation_split, Sample};
use crate::error::Result;
use crate::fit::{self, ForestParams, KnnController, LinearRegression, RandomForest, Regressor};
use crate::report::{FitReport, RegressionStats, Strategy};

fn stats<R: Regressor + ?Sized>(model: &R, rows: &[Sample]) -> Option<RegressionStats> {
    if rows.is_empty() {
        return None;
    }
    Some(RegressionStats { rows: rows.len(), mse: fit::mse(model, rows), r2: fit::r2(model, rows) })
}

fn score<C: Controller>(
    strategy: Strategy,
    dataset: &str,
    model: &BoatModel,
    controller: &C,
    train: Option<RegressionStats>,
    validation: Option<RegressionStats>,
) -> Result<FitReport> {
    info!("🎯 Scoring {strategy} controller against the {} model optimum", model.variant());
    let score = coarse_error_v_opt(model, controller)?;
    Ok(FitReport {
        strategy,
        dataset: dataset.to_string(),
        variant: model.variant(),
        train,
        validation,
        score,
        created_at: Utc::now(),
    })
}

/// Fit `strategy` on `rows` and score the resulting controller on `model`
pub fn fit_and_score(
    strategy: Strategy,
    rows: &[Sample],
    dataset: &str,
    model: &BoatModel,
    cfg: &FullConfig,
) -> Result<FitReport> {
    let split = train_validation_split(rows, cfg.split.validation_fraction, cfg.split.seed)?;
    info!(
        "✂️  {} training rows, {} validation rows",
        split.train.len(),
        split.validation.len()
    );

    match strategy {
        Strategy::Linear => {
            let reg = LinearRegression::fit(&split.train, cfg.linear.degree, cfg.linear.ridge)?;
            let (train, validation) = (stats(&reg, &split.train), stats(&reg, &split.validation));
            let controller = GridSearchController::new(reg, cfg.linear.search_step_deg)?;
            score(strategy, dataset, model, &controller, train, validation)
        }
        Strategy::Forest => {
            let reg = RandomForest::fit(&split.train, &ForestParams::from(&cfg.forest))?;
            let (train, validation) = (stats(&reg, &split.train), stats(&reg, &split.validation));
            let controller = GridSearchController::new(reg, cfg.forest.search_step_deg)?;
            score(strategy, dataset, model, &controller, train, validation)
        }
        Strategy::Knn => {
            let controller = KnnController::fit(&split.train, &cfg.knn)?;
            score(strategy, dataset, model, &controller, None, None)
        }
    }
}
