//! report.rs — JSON summary of a fit run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use sail_model::{ErrorSummary, ModelVariant};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Linear,
    Knn,
    Forest,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Linear => write!(f, "linear"),
            Strategy::Knn => write!(f, "knn"),
            Strategy::Forest => write!(f, "forest"),
        }
    }
}

/// Prediction quality on one row set. Only regressors have one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionStats {
    pub rows: usize,
    pub mse: f64,
    pub r2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub strategy: Strategy,
    pub dataset: String,
    pub variant: ModelVariant,
    pub train: Option<RegressionStats>,
    pub validation: Option<RegressionStats>,
    /// Controller error against the optimum on the standard grid
    pub score: ErrorSummary,
    pub created_at: DateTime<Utc>,
}

impl FitReport {
    pub fn log(&self) {
        if let (Some(train), Some(val)) = (&self.train, &self.validation) {
            info!(
                "📊 {} fit: train MSE {:.4} (R² {}), validation MSE {:.4} (R² {})",
                self.strategy,
                train.mse,
                fmt_r2(train.r2),
                val.mse,
                fmt_r2(val.r2)
            );
        }
        info!(
            "🏁 {} controller vs optimal ({} model, {} points): MSE {:.4}, mean abs error {:.4}",
            self.strategy, self.variant, self.score.samples, self.score.mse, self.score.mean_abs_error
        );
    }

    pub fn write(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| SimError::io(path, e))?;
        info!("🧾 Report written to {path}");
        Ok(())
    }
}

fn fmt_r2(r2: Option<f64>) -> String {
    r2.map_or("n/a".to_string(), |v| format!("{v:.4}"))
}
