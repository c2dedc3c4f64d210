//! scoring.rs — Controller error against the known optimum
//!
//! Walks a grid of wind conditions, asks the controller for a trim, and
//! compares the speed it achieves with the optimum. The default grid skips
//! light air and the pinching window, where every controller is equally bad.
//!
//! Grid points are independent. With the `parallel` feature they are
//! evaluated on the rayon pool; errors are collected in grid order and reduced
//! sequentially, so the result is identical with or without the feature.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::Controller;
use crate::error::DomainError;
use crate::model::SpeedModel;
use crate::types::WindCondition;

/// Integer wind speeds and directions to evaluate (inclusive ranges)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringGrid {
    pub min_speed: u32,
    pub max_speed: u32,
    pub min_dir: u32,
    pub max_dir: u32,
}

impl Default for ScoringGrid {
    fn default() -> Self {
        Self { min_speed: 1, max_speed: 17, min_dir: 50, max_dir: 179 }
    }
}

impl ScoringGrid {
    pub fn len(&self) -> usize {
        let span = |min: u32, max: u32| (max as usize + 1).saturating_sub(min as usize);
        span(self.min_speed, self.max_speed).saturating_mul(span(self.min_dir, self.max_dir))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wind conditions in speed-major order
    pub fn points(&self) -> Result<Vec<WindCondition>, DomainError> {
        let mut out = Vec::with_capacity(self.len());
        for speed in self.min_speed..=self.max_speed {
            for dir in self.min_dir..=self.max_dir {
                out.push(WindCondition::new(speed as f64, dir as f64)?);
            }
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub mse: f64,
    pub mean_abs_error: f64,
    pub samples: usize,
}

/// Score a controller on the standard grid (speeds 1..=17 kt, angles 50..=179°)
pub fn coarse_error_v_opt<M, C>(model: &M, controller: &C) -> Result<ErrorSummary, DomainError>
where
    M: SpeedModel + ?Sized,
    C: Controller + ?Sized,
{
    score_on_grid(model, controller, &ScoringGrid::default())
}

pub fn score_on_grid<M, C>(model: &M, controller: &C, grid: &ScoringGrid) -> Result<ErrorSummary, DomainError>
where
    M: SpeedModel + ?Sized,
    C: Controller + ?Sized,
{
    let points = grid.points()?;

    let point_error = |wind: &WindCondition| -> Result<f64, DomainError> {
        let trim = controller.trim(*wind)?;
        let achieved = model.resultant_speed(*wind, trim)?;
        let optimal = model.peek_optimal(*wind)?.speed;
        Ok(achieved - optimal)
    };

    #[cfg(feature = "parallel")]
    let errors: Vec<f64> = points.par_iter().map(point_error).collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let errors: Vec<f64> = points.iter().map(point_error).collect::<Result<_, _>>()?;

    let samples = errors.len();
    if samples == 0 {
        return Ok(ErrorSummary { mse: 0.0, mean_abs_error: 0.0, samples });
    }

    let n = samples as f64;
    let mse = errors.iter().map(|e| e * e).sum::<f64>() / n;
    let mean_abs_error = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    debug!(samples, mse, mean_abs_error, "scored controller");

    Ok(ErrorSummary { mse, mean_abs_error, samples })
}
