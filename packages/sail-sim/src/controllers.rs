//! controllers.rs — Trim controllers built on a fitted regressor
//!
//! `GridSearchController` asks the regressor for the predicted speed of every
//! (main, jib) pair on a regular grid and keeps the fastest.

use tracing::debug;

use sail_model::types::MAX_SAIL_POS_DEG;
use sail_model::{Controller, DomainError, SailTrim, WindCondition};

use crate::error::{Result, SimError};
use crate::fit::Regressor;

pub struct GridSearchController<R: Regressor> {
    regressor: R,
    candidates: Vec<f64>,
}

impl<R: Regressor> GridSearchController<R> {
    /// Candidates are `0, step, 2·step, …` up to 90°, 90° itself always included
    pub fn new(regressor: R, step_deg: f64) -> Result<Self> {
        if !(step_deg > 0.0 && step_deg <= MAX_SAIL_POS_DEG) {
            return Err(SimError::parameter("search_step_deg", format!("{step_deg} not in (0, 90]")));
        }

        let mut candidates = Vec::new();
        let mut i = 0u32;
        loop {
            let pos = i as f64 * step_deg;
            if pos >= MAX_SAIL_POS_DEG - 1e-9 {
                candidates.push(MAX_SAIL_POS_DEG);
                break;
            }
            candidates.push(pos);
            i += 1;
        }

        debug!("grid search over {}² trims", candidates.len());
        Ok(Self { regressor, candidates })
    }

    pub fn candidates(&self) -> &[f64] {
        &self.candidates
    }
}

impl<R: Regressor> Controller for GridSearchController<R> {
    fn trim(&self, wind: WindCondition) -> std::result::Result<SailTrim, DomainError> {
        let mut best = SailTrim::default();
        let mut best_speed = f64::NEG_INFINITY;
        for &main in &self.candidates {
            for &jib in &self.candidates {
                let speed = self.regressor.predict(&[wind.wind_speed(), wind.wind_dir(), main, jib]);
                if !speed.is_finite() {
                    return Err(DomainError::NotFinite { quantity: "predicted boat speed", value: speed });
                }
                // strict: the first maximum wins ties
                if speed > best_speed {
                    best_speed = speed;
                    best = SailTrim::new(main, jib);
                }
            }
        }
        Ok(best)
    }
}
