//! generator.rs — Synthetic training rows labelled by the speed model
//!
//! Each row draws wind and trim uniformly over the model domain and labels it
//! with `resultant_speed`, optionally blurred with Gaussian noise. For the
//! planing model a share of rows is drawn near the optimal trim instead, since
//! a uniform draw almost never lands inside the narrow planing tolerance.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};
use tracing::{debug, info};

use sail_model::types::{MAX_SAIL_POS_DEG, MAX_WIND_DIR_DEG};
use sail_model::{BoatModel, ModelVariant, SailTrim, SpeedModel, WindCondition};

use crate::config::GeneratorConfig;
use crate::dataset::Sample;
use crate::error::{Result, SimError};

/// Noise below this standard deviation is treated as off
const NOISE_EPS: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub length: usize,
    pub seed: u64,
    pub noise: f64,
    pub max_wind_speed: f64,
    pub near_optimal_fraction: f64,
    pub near_optimal_offset_deg: f64,
}

impl From<&GeneratorConfig> for GeneratorSettings {
    fn from(cfg: &GeneratorConfig) -> Self {
        Self {
            length: cfg.length,
            seed: cfg.seed,
            noise: cfg.noise,
            max_wind_speed: cfg.max_wind_speed,
            near_optimal_fraction: cfg.near_optimal_fraction,
            near_optimal_offset_deg: cfg.near_optimal_offset_deg,
        }
    }
}

impl GeneratorSettings {
    fn validate(&self) -> Result<()> {
        if !(self.noise >= 0.0 && self.noise.is_finite()) {
            return Err(SimError::parameter("noise", format!("{} must be a finite value >= 0", self.noise)));
        }
        if !(self.max_wind_speed > 0.0 && self.max_wind_speed.is_finite()) {
            return Err(SimError::parameter("max_wind_speed", format!("{} must be > 0", self.max_wind_speed)));
        }
        if !(0.0..=1.0).contains(&self.near_optimal_fraction) {
            return Err(SimError::parameter(
                "near_optimal_fraction",
                format!("{} not in [0, 1]", self.near_optimal_fraction),
            ));
        }
        if !(self.near_optimal_offset_deg >= 0.0 && self.near_optimal_offset_deg <= MAX_SAIL_POS_DEG) {
            return Err(SimError::parameter(
                "near_optimal_offset_deg",
                format!("{} not in [0, 90]", self.near_optimal_offset_deg),
            ));
        }
        Ok(())
    }

    /// Rows drawn near the optimum; only the planing model reserves any
    pub fn near_optimal_rows(&self, variant: ModelVariant) -> usize {
        match variant {
            ModelVariant::Planing => (self.near_optimal_fraction * self.length as f64).round() as usize,
            ModelVariant::Base => 0,
        }
    }
}

pub struct Generation {
    pub rows: Vec<Sample>,
    pub near_optimal_rows: usize,
}

pub fn generate(model: &BoatModel, settings: &GeneratorSettings) -> Result<Generation> {
    settings.validate()?;

    let variant = model.variant();
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let noise = if settings.noise > NOISE_EPS {
        Some(Normal::new(0.0, settings.noise).map_err(|e| SimError::parameter("noise", e.to_string()))?)
    } else {
        None
    };
    let offset = settings.near_optimal_offset_deg;
    let offset_dist = Uniform::new_inclusive(-offset, offset);
    let near_optimal_rows = settings.near_optimal_rows(variant);

    info!(
        "🎲 Generating {} rows ({} model, seed {}, noise {}, {} near optimal)",
        settings.length,
        variant,
        settings.seed,
        noise.map_or("off".to_string(), |_| settings.noise.to_string()),
        near_optimal_rows
    );

    let mut rows = Vec::with_capacity(settings.length);
    for i in 0..settings.length {
        let wind_dir = rng.gen::<f64>() * MAX_WIND_DIR_DEG;
        let wind_speed = rng.gen::<f64>() * settings.max_wind_speed;
        let wind = WindCondition::new(wind_speed, wind_dir)?;

        let trim = if i < near_optimal_rows {
            let opt = model.peek_optimal(wind)?;
            SailTrim::new(
                (opt.main + offset_dist.sample(&mut rng)).clamp(0.0, MAX_SAIL_POS_DEG),
                (opt.jib + offset_dist.sample(&mut rng)).clamp(0.0, MAX_SAIL_POS_DEG),
            )
        } else {
            SailTrim::new(rng.gen::<f64>() * MAX_SAIL_POS_DEG, rng.gen::<f64>() * MAX_SAIL_POS_DEG)
        };

        let mut boat_speed = model.resultant_speed(wind, trim)?;
        if let Some(dist) = &noise {
            boat_speed += dist.sample(&mut rng);
        }

        rows.push(Sample::new(wind, trim, boat_speed));
    }

    debug!("generated {} rows", rows.len());
    Ok(Generation { rows, near_optimal_rows })
}
