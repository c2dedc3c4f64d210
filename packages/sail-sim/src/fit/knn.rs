//! knn.rs — Nearest-neighbour trim controller
//!
//! Looks up the `k` training rows closest in (wind speed, wind direction)
//! and returns their weighted average trim. Faster rows dominate:
//!   w = 10^boat_speed / (d + 1)
//! so the average leans towards trims that actually went fast, instead of
//! towards whatever random trims happened to be sampled nearby.

use tracing::{debug, info};

use sail_model::{Controller, DomainError, SailTrim, WindCondition};

use crate::config::KnnConfig;
use crate::dataset::Sample;
use crate::error::{Result, SimError};

#[derive(Debug, Clone)]
pub struct KnnController {
    rows: Vec<Sample>,
    neighbors: usize,
    speed_scale: f64,
    dir_scale: f64,
}

impl KnnController {
    pub fn fit(rows: &[Sample], cfg: &KnnConfig) -> Result<Self> {
        if rows.is_empty() {
            return Err(SimError::Fit("no training rows".to_string()));
        }
        if cfg.neighbors == 0 {
            return Err(SimError::parameter("neighbors", "must be at least 1"));
        }
        for (name, scale) in [("speed_scale", cfg.speed_scale), ("dir_scale", cfg.dir_scale)] {
            if !(scale > 0.0 && scale.is_finite()) {
                return Err(SimError::parameter(name, format!("{scale} must be > 0")));
            }
        }

        let neighbors = cfg.neighbors.min(rows.len());
        info!("🧭 kNN controller over {} rows, {} neighbours", rows.len(), neighbors);

        Ok(Self {
            rows: rows.to_vec(),
            neighbors,
            speed_scale: cfg.speed_scale,
            dir_scale: cfg.dir_scale,
        })
    }

    pub fn neighbors(&self) -> usize {
        self.neighbors
    }

    /// Distance in wind space; by default 2° of direction weigh as much as 10 kt
    fn distance(&self, wind: &WindCondition, row: &Sample) -> f64 {
        let ds = wind.wind_speed() - row.wind_speed;
        let dd = wind.wind_dir() - row.wind_dir;
        (ds * ds / self.speed_scale + dd * dd / self.dir_scale).sqrt()
    }
}

impl Controller for KnnController {
    fn trim(&self, wind: WindCondition) -> std::result::Result<SailTrim, DomainError> {
        let mut near: Vec<(f64, &Sample)> = self.rows.iter().map(|r| (self.distance(&wind, r), r)).collect();
        let k = self.neighbors;
        if k < near.len() {
            near.select_nth_unstable_by(k - 1, |a, b| a.0.total_cmp(&b.0));
            near.truncate(k);
        }

        // 10^(bs - max) keeps the weights finite; the ratio is unchanged
        let top = near.iter().map(|(_, r)| r.boat_speed).fold(f64::NEG_INFINITY, f64::max);
        let (mut main, mut jib, mut total) = (0.0, 0.0, 0.0);
        for (d, row) in &near {
            let w = 10f64.powf(row.boat_speed - top) / (d + 1.0);
            main += w * row.main;
            jib += w * row.jib;
            total += w;
        }

        debug!(
            wind_speed = wind.wind_speed(),
            wind_dir = wind.wind_dir(),
            max_dist = near.iter().map(|(d, _)| *d).fold(0.0, f64::max),
            "knn lookup"
        );
        Ok(SailTrim::new(main / total, jib / total))
    }
}
