//! config.rs — config.toml sections
//!
//! The file named by `--config` is used when present, otherwise the copy
//! embedded at build time. Missing keys fall back to the defaults below.

use serde::Deserialize;
use tracing::info;

use sail_model::{BoatModel, ModelConstants, ModelVariant, PlaningConstants};

use crate::error::{Result, SimError};

const EMBEDDED_CONFIG: &str = include_str!("../config.toml");

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FullConfig {
    pub model: ModelConfig,
    pub generator: GeneratorConfig,
    pub split: SplitConfig,
    pub linear: LinearConfig,
    pub knn: KnnConfig,
    pub forest: ForestConfig,
    pub table: TableConfig,
}

impl FullConfig {
    /// Read `path`, or the embedded default if it does not exist
    pub fn load(path: &str) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => {
                info!("📄 Using config {path}");
                text
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("📄 {path} not found, using embedded config");
                EMBEDDED_CONFIG.to_string()
            }
            Err(e) => return Err(SimError::io(path, e)),
        };
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_toml(EMBEDDED_CONFIG)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub variant: ModelVariant,
    pub constants: ModelConstants,
    pub planing: PlaningConstants,
}

impl ModelConfig {
    /// Build the configured boat, optionally with a different variant
    pub fn build(&self, variant: Option<ModelVariant>) -> BoatModel {
        BoatModel::new(
            variant.unwrap_or(self.variant),
            self.constants.clone(),
            self.planing.clone(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub file: String,
    pub length: usize,
    pub seed: u64,
    pub noise: f64,
    pub max_wind_speed: f64,
    pub near_optimal_fraction: f64,
    pub near_optimal_offset_deg: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            file: "gen.csv".to_string(),
            length: 100_000,
            seed: 0,
            noise: 0.0,
            max_wind_speed: 18.0,
            near_optimal_fraction: 0.2,
            near_optimal_offset_deg: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub validation_fraction: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { validation_fraction: 0.2, seed: 0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinearConfig {
    pub degree: usize,
    pub ridge: f64,
    pub search_step_deg: f64,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self { degree: 4, ridge: 1e-9, search_step_deg: 2.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnnConfig {
    pub neighbors: usize,
    pub speed_scale: f64,
    pub dir_scale: f64,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self { neighbors: 300, speed_scale: 100.0, dir_scale: 4.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub max_features: usize,
    pub seed: u64,
    pub search_step_deg: f64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 30,
            max_depth: 18,
            min_samples_leaf: 3,
            max_features: 2,
            seed: 0,
            search_step_deg: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub speed_step: u32,
    pub dir_step: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { speed_step: 2, dir_step: 10 }
    }
}
