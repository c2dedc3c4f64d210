//! manifest.rs — Sidecar describing a generated dataset
//!
//! Written next to the CSV as `<file>.manifest.json`. Records how the data
//! was produced and a SHA-256 of the file, so a fit can tell whether it is
//! reading the dataset it thinks it is reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use sail_model::ModelVariant;

use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub file: String,
    pub rows: usize,
    pub seed: u64,
    pub noise: f64,
    pub variant: ModelVariant,
    /// Rows sampled close to the optimal trim (planing datasets)
    pub near_optimal_rows: usize,
    /// SHA-256 of the CSV bytes, hex
    pub sha256: String,
    pub generated_at: DateTime<Utc>,
    pub generator_version: String,
}

impl DatasetManifest {
    pub fn path_for(csv_path: &str) -> String {
        format!("{csv_path}.manifest.json")
    }

    pub fn write(&self) -> Result<String> {
        let path = Self::path_for(&self.file);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json).map_err(|e| SimError::io(&path, e))?;
        info!("🧾 Manifest written to {path}");
        Ok(path)
    }

    pub fn read(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Recompute the digest of `csv_path` and compare with the recorded one
    pub fn verify(&self, csv_path: &str) -> Result<bool> {
        let bytes = std::fs::read(csv_path).map_err(|e| SimError::io(csv_path, e))?;
        let digest = hex::encode(Sha256::digest(&bytes));
        Ok(digest == self.sha256)
    }
}

/// Check a dataset against its manifest, if it has one. Never fails the run:
/// a missing or mismatching manifest is only reported.
pub fn check_dataset(csv_path: &str) -> Option<DatasetManifest> {
    let manifest_path = DatasetManifest::path_for(csv_path);
    if !std::path::Path::new(&manifest_path).exists() {
        info!("No manifest for {csv_path}");
        return None;
    }

    let manifest = match DatasetManifest::read(&manifest_path) {
        Ok(m) => m,
        Err(e) => {
            warn!("Failed to read {manifest_path}: {e}");
            return None;
        }
    };

    match manifest.verify(csv_path) {
        Ok(true) => info!(
            "✅ {csv_path} matches manifest ({} rows, {} model, seed {}, noise {})",
            manifest.rows, manifest.variant, manifest.seed, manifest.noise
        ),
        Ok(false) => warn!("⚠️ {csv_path} does not match its manifest digest, file changed since generation"),
        Err(e) => warn!("Failed to verify {csv_path}: {e}"),
    }
    Some(manifest)
}
