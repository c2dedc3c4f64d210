//! # sail-sim
//!
//! Dataset generation and trim-controller fitting around the `sail-model`
//! speed oracle. The `sail-sim` binary is a thin CLI over these modules.
//!
//! Flow:
//! 1. `generator` samples (wind, trim) rows and labels them with the model
//! 2. `dataset` writes / reads them as CSV, `manifest` records provenance
//! 3. `fit` learns a speed regressor (or a kNN trim lookup)
//! 4. `controllers` turns a regressor into a trim controller
//! 5. `pipeline` scores the controller against the model's known optimum

pub mod config;
pub mod controllers;
pub mod dataset;
pub mod error;
pub mod fit;
pub mod generator;
pub mod manifest;
pub mod pipeline;
pub mod report;
pub mod table;

pub use error::{Result, SimError};
