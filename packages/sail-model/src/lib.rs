//! # sail-model
//!
//! Heuristic sailboat speed oracle used to label synthetic training data and to
//! score trim controllers learned from it.
//!
//! Used by:
//! - `sail-sim generate`: labels randomly sampled (wind, trim) rows
//! - `sail-sim fit`: scores fitted controllers against the known optimum
//! - `sail-sim table`: prints the ground-truth optimal trim table
//!
//! ## Model
//!
//! `resultant_speed(wind, trim) = max_speed(wind) * sail_factor(trim) [+ planing_boost]`
//!
//! - `max_speed`: wind speed and wind angle envelope, independent of trim
//! - `sail_factor`: 65 % main, 35 % jib, each scored by its distance from `opt_pos`
//! - `planing_boost`: planing variant only, additive, needs near-perfect trim
//!
//! `peek_optimal` returns `opt_pos` for both sails and the speed there. The
//! optimum is known by construction; no search is done.
//!
//! ## Conventions
//! - Wind speed in knots, domain up to ~18 kt
//! - Relative wind angle in [0, 180] degrees, one tack only
//! - Sail positions in [0, 90] degrees eased from centerline
//! - Out-of-range input is a `DomainError`, never a degraded number

pub mod constants;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod interp;
pub mod model;
pub mod planing;
pub mod scoring;
pub mod trim;
pub mod types;

pub use constants::{ModelConstants, PlaningConstants};
pub use controller::{Controller, FixedTrim, OptimalController};
pub use error::DomainError;
pub use interp::lerp;
pub use model::{BaseModel, BoatModel, ModelVariant, SpeedModel};
pub use planing::PlaningModel;
pub use scoring::{coarse_error_v_opt, score_on_grid, ErrorSummary, ScoringGrid};
pub use types::{OptimalTrim, Sail, SailTrim, WindCondition};
