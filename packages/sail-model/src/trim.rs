//! trim.rs — Optimal trim curve and trim quality
//!
//! The optimal curve is the hidden answer the fitted controllers try to
//! recover: sails sheeted in while pinching, then eased linearly from the
//! pointing angle (main at 0°, jib at `jib_offset`) to 90° dead downwind.

use crate::constants::ModelConstants;
use crate::error::DomainError;
use crate::interp::lerp;
use crate::types::{Sail, WindCondition, MAX_SAIL_POS_DEG, MAX_WIND_DIR_DEG};

/// Fully sheeted position of a sail
fn sheeted_in(c: &ModelConstants, sail: Sail) -> f64 {
    match sail {
        Sail::Main => 0.0,
        Sail::Jib => c.jib_offset,
    }
}

/// Wind-direction-only optimal position (deg)
pub fn base_opt_pos(c: &ModelConstants, wind_dir: f64, sail: Sail) -> Result<f64, DomainError> {
    let start = sheeted_in(c, sail);
    if wind_dir < c.pointing_angle {
        return Ok(start);
    }
    lerp(wind_dir, c.pointing_angle, MAX_WIND_DIR_DEG, start, MAX_SAIL_POS_DEG)
}

/// Drive factor in [0, 1] for a sail at `pos` when its optimum is `opt`.
///
/// A sail eased past the wind angle is backed and gives nothing. Otherwise
/// drive drops linearly with the trim error and floors at `mistrim_factor`.
pub fn trim_quality(
    c: &ModelConstants,
    pos: f64,
    opt: f64,
    wind: WindCondition,
    sail: Sail,
) -> Result<f64, DomainError> {
    check_sail_pos(pos, sail)?;

    if pos > wind.wind_dir() {
        return Ok(0.0);
    }

    let diff = (pos - opt).abs();
    if diff > c.trim_tolerance {
        Ok(c.mistrim_factor)
    } else {
        lerp(diff, 0.0, c.trim_tolerance, 1.0, c.mistrim_factor)
    }
}

pub fn check_sail_pos(pos: f64, sail: Sail) -> Result<(), DomainError> {
    if (0.0..=MAX_SAIL_POS_DEG).contains(&pos) {
        Ok(())
    } else {
        Err(DomainError::out_of_range(sail.name(), pos, 0.0, MAX_SAIL_POS_DEG))
    }
}
