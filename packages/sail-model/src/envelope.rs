//! envelope.rs — Speed envelope from wind alone
//!
//! Caps the achievable speed for a wind condition, independent of trim.
//! Two factors multiply:
//! - wind speed: full wind speed in light air, a shrinking fraction as it blows
//! - wind angle: nothing inside the pinching window, fastest on a beam reach

use crate::constants::ModelConstants;
use crate::error::DomainError;
use crate::interp::lerp;
use crate::types::{WindCondition, MAX_WIND_DIR_DEG};

pub const BEAM_REACH_DEG: f64 = 90.0;

/// Boat speed reachable from the wind speed alone (kt)
pub fn speed_factor(c: &ModelConstants, wind_speed: f64) -> Result<f64, DomainError> {
    if wind_speed < c.light_air_knots {
        Ok(wind_speed)
    } else if wind_speed > c.heavy_air_knots {
        Ok(c.windy_speed_factor * wind_speed)
    } else {
        let fraction = lerp(wind_speed, c.light_air_knots, c.heavy_air_knots, 1.0, c.windy_speed_factor)?;
        Ok(wind_speed * fraction)
    }
}

/// Share of the speed factor available at a given wind angle
pub fn direction_factor(c: &ModelConstants, wind_dir: f64) -> Result<f64, DomainError> {
    let no_go = c.pointing_angle - c.pinch_margin;

    if wind_dir < no_go {
        Ok(0.0)
    } else if wind_dir < c.pointing_angle {
        // pinching
        lerp(wind_dir, no_go, c.pointing_angle, 0.0, c.beating_factor)
    } else if wind_dir < BEAM_REACH_DEG {
        lerp(wind_dir, c.pointing_angle, BEAM_REACH_DEG, c.beating_factor, 1.0)
    } else {
        lerp(wind_dir, BEAM_REACH_DEG, MAX_WIND_DIR_DEG, 1.0, c.running_factor)
    }
}

pub fn max_speed(c: &ModelConstants, wind: WindCondition) -> Result<f64, DomainError> {
    Ok(speed_factor(c, wind.wind_speed())? * direction_factor(c, wind.wind_dir())?)
}
