//! interp.rs — Bounded linear interpolation
//!
//! The single primitive every curve of the model is built from. Unlike a free
//! lerp it refuses to extrapolate: asking for a value outside the source
//! interval is a `DomainError`.

use tracing::warn;

use crate::error::DomainError;

/// Linearly map `val` from `[cur_min, cur_max]` onto `[out_min, out_max]`.
///
/// A flat output range (`out_min == out_max`) is allowed and returns `out_min`.
pub fn lerp(
    val: f64,
    cur_min: f64,
    cur_max: f64,
    out_min: f64,
    out_max: f64,
) -> Result<f64, DomainError> {
    if !(cur_min < cur_max) {
        return Err(DomainError::EmptyInterval { min: cur_min, max: cur_max });
    }
    if !(cur_min..=cur_max).contains(&val) {
        return Err(DomainError::OutsideInterval { value: val, min: cur_min, max: cur_max });
    }
    if out_min == out_max {
        warn!("lerp: flat output range ({out_min}), value is constant");
        return Ok(out_min);
    }

    let fraction = (val - cur_min) / (cur_max - cur_min);
    Ok(out_min + fraction * (out_max - out_min))
}
