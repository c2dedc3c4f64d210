//! types.rs — Value types passed in and out of the speed model
//!
//! ## Conventions
//! - Wind speed in knots, true wind over the boat
//! - Wind direction is the relative wind angle in degrees, 0 = head to wind,
//!   180 = dead downwind. Only one tack is modelled; callers mirror for the other.
//! - Sail positions in degrees eased from the centerline, 0 = sheeted hard in

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const MAX_WIND_DIR_DEG: f64 = 180.0;
pub const MAX_SAIL_POS_DEG: f64 = 90.0;

// ── Wind ──────────────────────────────────────────────────────────────────────

/// Wind seen by the boat. Always valid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindCondition {
    wind_speed: f64,
    wind_dir: f64,
}

impl WindCondition {
    pub fn new(wind_speed: f64, wind_dir: f64) -> Result<Self, DomainError> {
        if !wind_speed.is_finite() || wind_speed < 0.0 {
            return Err(DomainError::out_of_range("wind speed", wind_speed, 0.0, f64::INFINITY));
        }
        if !(0.0..=MAX_WIND_DIR_DEG).contains(&wind_dir) {
            return Err(DomainError::out_of_range("wind direction", wind_dir, 0.0, MAX_WIND_DIR_DEG));
        }
        Ok(Self { wind_speed, wind_dir })
    }

    pub fn wind_speed(&self) -> f64 { self.wind_speed }
    pub fn wind_dir(&self) -> f64 { self.wind_dir }
}

// ── Sails ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sail {
    Main,
    Jib,
}

impl Sail {
    pub fn name(&self) -> &'static str {
        match self {
            Sail::Main => "main position",
            Sail::Jib => "jib position",
        }
    }
}

/// How far each sail is eased. Not range-checked here: a controller may
/// propose anything and the model rejects out-of-range positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SailTrim {
    pub main: f64,
    pub jib: f64,
}

impl SailTrim {
    pub fn new(main: f64, jib: f64) -> Self { Self { main, jib } }

    pub fn get(&self, sail: Sail) -> f64 {
        match sail {
            Sail::Main => self.main,
            Sail::Jib => self.jib,
        }
    }
}

// ── Optimum ───────────────────────────────────────────────────────────────────

/// Best trim for a wind condition and the speed it yields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalTrim {
    pub main: f64,
    pub jib: f64,
    pub speed: f64,
}

impl OptimalTrim {
    pub fn trim(&self) -> SailTrim {
        SailTrim::new(self.main, self.jib)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_condition_validation() {
        assert!(WindCondition::new(10.0, 90.0).is_ok());
        assert!(WindCondition::new(0.0, 0.0).is_ok());
        assert!(WindCondition::new(0.0, 180.0).is_ok());
        assert!(WindCondition::new(-1.0, 90.0).is_err());
        assert!(WindCondition::new(10.0, 180.5).is_err());
        assert!(WindCondition::new(10.0, -3.0).is_err());
        assert!(WindCondition::new(f64::NAN, 90.0).is_err());
        assert!(WindCondition::new(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_trim_accessors() {
        let t = SailTrim::new(12.0, 20.0);
        assert_eq!(t.get(Sail::Main), 12.0);
        assert_eq!(t.get(Sail::Jib), 20.0);
        let o = OptimalTrim { main: 1.0, jib: 2.0, speed: 3.0 };
        assert_eq!(o.trim(), SailTrim::new(1.0, 2.0));
    }
}
