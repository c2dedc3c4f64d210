//! planing.rs — Planing variant of the speed model
//!
//! Same envelope and trim-quality curves as the base boat, with two changes:
//! - above `ease_onset_knots` both sails want extra ease (up to `max_extra_ease`)
//! - trimmed within `planing_tol` of optimal, off the wind and in enough
//!   breeze, the hull planes and gains an additive speed boost

use tracing::trace;

use crate::constants::{ModelConstants, PlaningConstants};
use crate::envelope::BEAM_REACH_DEG;
use crate::error::DomainError;
use crate::interp::lerp;
use crate::model::{trimmed_speed, BaseModel, SpeedModel};
use crate::trim;
use crate::types::{Sail, SailTrim, WindCondition, MAX_SAIL_POS_DEG};

#[derive(Debug, Clone, Default)]
pub struct PlaningModel {
    base: BaseModel,
    planing: PlaningConstants,
}

impl PlaningModel {
    pub fn new(base: BaseModel, planing: PlaningConstants) -> Self {
        Self { base, planing }
    }

    /// Heavy-air ease added on top of the base optimum (deg)
    fn extra_ease(&self, wind_speed: f64) -> Result<f64, DomainError> {
        let p = &self.planing;
        if wind_speed > p.ease_onset_knots {
            lerp(wind_speed, p.ease_onset_knots, p.ease_full_knots, 0.0, p.max_extra_ease)
        } else {
            Ok(0.0)
        }
    }

    /// Additive speed from planing (kt). Zero unless both sails are within
    /// `planing_tol` of optimal and the angle and wind speed allow planing.
    pub fn planing_boost(&self, wind: WindCondition, trim: SailTrim) -> Result<f64, DomainError> {
        trim::check_sail_pos(trim.main, Sail::Main)?;
        trim::check_sail_pos(trim.jib, Sail::Jib)?;

        let c = self.constants();
        let p = &self.planing;

        let opt_main = self.opt_pos(wind, Sail::Main)?;
        let opt_jib = self.opt_pos(wind, Sail::Jib)?;
        if (opt_main - trim.main).abs() > p.planing_tol || (opt_jib - trim.jib).abs() > p.planing_tol {
            return Ok(0.0);
        }

        let wind_dir = wind.wind_dir();
        let wind_speed = wind.wind_speed();
        if wind_dir < c.pointing_angle + p.planing_angle_margin || wind_speed < p.min_planing_wind {
            return Ok(0.0);
        }

        let plane_factor = if wind_dir < BEAM_REACH_DEG {
            lerp(wind_dir, c.pointing_angle, BEAM_REACH_DEG, p.plane_factor_upwind, p.plane_factor_reaching)?
        } else {
            p.plane_factor_reaching
        };
        trace!(wind_speed, wind_dir, plane_factor, "planing");
        Ok(wind_speed * plane_factor)
    }
}

impl SpeedModel for PlaningModel {
    fn constants(&self) -> &ModelConstants {
        self.base.constants()
    }

    fn opt_pos(&self, wind: WindCondition, sail: Sail) -> Result<f64, DomainError> {
        let c = self.constants();
        if wind.wind_dir() < c.pointing_angle {
            return trim::base_opt_pos(c, wind.wind_dir(), sail);
        }
        let eased = trim::base_opt_pos(c, wind.wind_dir(), sail)? + self.extra_ease(wind.wind_speed())?;
        Ok(eased.min(MAX_SAIL_POS_DEG))
    }

    fn resultant_speed(&self, wind: WindCondition, trim: SailTrim) -> Result<f64, DomainError> {
        Ok(trimmed_speed(self, wind, trim)? + self.planing_boost(wind, trim)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wind(speed: f64, dir: f64) -> WindCondition {
        WindCondition::new(speed, dir).unwrap()
    }

    #[test]
    fn test_opt_pos_matches_base_in_moderate_wind() {
        let m = PlaningModel::default();
        let base = BaseModel::default();
        for dir in [30.0, 50.0, 90.0, 150.0] {
            for sail in [Sail::Main, Sail::Jib] {
                let w = wind(12.0, dir);
                assert_eq!(m.opt_pos(w, sail).unwrap(), base.opt_pos(w, sail).unwrap());
            }
        }
    }

    #[test]
    fn test_opt_pos_extra_ease_in_heavy_air() {
        let m = PlaningModel::default();
        // 15 kt is halfway from 12 to 18: 3.5 deg extra
        let w = wind(15.0, 115.0);
        assert!((m.opt_pos(w, Sail::Main).unwrap() - 48.5).abs() < 1e-9);
        // clamped at 90 on a dead run
        assert_eq!(m.opt_pos(wind(18.0, 180.0), Sail::Jib).unwrap(), 90.0);
        // pinching ignores the extra ease
        assert_eq!(m.opt_pos(wind(18.0, 45.0), Sail::Jib).unwrap(), 5.0);
    }

    #[test]
    fn test_opt_pos_rejects_wind_above_model_domain() {
        let m = PlaningModel::default();
        assert!(m.opt_pos(wind(19.0, 90.0), Sail::Main).is_err());
        assert!(m.peek_optimal(wind(19.0, 90.0)).is_err());
    }

    #[test]
    fn test_boost_gating() {
        let m = PlaningModel::default();
        let w = wind(10.0, 70.0);
        let opt = m.peek_optimal(w).unwrap();
        assert!(m.planing_boost(w, SailTrim::new(opt.main + 1.0, opt.jib - 1.0)).unwrap() > 0.0);
        // just outside tolerance
        assert_eq!(m.planing_boost(w, SailTrim::new(opt.main + 3.5, opt.jib)).unwrap(), 0.0);

        let light = wind(5.0, 70.0);
        let light_opt = m.peek_optimal(light).unwrap();
        assert_eq!(m.planing_boost(light, light_opt.trim()).unwrap(), 0.0);

        let close = wind(10.0, 40.0);
        let close_opt = m.peek_optimal(close).unwrap();
        assert_eq!(m.planing_boost(close, close_opt.trim()).unwrap(), 0.0);
    }

    #[test]
    fn test_boost_rejects_invalid_trim() {
        let m = PlaningModel::default();
        let w = wind(10.0, 180.0);
        assert!(matches!(
            m.planing_boost(w, SailTrim::new(92.0, 91.0)),
            Err(DomainError::OutOfRange { quantity: "main position", .. })
        ));
        assert!(matches!(
            m.planing_boost(w, SailTrim::new(90.0, -1.0)),
            Err(DomainError::OutOfRange { quantity: "jib position", .. })
        ));
        assert!(m.planing_boost(w, SailTrim::new(f64::NAN, f64::NAN)).is_err());
    }

    #[test]
    fn test_boost_values() {
        let m = PlaningModel::default();
        let reach = wind(8.0, 120.0);
        let opt = m.peek_optimal(reach).unwrap();
        assert_eq!(m.planing_boost(reach, opt.trim()).unwrap(), 1.0);

        // 70 deg is halfway from 50 to 90: factor 0.0725
        let upwind = wind(10.0, 70.0);
        let opt = m.peek_optimal(upwind).unwrap();
        assert!((m.planing_boost(upwind, opt.trim()).unwrap() - 0.725).abs() < 1e-9);
    }

    #[test]
    fn test_boost_is_additive() {
        let m = PlaningModel::default();
        let w = wind(10.0, 100.0);
        let opt = m.peek_optimal(w).unwrap();
        let envelope = m.max_speed(w).unwrap();
        assert!((opt.speed - (envelope + 1.25)).abs() < 1e-9);
        assert!(opt.speed > envelope);
    }
}
