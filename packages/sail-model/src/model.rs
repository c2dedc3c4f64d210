//! model.rs — The speed model capability and its base implementation
//!
//! `SpeedModel` is what data generators, controllers and the scorer program
//! against. `BaseModel` is the plain heuristic boat; the planing variant lives
//! in `planing.rs` and wraps a `BaseModel`. `BoatModel` picks one of the two
//! at construction time.

use serde::{Deserialize, Serialize};

use crate::constants::{ModelConstants, PlaningConstants};
use crate::envelope;
use crate::error::DomainError;
use crate::planing::PlaningModel;
use crate::trim;
use crate::types::{OptimalTrim, Sail, SailTrim, WindCondition};

// ── Capability ────────────────────────────────────────────────────────────────

pub trait SpeedModel: Send + Sync {
    fn constants(&self) -> &ModelConstants;

    /// Optimal position of one sail for this wind (deg)
    fn opt_pos(&self, wind: WindCondition, sail: Sail) -> Result<f64, DomainError>;

    /// Boat speed over water for a wind condition and trim (kt)
    fn resultant_speed(&self, wind: WindCondition, trim: SailTrim) -> Result<f64, DomainError>;

    /// Speed cap from the wind alone, before trim losses
    fn max_speed(&self, wind: WindCondition) -> Result<f64, DomainError> {
        envelope::max_speed(self.constants(), wind)
    }

    /// Trim quality in [0, 1]; exactly 1.0 at `opt_pos`, 0 for a backed sail
    fn sail_pos_factor(&self, pos: f64, wind: WindCondition, sail: Sail) -> Result<f64, DomainError> {
        trim::check_sail_pos(pos, sail)?;
        let opt = self.opt_pos(wind, sail)?;
        trim::trim_quality(self.constants(), pos, opt, wind, sail)
    }

    /// The known optimum. No search: the optimal trim is `opt_pos` by construction.
    fn peek_optimal(&self, wind: WindCondition) -> Result<OptimalTrim, DomainError> {
        let main = self.opt_pos(wind, Sail::Main)?;
        let jib = self.opt_pos(wind, Sail::Jib)?;
        let speed = self.resultant_speed(wind, SailTrim::new(main, jib))?;
        Ok(OptimalTrim { main, jib, speed })
    }
}

/// Envelope speed scaled by the main/jib weighted trim quality.
/// Shared by every variant; the planing model adds its boost on top.
pub fn trimmed_speed<M: SpeedModel + ?Sized>(
    model: &M,
    wind: WindCondition,
    trim: SailTrim,
) -> Result<f64, DomainError> {
    let c = model.constants();
    let speed = model.max_speed(wind)?;
    let main_factor = model.sail_pos_factor(trim.main, wind, Sail::Main)?;
    let jib_factor = model.sail_pos_factor(trim.jib, wind, Sail::Jib)?;
    let sail_factor = c.percentage_main_driven * main_factor + (1.0 - c.percentage_main_driven) * jib_factor;
    Ok(speed * sail_factor)
}

// ── Base model ────────────────────────────────────────────────────────────────

/// Heuristic boat: trim optimum depends on wind direction only
#[derive(Debug, Clone, Default)]
pub struct BaseModel {
    constants: ModelConstants,
}

impl BaseModel {
    pub fn new(constants: ModelConstants) -> Self {
        Self { constants }
    }
}

impl SpeedModel for BaseModel {
    fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    fn opt_pos(&self, wind: WindCondition, sail: Sail) -> Result<f64, DomainError> {
        trim::base_opt_pos(&self.constants, wind.wind_dir(), sail)
    }

    fn resultant_speed(&self, wind: WindCondition, trim: SailTrim) -> Result<f64, DomainError> {
        trimmed_speed(self, wind, trim)
    }
}

// ── Variant selection ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    #[default]
    Base,
    Planing,
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelVariant::Base => write!(f, "base"),
            ModelVariant::Planing => write!(f, "planing"),
        }
    }
}

/// A model chosen at construction time
#[derive(Debug, Clone)]
pub enum BoatModel {
    Base(BaseModel),
    Planing(PlaningModel),
}

impl BoatModel {
    pub fn new(variant: ModelVariant, constants: ModelConstants, planing: PlaningConstants) -> Self {
        match variant {
            ModelVariant::Base => BoatModel::Base(BaseModel::new(constants)),
            ModelVariant::Planing => BoatModel::Planing(PlaningModel::new(BaseModel::new(constants), planing)),
        }
    }

    /// Reference boat of the given variant
    pub fn reference(variant: ModelVariant) -> Self {
        Self::new(variant, ModelConstants::default(), PlaningConstants::default())
    }

    pub fn variant(&self) -> ModelVariant {
        match self {
            BoatModel::Base(_) => ModelVariant::Base,
            BoatModel::Planing(_) => ModelVariant::Planing,
        }
    }

    fn inner(&self) -> &dyn SpeedModel {
        match self {
            BoatModel::Base(m) => m,
            BoatModel::Planing(m) => m,
        }
    }
}

impl SpeedModel for BoatModel {
    fn constants(&self) -> &ModelConstants {
        self.inner().constants()
    }

    fn opt_pos(&self, wind: WindCondition, sail: Sail) -> Result<f64, DomainError> {
        self.inner().opt_pos(wind, sail)
    }

    fn resultant_speed(&self, wind: WindCondition, trim: SailTrim) -> Result<f64, DomainError> {
        self.inner().resultant_speed(wind, trim)
    }

    fn sail_pos_factor(&self, pos: f64, wind: WindCondition, sail: Sail) -> Result<f64, DomainError> {
        self.inner().sail_pos_factor(pos, wind, sail)
    }

    fn peek_optimal(&self, wind: WindCondition) -> Result<OptimalTrim, DomainError> {
        self.inner().peek_optimal(wind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wind(speed: f64, dir: f64) -> WindCondition {
        WindCondition::new(speed, dir).unwrap()
    }

    #[test]
    fn test_base_resultant_speed_at_optimum() {
        let m = BaseModel::default();
        let w = wind(10.0, 90.0);
        let main = m.opt_pos(w, Sail::Main).unwrap();
        let jib = m.opt_pos(w, Sail::Jib).unwrap();
        let speed = m.resultant_speed(w, SailTrim::new(main, jib)).unwrap();
        assert_eq!(speed, m.max_speed(w).unwrap());
        assert_eq!(speed, m.peek_optimal(w).unwrap().speed);
    }

    #[test]
    fn test_base_resultant_speed_weights_main_over_jib() {
        let m = BaseModel::default();
        let w = wind(10.0, 120.0);
        let opt = m.peek_optimal(w).unwrap();
        let bad_main = m.resultant_speed(w, SailTrim::new(opt.main + 30.0, opt.jib)).unwrap();
        let bad_jib = m.resultant_speed(w, SailTrim::new(opt.main, opt.jib + 30.0)).unwrap();
        assert!(bad_main < bad_jib);
        assert!(bad_jib < opt.speed);
    }

    #[test]
    fn test_backed_sail_has_no_drive() {
        let m = BaseModel::default();
        assert_eq!(m.sail_pos_factor(50.0, wind(10.0, 30.0), Sail::Main).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_trim_is_rejected() {
        let m = BaseModel::default();
        let err = m.resultant_speed(wind(10.0, 90.0), SailTrim::new(95.0, 10.0)).unwrap_err();
        assert!(matches!(err, DomainError::OutOfRange { quantity: "main position", .. }));
    }

    #[test]
    fn test_boat_model_dispatches_variant() {
        let base = BoatModel::reference(ModelVariant::Base);
        let planing = BoatModel::reference(ModelVariant::Planing);
        assert_eq!(base.variant(), ModelVariant::Base);
        assert_eq!(planing.variant(), ModelVariant::Planing);

        let w = wind(10.0, 100.0);
        let base_opt = base.peek_optimal(w).unwrap();
        let planing_opt = planing.peek_optimal(w).unwrap();
        // same trim below 12 kt, plus the planing boost
        assert_eq!(base_opt.main, planing_opt.main);
        assert!(planing_opt.speed > base_opt.speed);
    }

    #[test]
    fn test_variant_display() {
        assert_eq!(ModelVariant::Base.to_string(), "base");
        assert_eq!(ModelVariant::Planing.to_string(), "planing");
    }
}
