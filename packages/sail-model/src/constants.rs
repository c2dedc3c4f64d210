//! constants.rs — Boat constants that define the speed model
//!
//! These numbers are the identity of the oracle: a different set describes a
//! different boat. `Default` is the reference boat used to label training data.

use serde::{Deserialize, Serialize};

/// Constants shared by every model variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConstants {
    /// Closest wind angle sailable without a large speed loss (deg)
    pub pointing_angle: f64,
    /// How far below the pointing angle the boat can still pinch (deg)
    pub pinch_margin: f64,
    /// Fraction of the wind speed reachable on a beam reach in heavy air
    pub windy_speed_factor: f64,
    /// Close-hauled speed relative to beam reach speed
    pub beating_factor: f64,
    /// Dead-run speed relative to beam reach speed
    pub running_factor: f64,
    /// Below this wind speed the boat can sail at wind speed (kt)
    pub light_air_knots: f64,
    /// Above this wind speed only `windy_speed_factor` of the wind is reachable (kt)
    pub heavy_air_knots: f64,
    /// Share of drive coming from the main, the rest comes from the jib
    pub percentage_main_driven: f64,
    /// Extra ease of the jib over the main at full trim (deg)
    pub jib_offset: f64,
    /// Trim error beyond which a sail gives only `mistrim_factor` (deg)
    pub trim_tolerance: f64,
    /// Drive factor of a badly trimmed (but not backed) sail
    pub mistrim_factor: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            pointing_angle: 50.0,
            pinch_margin: 10.0,
            windy_speed_factor: 0.5,
            beating_factor: 0.6,
            running_factor: 0.8,
            light_air_knots: 2.0,
            heavy_air_knots: 15.0,
            percentage_main_driven: 0.65,
            jib_offset: 5.0,
            trim_tolerance: 30.0,
            mistrim_factor: 0.2,
        }
    }
}

/// Constants of the planing regime, only used by the planing variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaningConstants {
    /// Maximum trim error on either sail that still allows planing (deg)
    pub planing_tol: f64,
    /// Minimum wind speed to plane (kt)
    pub min_planing_wind: f64,
    /// Planing needs the wind at least this far aft of the pointing angle (deg)
    pub planing_angle_margin: f64,
    /// Boost per knot of wind at the pointing angle
    pub plane_factor_upwind: f64,
    /// Boost per knot of wind from a beam reach downwind
    pub plane_factor_reaching: f64,
    /// Wind speed where sails start to need extra ease (kt)
    pub ease_onset_knots: f64,
    /// Wind speed at which the extra ease is at its maximum; top of the model domain (kt)
    pub ease_full_knots: f64,
    /// Maximum extra ease in heavy air (deg)
    pub max_extra_ease: f64,
}

impl Default for PlaningConstants {
    fn default() -> Self {
        Self {
            planing_tol: 3.0,
            min_planing_wind: 8.0,
            planing_angle_margin: 10.0,
            plane_factor_upwind: 0.02,
            plane_factor_reaching: 0.125,
            ease_onset_knots: 12.0,
            ease_full_knots: 18.0,
            max_extra_ease: 7.0,
        }
    }
}
