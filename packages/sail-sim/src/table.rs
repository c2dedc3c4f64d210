//! table.rs — Trim table of a controller over a wind grid
//!
//! Rows share the dataset layout (`windSpeed,windDir,main,jib,boatSpeed`),
//! so a plot of the optimal trims and a plot of training data read the same
//! file format.

use std::io::Write;

use sail_model::types::MAX_WIND_DIR_DEG;
use sail_model::{Controller, SpeedModel, WindCondition};

use crate::dataset::{Sample, CSV_HEADER};
use crate::error::{Result, SimError};

/// Highest wind speed listed (kt)
pub const TABLE_MAX_WIND_SPEED: u32 = 18;

/// Controller trim and the speed the model gives it, for wind speeds
/// `0, speed_step, …, 18` and wind angles `0, dir_step, …, 180`
pub fn trim_table<M, C>(model: &M, controller: &C, speed_step: u32, dir_step: u32) -> Result<Vec<Sample>>
where
    M: SpeedModel + ?Sized,
    C: Controller + ?Sized,
{
    if speed_step == 0 {
        return Err(SimError::parameter("speed_step", "must be at least 1"));
    }
    if dir_step == 0 {
        return Err(SimError::parameter("dir_step", "must be at least 1"));
    }

    let mut rows = Vec::new();
    for speed in (0..=TABLE_MAX_WIND_SPEED).step_by(speed_step as usize) {
        for dir in (0..=MAX_WIND_DIR_DEG as u32).step_by(dir_step as usize) {
            let wind = WindCondition::new(speed as f64, dir as f64)?;
            let trim = controller.trim(wind)?;
            let boat_speed = model.resultant_speed(wind, trim)?;
            rows.push(Sample::new(wind, trim, boat_speed));
        }
    }
    Ok(rows)
}

pub fn write_table<W: Write>(out: &mut W, rows: &[Sample]) -> std::io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for row in rows {
        writeln!(out, "{}", row.csv_line())?;
    }
    Ok(())
}
