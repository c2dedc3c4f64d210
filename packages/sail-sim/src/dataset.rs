//! dataset.rs — Training rows, CSV I/O and train/validation split
//!
//! File layout (header row required):
//!   windSpeed,windDir,main,jib,boatSpeed
//! One row per sample, plain f64 values, comma separated.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use sail_model::trim::check_sail_pos;
use sail_model::{DomainError, Sail, SailTrim, WindCondition};

use crate::error::{Result, SimError};

pub const CSV_HEADER: &str = "windSpeed,windDir,main,jib,boatSpeed";

/// Feature vector fed to regressors: wind speed, wind direction, main, jib
pub type Features = [f64; 4];

// ── Sample ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub wind_speed: f64,
    pub wind_dir: f64,
    pub main: f64,
    pub jib: f64,
    pub boat_speed: f64,
}

impl Sample {
    pub fn new(wind: WindCondition, trim: SailTrim, boat_speed: f64) -> Self {
        Self {
            wind_speed: wind.wind_speed(),
            wind_dir: wind.wind_dir(),
            main: trim.main,
            jib: trim.jib,
            boat_speed,
        }
    }

    pub fn features(&self) -> Features {
        [self.wind_speed, self.wind_dir, self.main, self.jib]
    }

    pub fn wind(&self) -> std::result::Result<WindCondition, DomainError> {
        WindCondition::new(self.wind_speed, self.wind_dir)
    }

    pub fn trim(&self) -> SailTrim {
        SailTrim::new(self.main, self.jib)
    }

    pub fn csv_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.wind_speed, self.wind_dir, self.main, self.jib, self.boat_speed
        )
    }

    fn parse(line: &str, path: &str, line_no: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 5 {
            return Err(SimError::Row {
                path: path.to_string(),
                line: line_no,
                reason: format!("expected 5 columns, found {}", fields.len()),
            });
        }

        let row_error = |reason: String| SimError::Row { path: path.to_string(), line: line_no, reason };

        let mut values = [0.0f64; 5];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field.parse().map_err(|_| row_error(format!("not a number: {field:?}")))?;
            if !value.is_finite() {
                return Err(row_error(format!("not a finite number: {field:?}")));
            }
        }

        let sample = Self {
            wind_speed: values[0],
            wind_dir: values[1],
            main: values[2],
            jib: values[3],
            boat_speed: values[4],
        };
        sample.wind().map_err(|e| row_error(e.to_string()))?;
        check_sail_pos(sample.main, Sail::Main).map_err(|e| row_error(e.to_string()))?;
        check_sail_pos(sample.jib, Sail::Jib).map_err(|e| row_error(e.to_string()))?;
        Ok(sample)
    }
}

// ── CSV I/O ───────────────────────────────────────────────────────────────────

/// Write rows with header. Returns the SHA-256 of the bytes written (hex).
pub fn write_csv(path: &str, rows: &[Sample]) -> Result<String> {
    let file = File::create(path).map_err(|e| SimError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let mut hasher = Sha256::new();

    let mut emit = |line: &str| -> Result<()> {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
        writeln!(out, "{line}").map_err(|e| SimError::io(path, e))
    };

    emit(CSV_HEADER)?;
    for row in rows {
        emit(&row.csv_line())?;
    }
    out.flush().map_err(|e| SimError::io(path, e))?;

    let digest = hex::encode(hasher.finalize());
    info!("💾 Wrote {} rows to {path}", rows.len());
    Ok(digest)
}

pub fn read_csv(path: &str) -> Result<Vec<Sample>> {
    let file = File::open(path).map_err(|e| SimError::io(path, e))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.map_err(|e| SimError::io(path, e))?,
        None => String::new(),
    };
    if header.trim() != CSV_HEADER {
        return Err(SimError::Header {
            path: path.to_string(),
            found: header,
            expected: CSV_HEADER.to_string(),
        });
    }

    let mut rows = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line.map_err(|e| SimError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        // header is line 1
        rows.push(Sample::parse(&line, path, idx + 2)?);
    }

    info!("📂 Read {} rows from {path}", rows.len());
    Ok(rows)
}

// ── Split ─────────────────────────────────────────────────────────────────────

pub struct Split {
    pub train: Vec<Sample>,
    pub validation: Vec<Sample>,
}

/// Random validation split of `round(fraction * n)` rows. Both halves keep
/// the input row order.
pub fn train_validation_split(rows: &[Sample], fraction: f64, seed: u64) -> Result<Split> {
    if !(0.0..1.0).contains(&fraction) {
        return Err(SimError::parameter("validation_fraction", format!("{fraction} not in [0, 1)")));
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let n_validation = (fraction * rows.len() as f64).round() as usize;
    let mut is_validation = vec![false; rows.len()];
    for &i in &order[..n_validation] {
        is_validation[i] = true;
    }

    let (mut train, mut validation) = (Vec::new(), Vec::new());
    for (row, &val) in rows.iter().zip(&is_validation) {
        if val { validation.push(*row) } else { train.push(*row) }
    }

    debug!("split {} rows: {} train / {} validation", rows.len(), train.len(), validation.len());
    Ok(Split { train, validation })
}
