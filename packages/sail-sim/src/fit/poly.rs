//! poly.rs — Polynomial expansion and ridge least squares
//!
//! Features are first scaled to roughly [0, 1] by their domain maxima, then
//! expanded to every monomial of total degree 1..=degree (4 inputs give
//! C(4 + d, d) - 1 terms). The fit solves the normal equations
//!   (XᵀX + λI) β = Xᵀy
//! with an unpenalised intercept, by Gaussian elimination.

use tracing::{debug, info};

use crate::dataset::{Features, Sample};
use crate::error::{Result, SimError};
use crate::fit::Regressor;

/// Domain maxima of wind speed, wind direction, main, jib
const FEATURE_SCALE: Features = [18.0, 180.0, 90.0, 90.0];

/// Pivots smaller than this mean the system is singular
const PIVOT_EPS: f64 = 1e-12;

// ── Expansion ─────────────────────────────────────────────────────────────────

/// One monomial: `parent * x[feature]`. Parents always precede their
/// children, so a single forward pass evaluates every term.
#[derive(Debug, Clone, Copy)]
struct Term {
    parent: Option<usize>,
    feature: usize,
}

#[derive(Debug, Clone)]
pub struct PolyExpansion {
    terms: Vec<Term>,
}

impl PolyExpansion {
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 {
            return Err(SimError::parameter("degree", "must be at least 1"));
        }

        let n = FEATURE_SCALE.len();
        let mut terms: Vec<Term> = (0..n).map(|feature| Term { parent: None, feature }).collect();

        // terms of the previous degree, as (index, highest feature used)
        let mut layer: Vec<(usize, usize)> = (0..n).map(|i| (i, i)).collect();
        for _ in 1..degree {
            let mut next = Vec::new();
            for &(parent, last) in &layer {
                // non-decreasing feature order: each monomial is produced once
                for feature in last..n {
                    terms.push(Term { parent: Some(parent), feature });
                    next.push((terms.len() - 1, feature));
                }
            }
            layer = next;
        }

        Ok(Self { terms })
    }

    /// Number of expanded terms, intercept excluded
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn expand(&self, x: &Features) -> Vec<f64> {
        let mut scaled = [0.0; 4];
        for ((s, v), max) in scaled.iter_mut().zip(x).zip(&FEATURE_SCALE) {
            *s = v / max;
        }

        let mut out = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            let v = match term.parent {
                Some(p) => out[p] * scaled[term.feature],
                None => scaled[term.feature],
            };
            out.push(v);
        }
        out
    }
}

// ── Regression ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LinearRegression {
    expansion: PolyExpansion,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegression {
    pub fn fit(rows: &[Sample], degree: usize, ridge: f64) -> Result<Self> {
        if !(ridge >= 0.0 && ridge.is_finite()) {
            return Err(SimError::parameter("ridge", format!("{ridge} must be a finite value >= 0")));
        }
        let expansion = PolyExpansion::new(degree)?;
        // column 0 is the intercept
        let p = expansion.len() + 1;
        if rows.len() < p {
            return Err(SimError::Fit(format!(
                "{} rows cannot determine {p} coefficients",
                rows.len()
            )));
        }

        info!("📈 Fitting degree {degree} polynomial ({} terms) on {} rows", expansion.len(), rows.len());

        let mut xtx = vec![vec![0.0f64; p]; p];
        let mut xty = vec![0.0f64; p];
        let mut design = vec![1.0f64; p];
        for row in rows {
            design[1..].copy_from_slice(&expansion.expand(&row.features()));
            for i in 0..p {
                xty[i] += design[i] * row.boat_speed;
                // upper triangle only, mirrored below
                for j in i..p {
                    xtx[i][j] += design[i] * design[j];
                }
            }
        }
        for i in 0..p {
            for j in 0..i {
                xtx[i][j] = xtx[j][i];
            }
        }
        for (i, r) in xtx.iter_mut().enumerate().skip(1) {
            r[i] += ridge;
        }

        let beta = solve_linear_system(xtx, xty)?;
        debug!("intercept {:.4}", beta[0]);

        Ok(Self {
            expansion,
            intercept: beta[0],
            coefficients: beta[1..].to_vec(),
        })
    }
}

impl Regressor for LinearRegression {
    fn predict(&self, x: &Features) -> f64 {
        self.expansion
            .expand(x)
            .iter()
            .zip(&self.coefficients)
            .fold(self.intercept, |acc, (v, c)| acc + v * c)
    }
}

/// Solve `a · x = b` by Gaussian elimination with partial pivoting
pub fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    if a.len() != n || a.iter().any(|r| r.len() != n) {
        return Err(SimError::Fit(format!("system is not {n}x{n}")));
    }

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if !(a[pivot][col].abs() > PIVOT_EPS) {
            return Err(SimError::Fit(format!("singular normal matrix at column {col}")));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
