//! fit — Speed regressors learned from generated rows
//!
//! - `poly`: polynomial feature expansion + least squares
//! - `forest`: bagged regression trees
//! - `knn`: nearest-neighbour trim lookup (a controller, not a regressor)
//!
//! Regressors predict boat speed from `[wind_speed, wind_dir, main, jib]`;
//! `controllers::GridSearchController` turns one into a trim controller.

pub mod forest;
pub mod knn;
pub mod poly;

use crate::dataset::{Features, Sample};

pub use forest::{ForestParams, RandomForest};
pub use knn::KnnController;
pub use poly::{LinearRegression, PolyExpansion};

pub trait Regressor: Sync {
    fn predict(&self, x: &Features) -> f64;
}

/// Mean squared prediction error; 0 for an empty set
pub fn mse<R: Regressor + ?Sized>(model: &R, rows: &[Sample]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let sum: f64 = rows
        .iter()
        .map(|r| {
            let e = model.predict(&r.features()) - r.boat_speed;
            e * e
        })
        .sum();
    sum / rows.len() as f64
}

/// Coefficient of determination. None when the labels have no variance.
pub fn r2<R: Regressor + ?Sized>(model: &R, rows: &[Sample]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len() as f64;
    let mean = rows.iter().map(|r| r.boat_speed).sum::<f64>() / n;
    let total: f64 = rows.iter().map(|r| (r.boat_speed - mean).powi(2)).sum();
    if total <= f64::EPSILON {
        return None;
    }
    Some(1.0 - mse(model, rows) * n / total)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _x: &Features) -> f64 {
            self.0
        }
    }

    fn row(boat_speed: f64) -> Sample {
        Sample { wind_speed: 5.0, wind_dir: 90.0, main: 10.0, jib: 10.0, boat_speed }
    }

    #[test]
    fn test_mse_and_r2() {
        let rows = vec![row(1.0), row(3.0)];
        assert_eq!(mse(&Constant(2.0), &rows), 1.0);
        // predicting the mean explains nothing
        assert_eq!(r2(&Constant(2.0), &rows), Some(0.0));
        assert_eq!(r2(&Constant(2.0), &[row(1.0), row(1.0)]), None);
        assert_eq!(mse(&Constant(2.0), &[]), 0.0);
    }
}
