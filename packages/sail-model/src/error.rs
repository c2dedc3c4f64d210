//! error.rs — Domain errors raised at the model boundary
//!
//! Every entry point of the speed model validates its inputs and returns a
//! `DomainError` instead of producing a value from out-of-range arguments.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A physical quantity (wind speed, wind angle, sail position) outside its range
    #[error("{quantity} out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A computed quantity (e.g. a fitted model's prediction) is NaN or infinite
    #[error("{quantity} is not finite: {value}")]
    NotFinite { quantity: &'static str, value: f64 },

    /// Interpolation requested outside the source interval
    #[error("value {value} outside interpolation interval [{min}, {max}]")]
    OutsideInterval { value: f64, min: f64, max: f64 },

    /// Interpolation source interval is empty or reversed
    #[error("interpolation interval is empty: min ({min}) >= max ({max})")]
    EmptyInterval { min: f64, max: f64 },
}

impl DomainError {
    pub(crate) fn out_of_range(quantity: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange { quantity, value, min, max }
    }
}
