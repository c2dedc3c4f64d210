//! controller.rs — The controller capability
//!
//! A controller picks a trim for a wind condition. Fitted strategies (grid
//! search over a regressor, nearest neighbours, ...) and plain closures all
//! satisfy it, so the scorer never needs to know how a trim was chosen.

use crate::error::DomainError;
use crate::model::SpeedModel;
use crate::types::{SailTrim, WindCondition};

pub trait Controller: Sync {
    fn trim(&self, wind: WindCondition) -> Result<SailTrim, DomainError>;
}

impl<F> Controller for F
where
    F: Fn(WindCondition) -> Result<SailTrim, DomainError> + Sync,
{
    fn trim(&self, wind: WindCondition) -> Result<SailTrim, DomainError> {
        self(wind)
    }
}

/// Ground-truth controller: always returns the model's own optimum
pub struct OptimalController<'a, M: SpeedModel + ?Sized> {
    model: &'a M,
}

impl<'a, M: SpeedModel + ?Sized> OptimalController<'a, M> {
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }
}

impl<M: SpeedModel + ?Sized> Controller for OptimalController<'_, M> {
    fn trim(&self, wind: WindCondition) -> Result<SailTrim, DomainError> {
        Ok(self.model.peek_optimal(wind)?.trim())
    }
}

/// Fixed trim regardless of wind. Useful as a baseline.
#[derive(Debug, Clone, Copy)]
pub struct FixedTrim(pub SailTrim);

impl Controller for FixedTrim {
    fn trim(&self, _wind: WindCondition) -> Result<SailTrim, DomainError> {
        Ok(self.0)
    }
}
