//! Errors returned by the car insurance service

use thiserror::Error;

use core_kernel::{CarId, ClaimId, PortError};
use domain_claims::ClaimError;

/// Errors that can occur when querying or updating a car's insurance records
#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("Car {0} not found")]
    CarNotFound(CarId),

    #[error("Claim {0} not found")]
    ClaimNotFound(ClaimId),

    /// The claim data was rejected before anything was stored
    #[error("Invalid claim: {0}")]
    InvalidClaim(ClaimError),

    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl VehicleError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VehicleError::CarNotFound(_) | VehicleError::ClaimNotFound(_))
    }
}

impl From<ClaimError> for VehicleError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Store(port) => VehicleError::Store(port),
            other => VehicleError::InvalidClaim(other),
        }
    }
}
