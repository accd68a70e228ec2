//! Policy domain errors

use thiserror::Error;

use core_kernel::{PortError, TemporalError};

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Coverage dates are inconsistent
    #[error("Invalid coverage period: {0}")]
    InvalidPeriod(#[from] TemporalError),

    /// Required field is missing
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// The policy store could not be read
    #[error("Policy store error: {0}")]
    Store(#[from] PortError),
}
