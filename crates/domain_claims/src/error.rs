//! Claims domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("Claim amount may have at most {max} decimal places, got {actual}")]
    TooManyDecimals { max: u32, actual: u32 },

    #[error("Claim amount {0} is too large")]
    AmountTooLarge(Decimal),

    #[error("Claim description is {actual} characters long, at most {max} are allowed")]
    DescriptionTooLong { max: usize, actual: usize },

    #[error("Claim store error: {0}")]
    Store(#[from] PortError),
}

impl ClaimError {
    /// Returns true if the claim data itself was rejected
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClaimError::NegativeAmount(_)
                | ClaimError::TooManyDecimals { .. }
                | ClaimError::AmountTooLarge(_)
                | ClaimError::DescriptionTooLong { .. }
        )
    }
}
