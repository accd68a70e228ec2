//! Insurance claim entity

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, ClaimId, MINOR_UNIT_DIGITS};
use crate::error::ClaimError;

/// Longest accepted claim description, in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Digits allowed before the decimal point; amounts are stored as `NUMERIC(18, 2)`
pub const MAX_AMOUNT_INTEGER_DIGITS: u32 = 16;

/// Smallest amount that no longer fits the store
pub fn amount_limit() -> Decimal {
    Decimal::from(10_i64.pow(MAX_AMOUNT_INTEGER_DIGITS))
}

/// A recorded claim against a car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceClaim {
    /// Unique identifier, assigned by the store
    pub id: ClaimId,
    /// The car the claim is about
    pub car_id: CarId,
    /// Date of the incident
    pub claim_date: NaiveDate,
    /// Free-text description
    pub description: String,
    /// Claimed amount
    pub amount: Decimal,
}

/// Claim data before it is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl NewClaim {
    pub fn new(claim_date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            claim_date,
            description: description.into(),
            amount,
        }
    }

    /// Checks the claim data before anything is written
    ///
    /// The claim date is deliberately not compared with the car's policies:
    /// claims outside any coverage window are still recorded.
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(ClaimError::NegativeAmount(self.amount));
        }

        // Trailing zeros are fine: 10.500 is stored as 10.50 without rounding
        let scale = self.amount.normalize().scale();
        if scale > MINOR_UNIT_DIGITS {
            return Err(ClaimError::TooManyDecimals {
                max: MINOR_UNIT_DIGITS,
                actual: scale,
            });
        }

        if self.amount >= amount_limit() {
            return Err(ClaimError::AmountTooLarge(self.amount));
        }

        let length = self.description.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(ClaimError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LENGTH,
                actual: length,
            });
        }

        Ok(())
    }

    /// Attaches the store-assigned identifier
    pub fn into_claim(self, id: ClaimId, car_id: CarId) -> InsuranceClaim {
        InsuranceClaim {
            id,
            car_id,
            claim_date: self.claim_date,
            description: self.description,
            amount: self.amount,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    proptest! {
        #[test]
        fn validate_accepts_exactly_the_storable_amounts(
            mantissa in -1_000_000_000_000_000_000i64..i64::MAX,
            scale in 0u32..6,
        ) {
            let amount = Decimal::new(mantissa, scale);
            let storable = !amount.is_sign_negative() || amount.is_zero();
            let storable = storable
                && amount == amount.round_dp(MINOR_UNIT_DIGITS)
                && amount < amount_limit();

            let result = NewClaim::new(date(), "Hail", amount).validate();
            prop_assert_eq!(result.is_ok(), storable, "amount {}", amount);
        }
    }
}
