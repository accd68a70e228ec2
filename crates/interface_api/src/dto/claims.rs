//! Claims DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use domain_claims::{InsuranceClaim, NewClaim};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    #[serde(deserialize_with = "super::wire_date::deserialize")]
    pub claim_date: NaiveDate,
    #[validate(length(max = 1000))]
    pub description: String,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
}

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("amount must not be negative".into());
        return Err(error);
    }
    Ok(())
}

impl From<CreateClaimRequest> for NewClaim {
    fn from(request: CreateClaimRequest) -> Self {
        NewClaim::new(request.claim_date, request.description, request.amount)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: i64,
    pub car_id: i64,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl From<InsuranceClaim> for ClaimResponse {
    fn from(claim: InsuranceClaim) -> Self {
        Self {
            id: claim.id.value(),
            car_id: claim.car_id.value(),
            claim_date: claim.claim_date,
            description: claim.description,
            amount: claim.amount,
        }
    }
}
