//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{CarId, ClaimId, CoveragePeriod, OwnerId, PolicyId};
use domain_claims::{InsuranceClaim, NewClaim};
use domain_policy::InsurancePolicy;
use domain_vehicle::{Car, Owner};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::date;

/// Builds an owner with a random name and email
pub fn fake_owner(id: i64) -> Owner {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    Owner::new(OwnerId::new(id), name, Some(email))
}

/// Builder for cars
pub struct CarBuilder {
    id: CarId,
    vin: Option<String>,
    make: String,
    model: String,
    year_of_manufacture: i32,
    owner_id: OwnerId,
}

impl CarBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id: CarId::new(id),
            vin: None,
            make: "Dacia".to_string(),
            model: "Sandero".to_string(),
            year_of_manufacture: 2020,
            owner_id: OwnerId::new(1),
        }
    }

    pub fn owner(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = Some(vin.into());
        self
    }

    pub fn make_and_model(mut self, make: impl Into<String>, model: impl Into<String>) -> Self {
        self.make = make.into();
        self.model = model.into();
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year_of_manufacture = year;
        self
    }

    pub fn build(self) -> Car {
        Car {
            vin: self.vin.unwrap_or_else(|| format!("TESTVIN{:06}", self.id.value())),
            id: self.id,
            make: self.make,
            model: self.model,
            year_of_manufacture: self.year_of_manufacture,
            owner_id: self.owner_id,
        }
    }
}

/// Builder for policies, defaulting to calendar year 2024 with Allianz
pub struct PolicyBuilder {
    id: PolicyId,
    car_id: CarId,
    provider: String,
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl PolicyBuilder {
    pub fn new(id: i64, car_id: CarId) -> Self {
        Self {
            id: PolicyId::new(id),
            car_id,
            provider: "Allianz".to_string(),
            start: date(2024, 1, 1),
            end: Some(date(2024, 12, 31)),
        }
    }

    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn from(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn ongoing(mut self) -> Self {
        self.end = None;
        self
    }

    /// Builds the policy, panicking if the period is inverted
    pub fn build(self) -> InsurancePolicy {
        let period = CoveragePeriod::new(self.start, self.end)
            .unwrap_or_else(|err| panic!("PolicyBuilder: {err}"));
        InsurancePolicy {
            id: self.id,
            car_id: self.car_id,
            provider: self.provider,
            period,
        }
    }
}

/// Builder for claim data
pub struct ClaimBuilder {
    claim_date: NaiveDate,
    description: String,
    amount: Decimal,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    pub fn new() -> Self {
        Self {
            claim_date: date(2024, 6, 15),
            description: "Rear bumper damage".to_string(),
            amount: dec!(1200.50),
        }
    }

    pub fn on(mut self, claim_date: NaiveDate) -> Self {
        self.claim_date = claim_date;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Claim data as submitted for registration
    pub fn build(self) -> NewClaim {
        NewClaim::new(self.claim_date, self.description, self.amount)
    }

    /// A stored claim, as a port would return it
    pub fn stored(self, id: i64, car_id: CarId) -> InsuranceClaim {
        self.build().into_claim(ClaimId::new(id), car_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_owner_has_email() {
        let owner = fake_owner(3);
        assert_eq!(owner.id, OwnerId::new(3));
        assert!(!owner.name.is_empty());
        assert!(owner.email.unwrap().contains('@'));
    }

    #[test]
    fn test_policy_builder_defaults() {
        let policy = PolicyBuilder::new(1, CarId::new(1)).build();
        assert_eq!(policy.start_date(), date(2024, 1, 1));
        assert_eq!(policy.end_date(), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_claim_builder_is_valid_by_default() {
        assert!(ClaimBuilder::new().build().validate().is_ok());
    }
}
