//! Insurance policy entity and the validity rule

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, CoveragePeriod, PolicyId};
use crate::error::PolicyError;

/// An insurance policy covering one car
///
/// Policies are issued outside this service; here they are only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    /// Unique identifier
    pub id: PolicyId,
    /// The insured car
    pub car_id: CarId,
    /// Insurer name
    pub provider: String,
    /// Days on which the policy provides cover
    pub period: CoveragePeriod,
}

impl InsurancePolicy {
    /// Creates a policy, checking that the provider is named
    pub fn new(
        id: PolicyId,
        car_id: CarId,
        provider: impl Into<String>,
        period: CoveragePeriod,
    ) -> Result<Self, PolicyError> {
        let provider = provider.into();
        if provider.trim().is_empty() {
            return Err(PolicyError::MissingRequiredField("provider".to_string()));
        }

        Ok(Self {
            id,
            car_id,
            provider,
            period,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.period.start
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.period.end
    }

    /// Returns true if the car is covered by this policy on `date`
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.period.contains(date)
    }

    /// Returns true if the last covered day of this policy is `date`
    pub fn expires_on(&self, date: NaiveDate) -> bool {
        self.period.ends_on(date)
    }
}

/// Returns true if any of the policies covers `date`
///
/// Overlapping policies are fine; a single match is enough.
pub fn any_policy_covers<'a, I>(policies: I, date: NaiveDate) -> bool
where
    I: IntoIterator<Item = &'a InsurancePolicy>,
{
    policies.into_iter().any(|policy| policy.covers(date))
}
