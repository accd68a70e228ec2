//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{CarId, CoveragePeriod, PolicyId};
use domain_policy::InsurancePolicy;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::date;

/// Days covered by `date_strategy`, starting 2020-01-01
const DATE_RANGE_DAYS: i64 = 365 * 10;

/// Strategy for dates between 2020-01-01 and the end of 2029
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0..DATE_RANGE_DAYS).prop_map(|offset| date(2020, 1, 1) + Duration::days(offset))
}

/// Strategy for coverage periods, a quarter of them open-ended
pub fn coverage_period_strategy() -> impl Strategy<Value = CoveragePeriod> {
    (date_strategy(), prop::option::weighted(0.75, 0..(365 * 3i64))).prop_map(|(start, length)| {
        match length {
            Some(days) => CoveragePeriod {
                start,
                end: Some(start + Duration::days(days)),
            },
            None => CoveragePeriod::ongoing(start),
        }
    })
}

/// Strategy for up to `max` policies of one car, ids assigned in order
pub fn policies_strategy(car_id: CarId, max: usize) -> impl Strategy<Value = Vec<InsurancePolicy>> {
    prop::collection::vec(coverage_period_strategy(), 0..=max).prop_map(move |periods| {
        periods
            .into_iter()
            .enumerate()
            .map(|(index, period)| InsurancePolicy {
                id: PolicyId::new(index as i64 + 1),
                car_id,
                provider: format!("Insurer {}", index + 1),
                period,
            })
            .collect()
    })
}

/// Strategy for non-negative claim amounts with two decimal places
pub fn claim_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_periods_are_ordered(period in coverage_period_strategy()) {
            if let Some(end) = period.end {
                prop_assert!(period.start <= end);
            }
        }

        #[test]
        fn generated_amounts_are_non_negative(amount in claim_amount_strategy()) {
            prop_assert!(!amount.is_sign_negative());
        }
    }
}
