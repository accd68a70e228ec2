//! Car history timeline
//!
//! A car's history merges its policies and claims into one list of dated
//! events. Events are sorted by date only; on equal dates policy events come
//! before claim events, each source keeping its id order.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use domain_claims::InsuranceClaim;
use domain_policy::InsurancePolicy;

/// Source of a history event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEventKind {
    Policy,
    Claim,
}

impl fmt::Display for HistoryEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryEventKind::Policy => write!(f, "Policy"),
            HistoryEventKind::Claim => write!(f, "Claim"),
        }
    }
}

/// One entry of a car's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub kind: HistoryEventKind,
    pub description: String,
    pub date: NaiveDate,
}

impl HistoryEvent {
    /// Policy event dated at the policy's start
    pub fn from_policy(policy: &InsurancePolicy) -> Self {
        Self {
            kind: HistoryEventKind::Policy,
            description: describe_policy(policy),
            date: policy.start_date(),
        }
    }

    /// Claim event dated at the claim date, amount shown in `currency`
    pub fn from_claim(claim: &InsuranceClaim, currency: Currency) -> Self {
        let amount = Money::new(claim.amount, currency);
        Self {
            kind: HistoryEventKind::Claim,
            description: format!("Claim of {} for '{}'", amount, claim.description),
            date: claim.claim_date,
        }
    }
}

/// Human-readable summary of a policy, e.g.
/// `Insurance with Allianz (from 2024 to 2024)`
pub fn describe_policy(policy: &InsurancePolicy) -> String {
    let end = match policy.end_date() {
        Some(end) => end.year().to_string(),
        None => "ongoing".to_string(),
    };
    format!(
        "Insurance with {} (from {} to {})",
        policy.provider,
        policy.start_date().year(),
        end
    )
}

/// Merges policies and claims into a date-ordered timeline
///
/// `policies` and `claims` are expected in id order, as the ports return them.
pub fn build_history(
    policies: &[InsurancePolicy],
    claims: &[InsuranceClaim],
    currency: Currency,
) -> Vec<HistoryEvent> {
    let mut events: Vec<HistoryEvent> = policies
        .iter()
        .map(HistoryEvent::from_policy)
        .chain(claims.iter().map(|claim| HistoryEvent::from_claim(claim, currency)))
        .collect();

    // sort_by_key is stable, which gives the policies-first tie-break
    events.sort_by_key(|event| event.date);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{CarId, ClaimId, CoveragePeriod, PolicyId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy(id: i64, start: NaiveDate, end: Option<NaiveDate>) -> InsurancePolicy {
        InsurancePolicy::new(
            PolicyId::new(id),
            CarId::new(1),
            "Allianz",
            CoveragePeriod::new(start, end).unwrap(),
        )
        .unwrap()
    }

    fn claim(id: i64, on: NaiveDate, description: &str) -> InsuranceClaim {
        InsuranceClaim {
            id: ClaimId::new(id),
            car_id: CarId::new(1),
            claim_date: on,
            description: description.to_string(),
            amount: dec!(1200.5),
        }
    }

    #[test]
    fn test_describe_bounded_policy() {
        let p = policy(1, date(2024, 1, 1), Some(date(2025, 6, 30)));
        assert_eq!(describe_policy(&p), "Insurance with Allianz (from 2024 to 2025)");
    }

    #[test]
    fn test_describe_ongoing_policy() {
        let p = policy(1, date(2024, 1, 1), None);
        assert_eq!(describe_policy(&p), "Insurance with Allianz (from 2024 to ongoing)");
    }

    #[test]
    fn test_claim_description_formats_money() {
        let event = HistoryEvent::from_claim(&claim(1, date(2024, 3, 1), "Rear bumper"), Currency::USD);
        assert_eq!(event.kind, HistoryEventKind::Claim);
        assert_eq!(event.description, "Claim of $ 1200.50 for 'Rear bumper'");
        assert_eq!(event.date, date(2024, 3, 1));
    }

    #[test]
    fn test_history_is_sorted_by_date() {
        let policies = vec![policy(1, date(2024, 6, 1), None)];
        let claims = vec![
            claim(1, date(2024, 9, 1), "late"),
            claim(2, date(2024, 2, 1), "early"),
        ];

        let history = build_history(&policies, &claims, Currency::USD);
        let dates: Vec<_> = history.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 6, 1), date(2024, 9, 1)]);
    }

    #[test]
    fn test_policy_precedes_claim_on_same_day() {
        let same_day = date(2024, 1, 1);
        let policies = vec![policy(1, same_day, None)];
        let claims = vec![claim(1, same_day, "first-day scratch")];

        let history = build_history(&policies, &claims, Currency::USD);
        let kinds: Vec<_> = history.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![HistoryEventKind::Policy, HistoryEventKind::Claim]);
    }

    #[test]
    fn test_empty_history() {
        assert!(build_history(&[], &[], Currency::USD).is_empty());
    }
}
