//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_vehicle::{HistoryEvent, HistoryEventKind};

/// Asserts that history events never go back in time
///
/// # Panics
///
/// Panics at the first pair of events out of date order
pub fn assert_history_sorted(history: &[HistoryEvent]) {
    for (index, pair) in history.windows(2).enumerate() {
        assert!(
            pair[0].date <= pair[1].date,
            "History out of order at {}: {} ({}) comes before {} ({})",
            index,
            pair[0].date,
            pair[0].kind,
            pair[1].date,
            pair[1].kind
        );
    }
}

/// Asserts that on every date, policy events precede claim events
pub fn assert_policies_first_on_ties(history: &[HistoryEvent]) {
    for pair in history.windows(2) {
        if pair[0].date == pair[1].date {
            assert!(
                !(pair[0].kind == HistoryEventKind::Claim && pair[1].kind == HistoryEventKind::Policy),
                "Claim listed before policy on {}: '{}' then '{}'",
                pair[0].date,
                pair[0].description,
                pair[1].description
            );
        }
    }
}

/// Asserts that the history kinds match `expected`, in order
pub fn assert_history_kinds(history: &[HistoryEvent], expected: &[HistoryEventKind]) {
    let actual: Vec<HistoryEventKind> = history.iter().map(|e| e.kind).collect();
    assert_eq!(actual, expected, "History kinds differ: {:?}", history);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::date;

    fn event(kind: HistoryEventKind, day: u32) -> HistoryEvent {
        HistoryEvent {
            kind,
            description: String::new(),
            date: date(2024, 1, day),
        }
    }

    #[test]
    fn test_sorted_history_passes() {
        let history = vec![
            event(HistoryEventKind::Policy, 1),
            event(HistoryEventKind::Claim, 1),
            event(HistoryEventKind::Claim, 2),
        ];
        assert_history_sorted(&history);
        assert_policies_first_on_ties(&history);
    }

    #[test]
    #[should_panic(expected = "History out of order")]
    fn test_unsorted_history_panics() {
        assert_history_sorted(&[event(HistoryEventKind::Claim, 2), event(HistoryEventKind::Claim, 1)]);
    }

    #[test]
    #[should_panic(expected = "Claim listed before policy")]
    fn test_claim_before_policy_panics() {
        assert_policies_first_on_ties(&[event(HistoryEventKind::Claim, 1), event(HistoryEventKind::Policy, 1)]);
    }
}
