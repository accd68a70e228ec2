//! Car Insurance Service Tests
//!
//! Exercises `CarInsuranceService` against the in-memory ports:
//! - `validity` - inclusive boundaries, OR across policies, missing cars
//! - `claims` - registration, rejection without persisting, lookup
//! - `history` - ordering, tie-break and descriptions
//! - `properties` - validity against a brute-force predicate, history contents

use core_kernel::{CarId, ClaimId, Currency};
use domain_claims::ClaimPort;
use domain_vehicle::{HistoryEventKind, VehicleError};
use rust_decimal_macros::dec;
use test_utils::{
    assert_history_kinds, assert_history_sorted, assert_policies_first_on_ties, date, ClaimBuilder,
    MockServiceFixture, PolicyBuilder, ReferenceData,
};

// ============================================================================
// VALIDITY
// ============================================================================

mod validity {
    use super::*;

    #[tokio::test]
    async fn test_reference_policy_boundaries() {
        let fixture = MockServiceFixture::reference().await;
        let logan = ReferenceData::logan().id;

        for (day, expected) in [
            (date(2024, 6, 15), true),
            (date(2024, 1, 1), true),
            (date(2024, 12, 31), true),
            (date(2023, 12, 31), false),
            (date(2025, 1, 1), false),
        ] {
            let valid = fixture.service.is_insurance_valid(logan, day).await.unwrap();
            assert_eq!(valid, expected, "validity on {}", day);
        }
    }

    #[tokio::test]
    async fn test_car_without_policies_is_not_covered() {
        let fixture = MockServiceFixture::reference().await;
        fixture
            .vehicles
            .add_car(test_utils::CarBuilder::new(3).owner(ReferenceData::ana().id).build())
            .await;

        let valid = fixture
            .service
            .is_insurance_valid(CarId::new(3), date(2024, 6, 15))
            .await
            .unwrap();
        assert!(!valid);
    }

    #[tokio::test]
    async fn test_any_policy_is_enough() {
        let fixture = MockServiceFixture::reference().await;
        let logan = ReferenceData::logan().id;
        fixture
            .policies
            .insert(PolicyBuilder::new(10, logan).from(date(2026, 1, 1)).ongoing().build())
            .await;

        let service = &fixture.service;
        assert!(service.is_insurance_valid(logan, date(2024, 3, 3)).await.unwrap());
        assert!(!service.is_insurance_valid(logan, date(2025, 6, 1)).await.unwrap());
        assert!(service.is_insurance_valid(logan, date(2040, 1, 1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_car_is_not_found() {
        let fixture = MockServiceFixture::reference().await;

        let result = fixture
            .service
            .is_insurance_valid(ReferenceData::unknown_car(), date(2024, 6, 15))
            .await;
        assert!(matches!(result, Err(VehicleError::CarNotFound(id)) if id == ReferenceData::unknown_car()));
    }
}

// ============================================================================
// CLAIMS
// ============================================================================

mod claims {
    use super::*;

    #[tokio::test]
    async fn test_register_claim_assigns_id() {
        let fixture = MockServiceFixture::reference().await;
        let logan = ReferenceData::logan().id;

        let created = fixture
            .service
            .register_claim(logan, ClaimBuilder::new().amount(dec!(1200.50)).build())
            .await
            .unwrap();

        assert_eq!(created.car_id, logan);
        assert_eq!(created.amount, dec!(1200.50));

        let fetched = fixture.service.get_claim(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_claim_outside_coverage_is_accepted() {
        let fixture = MockServiceFixture::reference().await;

        let result = fixture
            .service
            .register_claim(ReferenceData::logan().id, ClaimBuilder::new().on(date(2019, 5, 5)).build())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_car_persists_nothing() {
        let fixture = MockServiceFixture::reference().await;

        let result = fixture
            .service
            .register_claim(ReferenceData::unknown_car(), ClaimBuilder::new().build())
            .await;

        assert!(matches!(result, Err(VehicleError::CarNotFound(_))));
        assert!(fixture.claims.is_empty().await);
    }

    #[tokio::test]
    async fn test_negative_amount_persists_nothing() {
        let fixture = MockServiceFixture::reference().await;

        let result = fixture
            .service
            .register_claim(ReferenceData::logan().id, ClaimBuilder::new().amount(dec!(-1)).build())
            .await;

        assert!(matches!(result, Err(VehicleError::InvalidClaim(_))));
        assert!(fixture.claims.is_empty().await);
    }

    #[tokio::test]
    async fn test_overlong_description_is_rejected() {
        let fixture = MockServiceFixture::reference().await;
        let description = "x".repeat(domain_claims::MAX_DESCRIPTION_LENGTH + 1);

        let result = fixture
            .service
            .register_claim(ReferenceData::logan().id, ClaimBuilder::new().description(description).build())
            .await;

        assert!(matches!(result, Err(VehicleError::InvalidClaim(_))));
    }

    #[tokio::test]
    async fn test_unknown_claim_is_not_found() {
        let fixture = MockServiceFixture::reference().await;

        let result = fixture.service.get_claim(ClaimId::new(404)).await;
        assert!(matches!(result, Err(VehicleError::ClaimNotFound(id)) if id == ClaimId::new(404)));
    }
}

// ============================================================================
// HISTORY
// ============================================================================

mod history {
    use super::*;

    #[tokio::test]
    async fn test_history_merges_and_sorts() {
        let fixture = MockServiceFixture::reference().await;
        let logan = ReferenceData::logan().id;
        let service = &fixture.service;

        service
            .register_claim(logan, ClaimBuilder::new().on(date(2024, 8, 1)).description("Hail").build())
            .await
            .unwrap();
        service
            .register_claim(logan, ClaimBuilder::new().on(date(2023, 11, 2)).description("Scratch").build())
            .await
            .unwrap();

        let history = service.car_history(logan).await.unwrap();

        assert_history_sorted(&history);
        assert_history_kinds(
            &history,
            &[HistoryEventKind::Claim, HistoryEventKind::Policy, HistoryEventKind::Claim],
        );
        assert_eq!(history[1].description, "Insurance with Allianz (from 2024 to 2024)");
    }

    #[tokio::test]
    async fn test_new_claim_shows_up_in_history() {
        let fixture = MockServiceFixture::reference().await;
        let golf = ReferenceData::golf().id;

        let before = fixture.service.car_history(golf).await.unwrap();
        fixture
            .service
            .register_claim(
                golf,
                ClaimBuilder::new()
                    .on(date(2025, 4, 10))
                    .description("Cracked windshield")
                    .amount(dec!(300))
                    .build(),
            )
            .await
            .unwrap();
        let after = fixture.service.car_history(golf).await.unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert!(after
            .iter()
            .any(|e| e.description == "Claim of $ 300.00 for 'Cracked windshield'"));
    }

    #[tokio::test]
    async fn test_policy_before_claim_on_same_day() {
        let fixture = MockServiceFixture::reference().await;
        let logan = ReferenceData::logan().id;

        // Same day as the Allianz policy start; policies sort first on equal dates
        fixture
            .service
            .register_claim(logan, ClaimBuilder::new().on(date(2024, 1, 1)).build())
            .await
            .unwrap();

        let history = fixture.service.car_history(logan).await.unwrap();
        assert_policies_first_on_ties(&history);
        assert_eq!(history[0].kind, HistoryEventKind::Policy);
    }

    #[tokio::test]
    async fn test_ongoing_policy_description() {
        let fixture = MockServiceFixture::reference().await;
        let golf = ReferenceData::golf().id;
        fixture
            .policies
            .insert(PolicyBuilder::new(3, golf).provider("Groupama").from(date(2025, 10, 1)).ongoing().build())
            .await;

        let history = fixture.service.car_history(golf).await.unwrap();
        assert_eq!(history.last().unwrap().description, "Insurance with Groupama (from 2025 to ongoing)");
    }

    #[tokio::test]
    async fn test_history_uses_configured_currency() {
        let fixture = MockServiceFixture::reference().await;
        let service = fixture.service.clone().with_currency(Currency::EUR);
        let logan = ReferenceData::logan().id;

        fixture
            .claims
            .create_claim(logan, ClaimBuilder::new().amount(dec!(99.9)).description("Mirror").build())
            .await
            .unwrap();

        let history = service.car_history(logan).await.unwrap();
        assert!(history.iter().any(|e| e.description == "Claim of € 99.90 for 'Mirror'"));
    }

    #[tokio::test]
    async fn test_unknown_car_history_is_not_found() {
        let fixture = MockServiceFixture::reference().await;

        let result = fixture.service.car_history(ReferenceData::unknown_car()).await;
        assert!(matches!(result, Err(VehicleError::CarNotFound(_))));
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{claim_amount_strategy, date_strategy, policies_strategy};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn validity_matches_brute_force(
            policies in policies_strategy(CarId::new(1), 4),
            day in date_strategy(),
        ) {
            let expected = policies
                .iter()
                .any(|p| p.start_date() <= day && p.end_date().map_or(true, |end| day <= end));

            let actual = runtime().block_on(async {
                let fixture = MockServiceFixture::empty();
                fixture.vehicles.add_owner(ReferenceData::ana()).await;
                fixture.vehicles.add_car(ReferenceData::logan()).await;
                for policy in policies.clone() {
                    fixture.policies.insert(policy).await;
                }
                fixture.service.is_insurance_valid(CarId::new(1), day).await.unwrap()
            });

            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn history_is_always_sorted(
            policies in policies_strategy(CarId::new(1), 4),
            claim_days in prop::collection::vec(date_strategy(), 0..6),
        ) {
            let history = runtime().block_on(async {
                let fixture = MockServiceFixture::empty();
                fixture.vehicles.add_owner(ReferenceData::ana()).await;
                fixture.vehicles.add_car(ReferenceData::logan()).await;
                for policy in policies.clone() {
                    fixture.policies.insert(policy).await;
                }
                for day in &claim_days {
                    fixture
                        .service
                        .register_claim(CarId::new(1), ClaimBuilder::new().on(*day).build())
                        .await
                        .unwrap();
                }
                fixture.service.car_history(CarId::new(1)).await.unwrap()
            });

            prop_assert_eq!(history.len(), policies.len() + claim_days.len());
            assert_history_sorted(&history);
            assert_policies_first_on_ties(&history);
        }

        #[test]
        fn registered_claim_is_described_in_history(
            amount in claim_amount_strategy(),
            day in date_strategy(),
        ) {
            let history = runtime().block_on(async {
                let fixture = MockServiceFixture::reference().await;
                let claim = ClaimBuilder::new().on(day).description("Hail").amount(amount).build();
                fixture.service.register_claim(CarId::new(2), claim).await.unwrap();
                fixture.service.car_history(CarId::new(2)).await.unwrap()
            });

            let expected = format!("Claim of $ {:.2} for 'Hail'", amount);
            prop_assert!(
                history.iter().any(|e| e.kind == HistoryEventKind::Claim && e.description == expected && e.date == day),
                "missing {:?} in {:?}", expected, history
            );
        }
    }
}
