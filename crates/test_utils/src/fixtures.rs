//! Pre-built Test Fixtures
//!
//! The reference data set (the same rows the initial migration seeds) and a
//! `CarInsuranceService` wired to in-memory ports holding it.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{CarId, CoveragePeriod, Currency, OwnerId, PolicyId};
use domain_claims::ports::mock::MockClaimPort;
use domain_policy::ports::mock::MockPolicyPort;
use domain_policy::InsurancePolicy;
use domain_vehicle::ports::mock::MockVehiclePort;
use domain_vehicle::{Car, CarInsuranceService, Owner};

/// Builds a date, panicking on an impossible one
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

/// Fixture for the seeded owners, cars and policies
pub struct ReferenceData;

impl ReferenceData {
    pub fn ana() -> Owner {
        Owner::new(OwnerId::new(1), "Ana Pop", Some("ana.pop@example.com".to_string()))
    }

    pub fn bogdan() -> Owner {
        Owner::new(OwnerId::new(2), "Bogdan Ionescu", Some("bogdan.ionescu@example.com".to_string()))
    }

    pub fn owners() -> Vec<Owner> {
        vec![Self::ana(), Self::bogdan()]
    }

    /// Dacia Logan 2018, owned by Ana
    pub fn logan() -> Car {
        Car {
            id: CarId::new(1),
            vin: "VIN12345".to_string(),
            make: "Dacia".to_string(),
            model: "Logan".to_string(),
            year_of_manufacture: 2018,
            owner_id: OwnerId::new(1),
        }
    }

    /// VW Golf 2021, owned by Bogdan
    pub fn golf() -> Car {
        Car {
            id: CarId::new(2),
            vin: "VIN67890".to_string(),
            make: "VW".to_string(),
            model: "Golf".to_string(),
            year_of_manufacture: 2021,
            owner_id: OwnerId::new(2),
        }
    }

    pub fn cars() -> Vec<Car> {
        vec![Self::logan(), Self::golf()]
    }

    /// Allianz, 2024-01-01..2024-12-31, on the Logan
    pub fn logan_policy() -> InsurancePolicy {
        InsurancePolicy {
            id: PolicyId::new(1),
            car_id: CarId::new(1),
            provider: "Allianz".to_string(),
            period: CoveragePeriod::bounded(date(2024, 1, 1), date(2024, 12, 31))
                .unwrap_or_else(|err| panic!("invalid fixture period: {err}")),
        }
    }

    /// Allianz, 2025-03-01..2025-09-30, on the Golf
    pub fn golf_policy() -> InsurancePolicy {
        InsurancePolicy {
            id: PolicyId::new(2),
            car_id: CarId::new(2),
            provider: "Allianz".to_string(),
            period: CoveragePeriod::bounded(date(2025, 3, 1), date(2025, 9, 30))
                .unwrap_or_else(|err| panic!("invalid fixture period: {err}")),
        }
    }

    pub fn policies() -> Vec<InsurancePolicy> {
        vec![Self::logan_policy(), Self::golf_policy()]
    }

    /// A car id not present in the reference data
    pub fn unknown_car() -> CarId {
        CarId::new(999)
    }
}

/// Mock ports behind a service, kept so tests can inspect or extend them
#[derive(Clone)]
pub struct MockServiceFixture {
    pub vehicles: MockVehiclePort,
    pub policies: MockPolicyPort,
    pub claims: MockClaimPort,
    pub service: CarInsuranceService,
}

impl MockServiceFixture {
    /// Service over empty ports
    pub fn empty() -> Self {
        Self::from_ports(MockVehiclePort::new(), MockPolicyPort::new(), MockClaimPort::new())
    }

    /// Service over the reference data set
    pub async fn reference() -> Self {
        let vehicles = MockVehiclePort::with_data(ReferenceData::owners(), ReferenceData::cars()).await;
        let policies = MockPolicyPort::with_policies(ReferenceData::policies()).await;
        Self::from_ports(vehicles, policies, MockClaimPort::new())
    }

    fn from_ports(vehicles: MockVehiclePort, policies: MockPolicyPort, claims: MockClaimPort) -> Self {
        let service = CarInsuranceService::new(
            Arc::new(vehicles.clone()),
            Arc::new(policies.clone()),
            Arc::new(claims.clone()),
        )
        .with_currency(Currency::USD);

        Self {
            vehicles,
            policies,
            claims,
            service,
        }
    }
}
