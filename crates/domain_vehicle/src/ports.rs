//! Vehicle Domain Ports
//!
//! Cars and owners are registered outside this service, so `VehiclePort` is
//! read-only.

use async_trait::async_trait;

use core_kernel::{CarId, DomainPort, HealthCheckable, PortError};

use crate::car::CarSummary;

/// Read access to cars and their owners
#[async_trait]
pub trait VehiclePort: DomainPort + HealthCheckable {
    /// Lists every car joined with its owner, ordered by car id
    async fn list_car_summaries(&self) -> Result<Vec<CarSummary>, PortError>;

    /// Returns true if a car with this id exists
    async fn car_exists(&self, id: CarId) -> Result<bool, PortError>;
}

/// Mock implementation of VehiclePort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{HealthCheckResult, OwnerId};
    use crate::car::Car;
    use crate::owner::Owner;

    /// In-memory mock implementation of VehiclePort
    #[derive(Debug, Default, Clone)]
    pub struct MockVehiclePort {
        owners: Arc<RwLock<BTreeMap<OwnerId, Owner>>>,
        cars: Arc<RwLock<BTreeMap<CarId, Car>>>,
    }

    impl MockVehiclePort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with owners and cars for testing
        pub async fn with_data(owners: Vec<Owner>, cars: Vec<Car>) -> Self {
            let port = Self::new();
            for owner in owners {
                port.add_owner(owner).await;
            }
            for car in cars {
                port.add_car(car).await;
            }
            port
        }

        pub async fn add_owner(&self, owner: Owner) {
            self.owners.write().await.insert(owner.id, owner);
        }

        pub async fn add_car(&self, car: Car) {
            self.cars.write().await.insert(car.id, car);
        }
    }

    impl DomainPort for MockVehiclePort {}

    #[async_trait]
    impl HealthCheckable for MockVehiclePort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-vehicle-port")
        }
    }

    #[async_trait]
    impl VehiclePort for MockVehiclePort {
        async fn list_car_summaries(&self) -> Result<Vec<CarSummary>, PortError> {
            let owners = self.owners.read().await;
            let cars = self.cars.read().await;

            cars.values()
                .map(|car| {
                    let owner = owners
                        .get(&car.owner_id)
                        .ok_or_else(|| PortError::not_found("Owner", car.owner_id))?;
                    Ok(CarSummary::from_parts(car.clone(), owner))
                })
                .collect()
        }

        async fn car_exists(&self, id: CarId) -> Result<bool, PortError> {
            Ok(self.cars.read().await.contains_key(&id))
        }
    }
}
