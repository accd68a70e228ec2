//! Policy Domain Ports
//!
//! `PolicyPort` is everything the validity check, the history view and the
//! expiration sweeper need to read about policies. The PostgreSQL adapter
//! lives in `infra_db`; an in-memory adapter is available under the `mock`
//! feature.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{CarId, DomainPort, HealthCheckable, PortError};

use crate::policy::InsurancePolicy;

/// Read access to insurance policies
#[async_trait]
pub trait PolicyPort: DomainPort + HealthCheckable {
    /// Returns all policies of a car, ordered by policy id
    async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError>;

    /// Returns all policies whose last covered day is `date`, ordered by policy id
    async fn policies_ending_on(&self, date: NaiveDate) -> Result<Vec<InsurancePolicy>, PortError>;
}

/// Mock implementation of PolicyPort for testing
///
/// Stores policies in memory, useful for unit testing without a database.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{CoveragePeriod, HealthCheckResult, PolicyId};

    /// In-memory mock implementation of PolicyPort
    #[derive(Debug, Default, Clone)]
    pub struct MockPolicyPort {
        policies: Arc<RwLock<Vec<InsurancePolicy>>>,
    }

    impl MockPolicyPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with policies for testing
        pub async fn with_policies(policies: Vec<InsurancePolicy>) -> Self {
            let port = Self::new();
            for policy in policies {
                port.insert(policy).await;
            }
            port
        }

        /// Stores a policy as given
        pub async fn insert(&self, policy: InsurancePolicy) {
            self.policies.write().await.push(policy);
        }

        /// Stores a policy under the next free id and returns it
        pub async fn add(
            &self,
            car_id: CarId,
            provider: &str,
            period: CoveragePeriod,
        ) -> InsurancePolicy {
            let mut policies = self.policies.write().await;
            let next_id = policies.iter().map(|p| p.id.value()).max().unwrap_or(0) + 1;
            let policy = InsurancePolicy {
                id: PolicyId::new(next_id),
                car_id,
                provider: provider.to_string(),
                period,
            };
            policies.push(policy.clone());
            policy
        }
    }

    impl DomainPort for MockPolicyPort {}

    #[async_trait]
    impl HealthCheckable for MockPolicyPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-policy-port")
        }
    }

    #[async_trait]
    impl PolicyPort for MockPolicyPort {
        async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
            let mut found: Vec<_> = self
                .policies
                .read()
                .await
                .iter()
                .filter(|p| p.car_id == car_id)
                .cloned()
                .collect();
            found.sort_by_key(|p| p.id);
            Ok(found)
        }

        async fn policies_ending_on(&self, date: NaiveDate) -> Result<Vec<InsurancePolicy>, PortError> {
            let mut found: Vec<_> = self
                .policies
                .read()
                .await
                .iter()
                .filter(|p| p.expires_on(date))
                .cloned()
                .collect();
            found.sort_by_key(|p| p.id);
            Ok(found)
        }
    }
}
