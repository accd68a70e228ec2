//! Claims Domain Ports
//!
//! `ClaimPort` appends and reads claims. Implementations must make
//! `create_claim` all-or-nothing: either the whole record is stored and
//! returned with its id, or nothing is.

use async_trait::async_trait;

use core_kernel::{CarId, ClaimId, DomainPort, HealthCheckable, PortError};

use crate::claim::{InsuranceClaim, NewClaim};

/// Storage access for claims
#[async_trait]
pub trait ClaimPort: DomainPort + HealthCheckable {
    /// Stores a claim for a car and returns it with its assigned id
    async fn create_claim(&self, car_id: CarId, claim: NewClaim) -> Result<InsuranceClaim, PortError>;

    /// Retrieves a claim by id, or `PortError::NotFound`
    async fn get_claim(&self, id: ClaimId) -> Result<InsuranceClaim, PortError>;

    /// Returns all claims of a car, ordered by claim id
    async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError>;
}

/// Mock implementation of ClaimPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// In-memory mock implementation of ClaimPort
    #[derive(Debug, Default, Clone)]
    pub struct MockClaimPort {
        claims: Arc<RwLock<Vec<InsuranceClaim>>>,
    }

    impl MockClaimPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of stored claims
        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.claims.read().await.is_empty()
        }
    }

    impl DomainPort for MockClaimPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-claim-port")
        }
    }

    #[async_trait]
    impl ClaimPort for MockClaimPort {
        async fn create_claim(&self, car_id: CarId, claim: NewClaim) -> Result<InsuranceClaim, PortError> {
            let mut claims = self.claims.write().await;
            let next_id = claims.iter().map(|c| c.id.value()).max().unwrap_or(0) + 1;
            let stored = claim.into_claim(ClaimId::new(next_id), car_id);
            claims.push(stored.clone());
            Ok(stored)
        }

        async fn get_claim(&self, id: ClaimId) -> Result<InsuranceClaim, PortError> {
            self.claims
                .read()
                .await
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError> {
            let mut found: Vec<_> = self
                .claims
                .read()
                .await
                .iter()
                .filter(|c| c.car_id == car_id)
                .cloned()
                .collect();
            found.sort_by_key(|c| c.id);
            Ok(found)
        }
    }
}
