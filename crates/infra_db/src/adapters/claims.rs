//! PostgreSQL Claim Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CarId, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{ClaimPort, InsuranceClaim, NewClaim};

use crate::repositories::claims::{ClaimRow, ClaimsRepository, NewClaimRow};

/// PostgreSQL-backed implementation of the ClaimPort trait
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-claim-adapter").await
    }
}

#[async_trait]
impl ClaimPort for PostgresClaimAdapter {
    #[instrument(skip_all, fields(car_id = %car_id))]
    async fn create_claim(&self, car_id: CarId, claim: NewClaim) -> Result<InsuranceClaim, PortError> {
        let row = self
            .repository
            .insert(NewClaimRow {
                car_id: car_id.value(),
                claim_date: claim.claim_date,
                description: claim.description,
                amount: claim.amount,
            })
            .await?;

        debug!(claim_id = row.id, "Inserted claim");
        Ok(row_to_claim(row))
    }

    #[instrument(skip_all, fields(claim_id = %id))]
    async fn get_claim(&self, id: ClaimId) -> Result<InsuranceClaim, PortError> {
        let row = self.repository.get_by_id(id.value()).await?;
        Ok(row_to_claim(row))
    }

    #[instrument(skip_all, fields(car_id = %car_id))]
    async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError> {
        let rows = self.repository.find_by_car(car_id.value()).await?;
        Ok(rows.into_iter().map(row_to_claim).collect())
    }
}

fn row_to_claim(row: ClaimRow) -> InsuranceClaim {
    InsuranceClaim {
        id: ClaimId::new(row.id),
        car_id: CarId::new(row.car_id),
        claim_date: row.claim_date,
        description: row.description,
        amount: row.amount,
    }
}
