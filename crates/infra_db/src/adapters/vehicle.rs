//! PostgreSQL Vehicle Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CarId, DomainPort, HealthCheckResult, HealthCheckable, OwnerId, PortError};
use domain_vehicle::{CarSummary, VehiclePort};

use crate::repositories::vehicle::{CarWithOwnerRow, VehicleRepository};

/// PostgreSQL-backed implementation of the VehiclePort trait
#[derive(Debug, Clone)]
pub struct PostgresVehicleAdapter {
    repository: VehicleRepository,
    pool: PgPool,
}

impl PostgresVehicleAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresVehicleAdapter {}

#[async_trait]
impl HealthCheckable for PostgresVehicleAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-vehicle-adapter").await
    }
}

#[async_trait]
impl VehiclePort for PostgresVehicleAdapter {
    #[instrument(skip(self))]
    async fn list_car_summaries(&self) -> Result<Vec<CarSummary>, PortError> {
        let rows = self.repository.list_with_owner().await?;
        debug!(count = rows.len(), "Fetched cars");
        Ok(rows.into_iter().map(row_to_summary).collect())
    }

    #[instrument(skip_all, fields(car_id = %id))]
    async fn car_exists(&self, id: CarId) -> Result<bool, PortError> {
        Ok(self.repository.exists(id.value()).await?)
    }
}

fn row_to_summary(row: CarWithOwnerRow) -> CarSummary {
    CarSummary {
        id: CarId::new(row.id),
        vin: row.vin,
        make: row.make,
        model: row.model,
        year_of_manufacture: row.year_of_manufacture,
        owner_id: OwnerId::new(row.owner_id),
        owner_name: row.owner_name,
        owner_email: row.owner_email,
    }
}
