//! PostgreSQL Policy Adapter

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    CarId, CoveragePeriod, DomainPort, HealthCheckResult, HealthCheckable, PolicyId, PortError,
};
use domain_policy::{InsurancePolicy, PolicyPort};

use crate::error::DatabaseError;
use crate::repositories::policy::{PolicyRepository, PolicyRow};

/// PostgreSQL-backed implementation of the PolicyPort trait
///
/// Rows whose dates are inverted are reported as internal errors rather
/// than silently skipped; the schema's check constraint keeps them out.
#[derive(Debug, Clone)]
pub struct PostgresPolicyAdapter {
    repository: PolicyRepository,
    pool: PgPool,
}

impl PostgresPolicyAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PolicyRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresPolicyAdapter {}

#[async_trait]
impl HealthCheckable for PostgresPolicyAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-policy-adapter").await
    }
}

#[async_trait]
impl PolicyPort for PostgresPolicyAdapter {
    #[instrument(skip_all, fields(car_id = %car_id))]
    async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.repository.find_by_car(car_id.value()).await?;
        debug!(count = rows.len(), "Fetched policies");
        rows_to_policies(rows)
    }

    #[instrument(skip_all, fields(end_date = %date))]
    async fn policies_ending_on(&self, date: NaiveDate) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.repository.find_ending_on(date).await?;
        debug!(count = rows.len(), "Fetched policies ending on date");
        rows_to_policies(rows)
    }
}

fn rows_to_policies(rows: Vec<PolicyRow>) -> Result<Vec<InsurancePolicy>, PortError> {
    rows.into_iter().map(row_to_policy).collect()
}

fn row_to_policy(row: PolicyRow) -> Result<InsurancePolicy, PortError> {
    let period = CoveragePeriod::new(row.start_date, row.end_date)
        .map_err(|e| DatabaseError::CorruptRow(format!("policy {}: {}", row.id, e)))?;

    Ok(InsurancePolicy {
        id: PolicyId::new(row.id),
        car_id: CarId::new(row.car_id),
        provider: row.provider,
        period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(start: NaiveDate, end: Option<NaiveDate>) -> PolicyRow {
        PolicyRow {
            id: 1,
            car_id: 1,
            provider: "Allianz".to_string(),
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_row_to_policy() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        let policy = row_to_policy(row(start, Some(end))).unwrap();
        assert_eq!(policy.id, PolicyId::new(1));
        assert_eq!(policy.start_date(), start);
        assert_eq!(policy.end_date(), Some(end));
    }

    #[test]
    fn test_inverted_row_is_internal_error() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let err = row_to_policy(row(start, Some(end))).unwrap_err();
        assert!(matches!(err, PortError::Internal { .. }));
    }
}
