//! Policy repository implementation
//!
//! Policies are created outside this service, so only reads are offered.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use crate::error::DatabaseError;

/// Repository for reading insurance policies
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::repositories::PolicyRepository;
///
/// let repo = PolicyRepository::new(pool);
/// let policies = repo.find_by_car(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all policies of a car, ordered by policy id
    #[instrument(skip(self))]
    pub async fn find_by_car(&self, car_id: i64) -> Result<Vec<PolicyRow>, DatabaseError> {
        let policies = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT id, car_id, provider, start_date, end_date
            FROM policies
            WHERE car_id = $1
            ORDER BY id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(policies)
    }

    /// Retrieves all policies whose last covered day is `end_date`
    ///
    /// Open-ended policies never match.
    #[instrument(skip(self))]
    pub async fn find_ending_on(&self, end_date: NaiveDate) -> Result<Vec<PolicyRow>, DatabaseError> {
        let policies = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT id, car_id, provider, start_date, end_date
            FROM policies
            WHERE end_date = $1
            ORDER BY id
            "#,
        )
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(policies)
    }
}

/// Database row for a policy
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyRow {
    pub id: i64,
    pub car_id: i64,
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
