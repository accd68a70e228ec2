//! Car insurance service
//!
//! `CarInsuranceService` is the validity and history engine behind the HTTP
//! API. It keeps no state between calls: every operation reads the ports and
//! returns.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use core_kernel::{CarId, ClaimId, Currency, HealthCheckResult};
use domain_claims::{ClaimPort, InsuranceClaim, NewClaim};
use domain_policy::{any_policy_covers, PolicyPort};

use crate::car::CarSummary;
use crate::error::VehicleError;
use crate::history::{build_history, HistoryEvent};
use crate::ports::VehiclePort;

/// Validity checks, claim registration and history for cars
#[derive(Clone)]
pub struct CarInsuranceService {
    vehicles: Arc<dyn VehiclePort>,
    policies: Arc<dyn PolicyPort>,
    claims: Arc<dyn ClaimPort>,
    /// Currency used when rendering claim amounts in history descriptions
    currency: Currency,
}

impl CarInsuranceService {
    /// Creates a service rendering amounts in USD
    pub fn new(
        vehicles: Arc<dyn VehiclePort>,
        policies: Arc<dyn PolicyPort>,
        claims: Arc<dyn ClaimPort>,
    ) -> Self {
        Self {
            vehicles,
            policies,
            claims,
            currency: Currency::USD,
        }
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Shared handle to the policy port, used to drive the expiration sweeper
    pub fn policy_port(&self) -> Arc<dyn PolicyPort> {
        Arc::clone(&self.policies)
    }

    /// Lists every car with its owner, ordered by car id
    #[instrument(skip_all)]
    pub async fn list_cars(&self) -> Result<Vec<CarSummary>, VehicleError> {
        let cars = self.vehicles.list_car_summaries().await?;
        debug!(count = cars.len(), "Listed cars");
        Ok(cars)
    }

    /// Returns true if at least one policy of the car covers `date`
    ///
    /// # Errors
    ///
    /// `VehicleError::CarNotFound` if the car does not exist.
    #[instrument(skip_all, fields(car_id = %car_id, date = %date))]
    pub async fn is_insurance_valid(&self, car_id: CarId, date: NaiveDate) -> Result<bool, VehicleError> {
        self.ensure_car_exists(car_id).await?;

        let policies = self.policies.policies_for_car(car_id).await?;
        let valid = any_policy_covers(&policies, date);

        debug!(policies = policies.len(), valid, "Checked insurance validity");
        Ok(valid)
    }

    /// Validates and stores a new claim for a car
    ///
    /// Nothing is stored when the car is missing or the claim data is
    /// rejected. The claim date is not compared with the car's policies.
    #[instrument(skip_all, fields(car_id = %car_id))]
    pub async fn register_claim(&self, car_id: CarId, claim: NewClaim) -> Result<InsuranceClaim, VehicleError> {
        self.ensure_car_exists(car_id).await?;
        claim.validate()?;

        let created = self.claims.create_claim(car_id, claim).await?;
        info!(claim_id = %created.id, amount = %created.amount, "Claim registered");
        Ok(created)
    }

    /// Retrieves a claim by id
    #[instrument(skip_all, fields(claim_id = %claim_id))]
    pub async fn get_claim(&self, claim_id: ClaimId) -> Result<InsuranceClaim, VehicleError> {
        self.claims.get_claim(claim_id).await.map_err(|err| {
            if err.is_not_found() {
                VehicleError::ClaimNotFound(claim_id)
            } else {
                VehicleError::Store(err)
            }
        })
    }

    /// Returns the car's policies and claims as one date-ordered timeline
    #[instrument(skip_all, fields(car_id = %car_id))]
    pub async fn car_history(&self, car_id: CarId) -> Result<Vec<HistoryEvent>, VehicleError> {
        self.ensure_car_exists(car_id).await?;

        let policies = self.policies.policies_for_car(car_id).await?;
        let claims = self.claims.claims_for_car(car_id).await?;

        let history = build_history(&policies, &claims, self.currency);
        debug!(events = history.len(), "Built car history");
        Ok(history)
    }

    /// Runs the health check of every port
    pub async fn health_check(&self) -> Vec<HealthCheckResult> {
        vec![
            self.vehicles.health_check().await,
            self.policies.health_check().await,
            self.claims.health_check().await,
        ]
    }

    async fn ensure_car_exists(&self, car_id: CarId) -> Result<(), VehicleError> {
        if self.vehicles.car_exists(car_id).await? {
            Ok(())
        } else {
            Err(VehicleError::CarNotFound(car_id))
        }
    }
}

impl std::fmt::Debug for CarInsuranceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarInsuranceService")
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}
