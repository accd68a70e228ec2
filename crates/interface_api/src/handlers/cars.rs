//! Car handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use core_kernel::{parse_wire_date, CarId};

use crate::dto::cars::{CarResponse, ValidityQuery, ValidityResponse};
use crate::handlers::parse_id;
use crate::{error::ApiError, AppState};

/// Lists all cars with their owners
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let cars = state.service.list_cars().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Checks whether a car is insured on a given date
///
/// `date` is required and must be `YYYY-MM-DD`.
pub async fn check_insurance_validity(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    Query(query): Query<ValidityQuery>,
) -> Result<Json<ValidityResponse>, ApiError> {
    let car_id: CarId = parse_id(&car_id, "car")?;

    let raw_date = query
        .date
        .ok_or_else(|| ApiError::BadRequest("query parameter 'date' is required".to_string()))?;
    let date = parse_wire_date(&raw_date).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let valid = state.service.is_insurance_valid(car_id, date).await?;

    Ok(Json(ValidityResponse {
        car_id: car_id.value(),
        date,
        valid,
    }))
}
