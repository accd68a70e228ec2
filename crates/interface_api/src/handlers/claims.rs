//! Claims handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use core_kernel::{CarId, ClaimId};

use crate::dto::claims::{ClaimResponse, CreateClaimRequest};
use crate::handlers::parse_id;
use crate::{error::ApiError, AppState};

/// Registers a claim against a car
///
/// Responds 201 with the stored claim and its location.
pub async fn register_claim(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    payload: Result<Json<CreateClaimRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let car_id: CarId = parse_id(&car_id, "car")?;
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let claim = state.service.register_claim(car_id, request.into()).await?;
    let location = format!("/api/claims/{}", claim.id.value());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClaimResponse::from(claim)),
    ))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(claim_id): Path<String>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim_id: ClaimId = parse_id(&claim_id, "claim")?;
    let claim = state.service.get_claim(claim_id).await?;
    Ok(Json(ClaimResponse::from(claim)))
}
