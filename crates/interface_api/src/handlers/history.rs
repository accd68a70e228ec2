//! History handler

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::CarId;

use crate::dto::history::HistoryEventResponse;
use crate::handlers::parse_id;
use crate::{error::ApiError, AppState};

/// Returns a car's policies and claims in date order
pub async fn get_history(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<Vec<HistoryEventResponse>>, ApiError> {
    let car_id: CarId = parse_id(&car_id, "car")?;
    let history = state.service.car_history(car_id).await?;
    Ok(Json(history.into_iter().map(HistoryEventResponse::from).collect()))
}
