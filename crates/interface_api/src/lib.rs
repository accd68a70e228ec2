//! HTTP API Layer
//!
//! The REST API of the car insurance records service, using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: parse requests and call `CarInsuranceService`
//! - **Middleware**: request ids, tracing, request logging
//! - **DTOs**: camelCase request/response bodies
//! - **Error Handling**: 404 with an empty body, JSON `{error, message}` otherwise
//!
//! # Routes
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/api/cars` | cars with owners |
//! | GET | `/api/cars/:car_id/insurance-valid?date=YYYY-MM-DD` | validity check |
//! | POST | `/api/:car_id/claims` | register a claim |
//! | GET | `/api/claims/:claim_id` | one claim |
//! | GET | `/api/:car_id/history` | policies and claims by date |
//! | GET | `/health`, `/health/ready` | liveness, readiness |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_vehicle::CarInsuranceService;

use crate::handlers::{cars, claims, health, history};
use crate::middleware::log_requests;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CarInsuranceService,
}

/// Creates the main API router
///
/// Layers, outermost first: request id assignment, HTTP tracing, request id
/// propagation to the response, CORS, request logging.
pub fn create_router(service: CarInsuranceService) -> Router {
    let state = AppState { service };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/cars", get(cars::list_cars))
        .route("/cars/:car_id/insurance-valid", get(cars::check_insurance_validity))
        .route("/claims/:claim_id", get(claims::get_claim))
        .route("/:car_id/claims", post(claims::register_claim))
        .route("/:car_id/history", get(history::get_history));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(axum_middleware::from_fn(log_requests)),
        )
        .with_state(state)
}
