//! Request handlers
//!
//! Handlers parse and check the request, call `CarInsuranceService` and map
//! the result to a response. Path ids accept the bare number or the prefixed
//! form (`CAR-1`).

pub mod cars;
pub mod claims;
pub mod history;
pub mod health;

use std::str::FromStr;

use crate::error::ApiError;

/// Parses a path id, reporting a malformed one as a bad request
pub(crate) fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid {} id '{}'", what, raw)))
}
