//! Car DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use domain_vehicle::CarSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: i64,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl From<CarSummary> for CarResponse {
    fn from(car: CarSummary) -> Self {
        Self {
            id: car.id.value(),
            vin: car.vin,
            make: car.make,
            model: car.model,
            year_of_manufacture: car.year_of_manufacture,
            owner_id: car.owner_id.value(),
            owner_name: car.owner_name,
            owner_email: car.owner_email,
        }
    }
}

/// Query string of the validity check
///
/// `date` is optional here so that a missing date is reported as a 400 with
/// a JSON body, like a malformed one.
#[derive(Debug, Deserialize)]
pub struct ValidityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityResponse {
    pub car_id: i64,
    pub date: NaiveDate,
    pub valid: bool,
}
