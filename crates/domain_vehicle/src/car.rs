//! Cars and the owner-joined listing view

use serde::{Deserialize, Serialize};

use core_kernel::{CarId, OwnerId};
use crate::owner::Owner;

/// A registered car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    /// Vehicle identification number, unique per car
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: OwnerId,
}

/// A car joined with its owner, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSummary {
    pub id: CarId,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: OwnerId,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl CarSummary {
    /// Joins a car with its owner
    ///
    /// The caller is responsible for passing the car's own owner.
    pub fn from_parts(car: Car, owner: &Owner) -> Self {
        debug_assert_eq!(car.owner_id, owner.id);

        Self {
            id: car.id,
            vin: car.vin,
            make: car.make,
            model: car.model,
            year_of_manufacture: car.year_of_manufacture,
            owner_id: car.owner_id,
            owner_name: owner.name.clone(),
            owner_email: owner.email.clone(),
        }
    }
}
