//! Request and response bodies
//!
//! All bodies use camelCase field names and `YYYY-MM-DD` dates.

pub mod cars;
pub mod claims;
pub mod history;

pub mod wire_date {
    //! Strict `YYYY-MM-DD` deserialization for request dates

    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    use core_kernel::parse_wire_date;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_wire_date(&raw).map_err(serde::de::Error::custom)
    }
}
