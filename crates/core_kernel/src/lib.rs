//! Core Kernel - Foundational types shared by the car insurance crates
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for owners, cars, policies and claims
//! - Currencies and the way amounts are shown
//! - Coverage periods and the `YYYY-MM-DD` wire date format
//! - Port traits and errors for the storage adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError, MINOR_UNIT_DIGITS};
pub use temporal::{CoveragePeriod, TemporalError, Timezone, parse_wire_date, WIRE_DATE_FORMAT};
pub use identifiers::{OwnerId, CarId, PolicyId, ClaimId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
