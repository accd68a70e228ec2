//! Repository implementations for the stored entities
//!
//! Repositories encapsulate SQL queries and return plain row types; the
//! adapters in `crate::adapters` turn rows into domain values.
//!
//! Queries are built at runtime with `sqlx::query_as` and `FromRow` rows, so
//! the crate builds without a live database or an offline query cache.

pub mod vehicle;
pub mod policy;
pub mod claims;

pub use vehicle::VehicleRepository;
pub use policy::PolicyRepository;
pub use claims::ClaimsRepository;
