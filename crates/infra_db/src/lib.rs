//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the car insurance records, using SQLx.
//!
//! # Architecture
//!
//! - `pool`: connection pool configuration and schema migrations
//! - `repositories`: SQL queries returning plain row types
//! - `adapters`: implementations of the domain ports on top of the
//!   repositories, translating rows and errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresPolicyAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/car_insurance")).await?;
//! run_migrations(&pool).await?;
//! let policies = PostgresPolicyAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresVehicleAdapter, PostgresPolicyAdapter, PostgresClaimAdapter};
