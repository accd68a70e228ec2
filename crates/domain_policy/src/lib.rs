//! Insurance Policy Domain
//!
//! Policies are issued elsewhere and only read here. This crate answers two
//! questions about them:
//! - is a car covered on a given day (`policy::any_policy_covers`)
//! - which policies ran out yesterday (`expiration::ExpirationSweeper`)
//!
//! # Coverage rule
//!
//! ```text
//! start <= date && (end is None || date <= end)
//! ```

pub mod policy;
pub mod ports;
pub mod expiration;
pub mod error;

pub use policy::{InsurancePolicy, any_policy_covers};
pub use ports::PolicyPort;
pub use expiration::{
    ExpirationSweeper, ExpirationSweeperHandle, ExpiredPolicyNotice, SweeperConfig,
    SweeperStats, Clock, SystemClock, expiration_reference_date, DEFAULT_SWEEP_INTERVAL,
};
pub use error::PolicyError;
