//! Insurance Claims Domain
//!
//! Claims are append-only: they are registered against a car and never
//! updated or removed.

pub mod claim;
pub mod ports;
pub mod error;

pub use claim::{
    amount_limit, InsuranceClaim, NewClaim, MAX_AMOUNT_INTEGER_DIGITS, MAX_DESCRIPTION_LENGTH,
};
pub use ports::ClaimPort;
pub use error::ClaimError;
