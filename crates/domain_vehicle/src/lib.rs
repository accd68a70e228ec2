//! Vehicle Domain
//!
//! Cars, their owners and the car insurance service:
//! - `services::CarInsuranceService` checks validity, registers claims and
//!   builds the per-car history
//! - `history` turns policies and claims into dated events
//! - `ports::VehiclePort` is the read access to cars and owners

pub mod owner;
pub mod car;
pub mod history;
pub mod ports;
pub mod services;
pub mod error;

pub use owner::Owner;
pub use car::{Car, CarSummary};
pub use history::{HistoryEvent, HistoryEventKind, build_history, describe_policy};
pub use ports::VehiclePort;
pub use services::CarInsuranceService;
pub use error::VehicleError;
