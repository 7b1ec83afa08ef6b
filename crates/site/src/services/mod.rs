//! Services the route handlers depend on.

pub mod in_flight;
pub mod leads;
pub mod visitors;

pub use in_flight::{InFlight, InFlightGuard};
pub use leads::{LeadDesk, LeadError, LeadFuture, Receipt, SimulatedDesk};
pub use visitors::{StoredForm, VisitorRecord, VisitorStore};
