//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the schema-evolution
//! machinery that form the vocabulary of the HealthTrack domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;
mod upcaster;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{DeviceId, SessionId, SubjectId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use upcaster::{UpcastError, Upcaster, UpcasterRegistry};
