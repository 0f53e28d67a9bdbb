//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - Key/value stores and the draft, profile and session stores on top
//! - `notify` - Notifier implementations
//! - `simulated` - Fixed-delay device linker and profile submitter
//! - `wiring` - Wizard ports built from configuration

pub mod notify;
pub mod simulated;
pub mod storage;
pub mod wiring;

pub use wiring::WizardWiring;
