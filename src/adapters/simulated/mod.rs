//! Simulated adapters standing in for real device and profile services.
//!
//! Both wait a fixed delay, then succeed or return an injected failure.

mod device_linker;
mod profile_submitter;

pub use device_linker::{SimulatedDeviceLinker, DEFAULT_CONNECT_DELAY};
pub use profile_submitter::{SimulatedProfileSubmitter, DEFAULT_SUBMIT_DELAY};
