//! HealthTrack - profile completion and route gating for the HealthTrack client
//!
//! This crate implements the five-step health-profile wizard with durable
//! draft persistence, the committed-profile editor and the session gate that
//! protects the doctor portal.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
