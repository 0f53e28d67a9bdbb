//! Domain layer containing the profile, wizard and session rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, upcasters)
//! - `profile` - Draft and committed health profiles, BMI, device catalogs
//! - `wizard` - Wizard steps, persisted wizard state and the step validator
//! - `session` - Session records, roles and credential form rules
//! - `routing` - Route table and access policy

pub mod foundation;
pub mod profile;
pub mod routing;
pub mod session;
pub mod wizard;
