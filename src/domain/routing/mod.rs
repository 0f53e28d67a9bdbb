//! Routing module - the route table and its access policy.

mod policy;
mod route;

pub use policy::{AccessPolicy, RouteDecision};
pub use route::{Resolved, Route};
