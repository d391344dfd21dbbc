//! HTTP adapters - REST API implementations.

pub mod planner;

pub use planner::{planner_router, PlannerAppState};
