//! BDD step definitions for fieldwatch

pub mod dashboard_steps;
pub mod lifecycle_steps;
