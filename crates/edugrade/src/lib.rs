//! Quality scoring, improvement suggestions, and paginated reports for educational
//! app evaluations.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
