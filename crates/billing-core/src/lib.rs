//! Core domain types for the Actions billing report.
//!
//! Holds the typed row model, the per-group accumulators, the report date
//! range and the error taxonomy used across the workspace.

pub mod error;
pub mod models;
pub mod ordered;
