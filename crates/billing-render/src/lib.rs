//! Rendering layer for the Actions billing report.
//!
//! Formats the aggregates produced by the data layer as aligned plain-text
//! tables. Presentation only: nothing here feeds back into aggregation.

pub mod table;

pub use billing_core as core;
