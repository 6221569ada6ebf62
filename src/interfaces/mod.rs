//! Adapters between the outside world and the application layer: batch CSV
//! input, receipt rendering and report output.

pub mod csv;
pub mod receipt;
pub mod report;
