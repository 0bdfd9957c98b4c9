//! CLI command implementations

pub mod migrate;
pub mod status;

mod reporting;
