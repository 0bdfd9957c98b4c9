//! vrmkit CLI library.
//!
//! Command implementations for the `vrmkit` binary: migrating the rigs of a
//! scene file and reporting their version-gate state.

pub mod commands;
