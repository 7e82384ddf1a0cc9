//! Test Utilities Crate
//!
//! Shared test infrastructure for the dues billing test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data with fixed, assertable values
//! - `builders`: Builder patterns for test data construction

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
