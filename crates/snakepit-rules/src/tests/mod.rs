//! Cross-module test suite.
//!
//! Unit tests live next to the code they cover; this module holds the tests
//! that exercise several modules at once:
//!
//! - `determinism.rs`: seeded replay and RNG purity properties
//! - `integration.rs`: full turns through the shipped rulesets
//! - `helpers.rs`: board and move builders shared by both

mod helpers;

pub use helpers::*;
