//! Test helpers used across the crate's unit tests.

pub mod testutil;
