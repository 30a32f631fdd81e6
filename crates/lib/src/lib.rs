//! runscript-lib: script generation for build jobs
//!
//! This crate turns dialect-independent build steps into script text:
//! - `script`: the writer, phase generator and backend contracts
//! - `shells`: dialect backends and the registry that selects them
//! - `plan`: declarative step lists that drive a backend
//! - `platform`: host detection used to pick a default dialect

pub mod consts;
pub mod plan;
pub mod platform;
pub mod script;
pub mod shells;
#[cfg(test)]
mod util;
