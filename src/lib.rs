//! citywx library
//!
//! Weather lookup, statistics and report assembly, exposed for the binary and
//! for integration tests.

pub mod app;
pub mod cli;
pub mod clothing;
pub mod data;
pub mod lookup;
pub mod report;
pub mod stats;
pub mod store;
pub mod suggest;
pub mod ui;
