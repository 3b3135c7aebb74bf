//! Persistence for the last searched city
//!
//! A single JSON slot in the platform data directory. Reads fall back to the
//! default city; write failures are reported to the caller, which only logs
//! them.

mod history;

pub use history::{HistoryStore, DEFAULT_CITY};
